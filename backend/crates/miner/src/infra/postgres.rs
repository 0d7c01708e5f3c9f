//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::MinerId;
use kernel::pagination::PageRequest;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::miner::{DocumentPaths, Miner, check_paths};
use crate::domain::repository::MinerRepository;
use crate::domain::value_object::{
    document_role::DocumentRole, email::Email, id_number::IdNumber,
    miner_category::MinerCategory, person_name::PersonName, totp_secret::TotpSecret,
};
use crate::error::{MinerError, MinerResult};

const MINER_COLUMNS: &str = r#"
    id,
    full_name,
    last_name,
    id_number,
    phone_number,
    email,
    category,
    totp_secret,
    id_front_path,
    id_back_path,
    facial_photo_path,
    rucon_path,
    other_doc_path,
    exploitation_contract_path,
    environmental_permit_path,
    technical_permit_path,
    created_at,
    updated_at,
    deleted_at
"#;

/// PostgreSQL-backed miner repository
#[derive(Clone)]
pub struct PgMinerRepository {
    pool: PgPool,
}

impl PgMinerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map an INSERT failure: unique violations name the clashing field
fn insert_error(err: sqlx::Error) -> MinerError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some("miners_id_number_key") => "id_number",
                Some("miners_email_key") => "email",
                _ => "email or id_number",
            };
            return MinerError::DuplicateMiner {
                field: field.to_string(),
            };
        }
    }
    MinerError::Persistence(err)
}

impl MinerRepository for PgMinerRepository {
    async fn create(&self, miner: &Miner) -> MinerResult<()> {
        let path = |role| miner.documents.get(role);

        sqlx::query(&format!(
            r#"
            INSERT INTO miners ({MINER_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            "#
        ))
        .bind(miner.id.as_uuid())
        .bind(miner.full_name.as_str())
        .bind(miner.last_name.as_str())
        .bind(miner.id_number.as_str())
        .bind(miner.phone_number.as_deref())
        .bind(miner.email.as_str())
        .bind(miner.category.as_str())
        .bind(miner.totp_secret.as_ref().map(TotpSecret::as_base32))
        .bind(path(DocumentRole::IdFront))
        .bind(path(DocumentRole::IdBack))
        .bind(path(DocumentRole::FacialPhoto))
        .bind(path(DocumentRole::Rucon))
        .bind(path(DocumentRole::OtherDoc))
        .bind(path(DocumentRole::ExploitationContract))
        .bind(path(DocumentRole::EnvironmentalPermit))
        .bind(path(DocumentRole::TechnicalPermit))
        .bind(miner.created_at)
        .bind(miner.updated_at)
        .bind(miner.deleted_at)
        .execute(&self.pool)
        .await
        .map_err(insert_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &MinerId) -> MinerResult<Option<Miner>> {
        let row = sqlx::query_as::<_, MinerRow>(&format!(
            "SELECT {MINER_COLUMNS} FROM miners WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(MinerRow::into_miner).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> MinerResult<Option<Miner>> {
        let row = sqlx::query_as::<_, MinerRow>(&format!(
            "SELECT {MINER_COLUMNS} FROM miners WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(MinerRow::into_miner).transpose()
    }

    async fn find_page(&self, page: PageRequest) -> MinerResult<(Vec<Miner>, i64)> {
        let total_rows =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM miners WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await?;

        let rows = sqlx::query_as::<_, MinerRow>(&format!(
            r#"
            SELECT {MINER_COLUMNS}
            FROM miners
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC, id
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(page.limit() as i64)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let miners = rows
            .into_iter()
            .map(MinerRow::into_miner)
            .collect::<MinerResult<Vec<_>>>()?;

        Ok((miners, total_rows))
    }

    async fn soft_delete(&self, id: &MinerId, at: DateTime<Utc>) -> MinerResult<bool> {
        let affected = sqlx::query(
            r#"
            UPDATE miners SET
                deleted_at = $2,
                updated_at = $2
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.as_uuid())
        .bind(at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct MinerRow {
    id: Uuid,
    full_name: String,
    last_name: String,
    id_number: String,
    phone_number: Option<String>,
    email: String,
    category: String,
    totp_secret: Option<String>,
    id_front_path: Option<String>,
    id_back_path: Option<String>,
    facial_photo_path: Option<String>,
    rucon_path: Option<String>,
    other_doc_path: Option<String>,
    exploitation_contract_path: Option<String>,
    environmental_permit_path: Option<String>,
    technical_permit_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl MinerRow {
    fn into_miner(self) -> MinerResult<Miner> {
        let category = MinerCategory::parse(&self.category)
            .map_err(|e| MinerError::Internal(format!("corrupt miner row {}: {}", self.id, e)))?;

        let documents: DocumentPaths = [
            (DocumentRole::IdFront, self.id_front_path),
            (DocumentRole::IdBack, self.id_back_path),
            (DocumentRole::FacialPhoto, self.facial_photo_path),
            (DocumentRole::Rucon, self.rucon_path),
            (DocumentRole::OtherDoc, self.other_doc_path),
            (DocumentRole::ExploitationContract, self.exploitation_contract_path),
            (DocumentRole::EnvironmentalPermit, self.environmental_permit_path),
            (DocumentRole::TechnicalPermit, self.technical_permit_path),
        ]
        .into_iter()
        .filter_map(|(role, path)| path.filter(|p| !p.is_empty()).map(|p| (role, p)))
        .collect();
        check_paths(category, &documents)?;

        let totp_secret = self
            .totp_secret
            .filter(|s| !s.is_empty())
            .map(TotpSecret::from_base32)
            .transpose()?;

        Ok(Miner {
            id: MinerId::from_uuid(self.id),
            full_name: PersonName::new(&self.full_name, "full_name")?,
            last_name: PersonName::new(&self.last_name, "last_name")?,
            id_number: IdNumber::new(self.id_number)?,
            phone_number: self.phone_number.filter(|p| !p.is_empty()),
            email: Email::new(self.email)?,
            category,
            documents,
            totp_secret,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}
