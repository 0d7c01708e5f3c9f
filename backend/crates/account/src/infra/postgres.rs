//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{User, UserCredential};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{firebase_uid::FirebaseUid, phone_number::PhoneNumber};
use crate::error::{AccountError, AccountResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn insert_error(err: sqlx::Error) -> AccountError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some("users_firebase_uid_key") => AccountError::FirebaseUidTaken,
                _ => AccountError::PhoneNumberTaken,
            };
        }
    }
    AccountError::Database(err)
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                phone_number,
                password_hash,
                firebase_uid,
                is_verified,
                created_at,
                updated_at,
                deleted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.phone_number.as_str())
        .bind(user.credential.password_hash().map(HashedPassword::as_phc_string))
        .bind(user.credential.firebase_uid().map(FirebaseUid::as_str))
        .bind(user.is_verified)
        .bind(user.created_at)
        .bind(user.updated_at)
        .bind(user.deleted_at)
        .execute(&self.pool)
        .await
        .map_err(insert_error)?;

        Ok(())
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                phone_number,
                password_hash,
                firebase_uid,
                is_verified,
                created_at,
                updated_at,
                deleted_at
            FROM users
            WHERE phone_number = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(phone.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    phone_number: String,
    password_hash: Option<String>,
    firebase_uid: Option<String>,
    is_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_user(self) -> AccountResult<User> {
        let password_hash = self
            .password_hash
            .map(HashedPassword::from_phc_string)
            .transpose()
            .map_err(|e| AccountError::Internal(format!("corrupt user row {}: {}", self.id, e)))?;

        Ok(User {
            id: UserId::from_uuid(self.id),
            phone_number: PhoneNumber::new(&self.phone_number)?,
            credential: UserCredential::new(
                password_hash,
                FirebaseUid::parse_optional(self.firebase_uid)?,
            )?,
            is_verified: self.is_verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}
