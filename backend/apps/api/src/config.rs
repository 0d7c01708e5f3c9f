//! Server configuration from the environment

use anyhow::Context;
use std::env;
use std::path::PathBuf;

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub max_db_connections: u32,
    pub upload_dir: PathBuf,
    pub totp_issuer: String,
    pub frontend_origins: Vec<String>,
    pub password_pepper: Option<Vec<u8>>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. `DATABASE_URL` wins over the `DB_*` parts.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = var("PORT", "8080")
            .parse()
            .context("PORT must be a valid port number")?;
        let max_db_connections = var("DB_MAX_CONNECTIONS", "5")
            .parse()
            .context("DB_MAX_CONNECTIONS must be a positive integer")?;

        let database_url = match lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                var("DB_USER", "postgres"),
                var("DB_PASSWORD", "postgres"),
                var("DB_HOST", "localhost"),
                var("DB_PORT", "5432"),
                var("DB_NAME", "postgres"),
            ),
        };

        let frontend_origins = var("FRONTEND_ORIGINS", DEFAULT_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        let password_pepper = lookup("PASSWORD_PEPPER")
            .filter(|p| !p.is_empty())
            .map(String::into_bytes);

        Ok(Self {
            port,
            database_url,
            max_db_connections,
            upload_dir: PathBuf::from(var("UPLOAD_DIR", "./uploads")),
            totp_issuer: var("TOTP_ISSUER", "Batea Fintech"),
            frontend_origins,
            password_pepper,
        })
    }
}
