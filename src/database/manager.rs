use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::filter::QueryError;

/// Errors from the store layer, classified into the kinds the API reports
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    /// unique_violation (23505)
    #[error("{0}")]
    Duplicate(String),

    /// foreign_key_violation (23503)
    #[error("{0}")]
    InvalidReference(String),

    /// check_violation / not_null_violation (23514, 23502)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                return DatabaseError::Unavailable(err.to_string());
            }
            sqlx::Error::Database(db_err) => {
                if let Some(kind) = classify(db_err.code().as_deref(), db_err.message()) {
                    return kind;
                }
            }
            _ => {}
        }
        DatabaseError::Sqlx(err)
    }
}

/// Map a Postgres SQLSTATE to the error kind the API reports, if it has one
fn classify(code: Option<&str>, message: &str) -> Option<DatabaseError> {
    let message = message.to_string();
    match code? {
        "23505" => {
            warn!(error_code = "23505", message = %message, "Unique constraint violation");
            Some(DatabaseError::Duplicate(message))
        }
        "23503" => {
            warn!(error_code = "23503", message = %message, "Foreign key violation");
            Some(DatabaseError::InvalidReference(message))
        }
        code @ ("23502" | "23514") => {
            warn!(error_code = code, message = %message, "Constraint violation");
            Some(DatabaseError::ConstraintViolation(message))
        }
        // Class 22: data exceptions (bad encoding, out-of-range numeric)
        code if code.starts_with("22") => {
            warn!(error_code = code, message = %message, "Data exception");
            Some(DatabaseError::ConstraintViolation(message))
        }
        _ => None,
    }
}

/// Pool construction and store-level housekeeping
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect a pool using `config`, failing fast if the store is unreachable
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = Self::database_url(config)?;
        let target = Self::redacted(url)?;

        let pool = Self::pool_options(config).connect(url).await?;

        info!("Created database pool for: {}", target);
        Ok(pool)
    }

    /// Build a pool that connects on first use
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = Self::database_url(config)?;
        Self::redacted(url)?;
        Ok(Self::pool_options(config).connect_lazy(url)?)
    }

    /// Apply embedded migrations from `./migrations`
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
    }

    fn database_url(config: &DatabaseConfig) -> Result<&str, DatabaseError> {
        config
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))
    }

    /// Connection target with the password removed, for logs
    fn redacted(url: &str) -> Result<String, DatabaseError> {
        let mut parsed = url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if parsed.password().is_some() {
            // Only fails for cannot-be-a-base URLs, which Postgres URLs are not
            let _ = parsed.set_password(Some("****"));
        }
        Ok(parsed.to_string())
    }
}
