use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load settings for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Database operation failed: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

impl From<configuration::error::ConfigError> for DbError {
    fn from(err: configuration::error::ConfigError) -> Self {
        DbError::ConnectionConfigError(err.to_string())
    }
}
