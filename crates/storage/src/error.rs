use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StorageError::UniqueViolation(_) => true,
            StorageError::Database(sqlx::Error::Database(e)) => {
                e.code().as_deref() == Some("23505")
            }
            _ => false,
        }
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            StorageError::ForeignKeyViolation(_) => true,
            StorageError::Database(sqlx::Error::Database(e)) => {
                e.code().as_deref() == Some("23503")
            }
            _ => false,
        }
    }
}
