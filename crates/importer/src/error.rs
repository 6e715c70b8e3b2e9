use storage::error::StorageError;
use storage::models::CatalogTable;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImporterError>;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("Event source not configured: {0}")]
    NotConfigured(String),

    #[error("Event source unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Failed to write {}: {message}", .entity.entity_name())]
    Persistence {
        entity: CatalogTable,
        message: String,
    },

    #[error("{0}")]
    RecordSkipped(String),

    #[error("Data transformation error: {0}")]
    TransformationError(String),
}

impl ImporterError {
    pub fn persistence(entity: CatalogTable, error: StorageError) -> Self {
        Self::Persistence {
            entity,
            message: error.to_string(),
        }
    }

    pub fn upstream(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::UpstreamUnavailable(format!("request timed out: {}", error))
        } else if error.is_decode() {
            Self::UpstreamUnavailable(format!("malformed response payload: {}", error))
        } else {
            Self::UpstreamUnavailable(error.to_string())
        }
    }
}
