use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use importer::ImporterError;
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Import(ImporterError),
    Validation(ValidationErrors),
    Forbidden(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Import(e) => write!(f, "Import error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
        }
    }
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Import(ImporterError::NotConfigured(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Import(ImporterError::UpstreamUnavailable(_)) => StatusCode::BAD_GATEWAY,
            Self::Import(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Import(
                e @ (ImporterError::NotConfigured(_) | ImporterError::UpstreamUnavailable(_)),
            ) => {
                json!({
                    "error": e.to_string()
                })
            }
            Self::Import(e) => {
                tracing::error!("Import error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::Forbidden(msg) => {
                json!({
                    "error": msg
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<ImporterError> for WebError {
    fn from(error: ImporterError) -> Self {
        Self::Import(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type ApiResult<T> = Result<T, WebError>;
