use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Request payload for importing musical events from the event source
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_date_range"))]
pub struct ImportRequest {
    #[validate(length(min = 1, max = 255))]
    pub city: Option<String>,

    #[validate(length(equal = 2, message = "State code must be 2 characters"))]
    pub state_code: Option<String>,

    #[validate(range(min = 1, max = 500, message = "Radius must be between 1 and 500"))]
    pub radius: Option<u32>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    #[validate(range(min = 1, max = 200, message = "Limit must be between 1 and 200"))]
    pub limit: Option<u32>,
}

fn validate_date_range(request: &ImportRequest) -> Result<(), ValidationError> {
    match (request.start_date, request.end_date) {
        (Some(start), Some(end)) if start > end => Err(ValidationError::new("date_range")
            .with_message(Cow::Borrowed("startDate must not be after endDate"))),
        _ => Ok(()),
    }
}

/// Outcome of one batch import. Callers must inspect `errors` even when the
/// call itself succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    pub imported: u32,
    pub skipped: u32,
    pub errors: Vec<String>,
}

/// Row counts per catalog table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImportStats {
    pub musicals: i64,
    pub productions: i64,
    pub performances: i64,
    pub venues: i64,
}

impl ImportStats {
    pub fn total(&self) -> i64 {
        self.musicals + self.productions + self.performances + self.venues
    }
}

/// Response body for a completed import run
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportResponse {
    pub message: String,
    #[serde(flatten)]
    pub summary: ImportSummary,
}

impl From<ImportSummary> for ImportResponse {
    fn from(summary: ImportSummary) -> Self {
        Self {
            message: format!(
                "Import completed: {} imported, {} skipped",
                summary.imported, summary.skipped
            ),
            summary,
        }
    }
}

/// Health of the upstream event source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SourceStatus {
    pub configured: bool,
    pub connected: bool,
    /// `operational`, `api_error` or `not_configured`
    pub status: String,
}

impl SourceStatus {
    pub fn new(configured: bool, connected: bool) -> Self {
        let status = match (configured, connected) {
            (_, true) => "operational",
            (true, false) => "api_error",
            (false, false) => "not_configured",
        };
        Self {
            configured,
            connected,
            status: status.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_request_validation() {
        let valid = ImportRequest {
            city: Some("Chicago".to_string()),
            state_code: Some("IL".to_string()),
            radius: Some(25),
            limit: Some(50),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let invalid = ImportRequest {
            state_code: Some("Illinois".to_string()),
            limit: Some(0),
            ..Default::default()
        };
        let errors = invalid.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("state_code"));
        assert!(errors.field_errors().contains_key("limit"));
    }

    #[test]
    fn test_import_request_rejects_inverted_date_range() {
        let inverted = ImportRequest {
            start_date: NaiveDate::from_ymd_opt(2024, 9, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 8, 1),
            ..Default::default()
        };
        let errors = inverted.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("__all__"));

        let single_day = ImportRequest {
            start_date: NaiveDate::from_ymd_opt(2024, 9, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 9, 1),
            ..Default::default()
        };
        assert!(single_day.validate().is_ok());

        let open_ended = ImportRequest {
            start_date: NaiveDate::from_ymd_opt(2024, 9, 1),
            ..Default::default()
        };
        assert!(open_ended.validate().is_ok());
    }

    #[test]
    fn test_import_request_accepts_camel_case() {
        let request: ImportRequest = serde_json::from_str(
            r#"{"city":"Seattle","stateCode":"WA","startDate":"2024-06-01","limit":10}"#,
        )
        .unwrap();

        assert_eq!(request.state_code.as_deref(), Some("WA"));
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(request.limit, Some(10));
    }

    #[test]
    fn test_import_response_message() {
        let response = ImportResponse::from(ImportSummary {
            imported: 4,
            skipped: 1,
            errors: vec!["Failed to import event tm-3: missing venue".to_string()],
        });
        assert_eq!(response.message, "Import completed: 4 imported, 1 skipped");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["imported"], 4);
        assert_eq!(json["errors"][0], "Failed to import event tm-3: missing venue");
    }

    #[test]
    fn test_source_status_labels() {
        assert_eq!(SourceStatus::new(true, true).status, "operational");
        assert_eq!(SourceStatus::new(true, false).status, "api_error");
        assert_eq!(SourceStatus::new(false, false).status, "not_configured");
    }
}
