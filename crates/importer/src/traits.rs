use crate::Result;
use crate::canonical::RawEvent;
use chrono::NaiveDate;
use storage::dto::import::ImportRequest;

pub const DEFAULT_RESULT_LIMIT: u32 = 50;
pub const DEFAULT_COUNTRY_CODE: &str = "US";

/// Geographic and time filters for one batch fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFilters {
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub country_code: String,
    pub radius: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: u32,
}

impl Default for ImportFilters {
    fn default() -> Self {
        Self {
            city: None,
            state_code: None,
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            radius: None,
            start_date: None,
            end_date: None,
            limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl From<ImportRequest> for ImportFilters {
    fn from(request: ImportRequest) -> Self {
        Self {
            city: request.city,
            state_code: request.state_code,
            radius: request.radius,
            start_date: request.start_date,
            end_date: request.end_date,
            limit: request.limit.unwrap_or(DEFAULT_RESULT_LIMIT),
            ..Self::default()
        }
    }
}

/// A provider of candidate musical events.
///
/// Implementations make a single outbound call per fetch and never retry.
#[async_trait::async_trait]
pub trait EventSource: Send + Sync {
    async fn search_musical_events(&self, filters: &ImportFilters) -> Result<Vec<RawEvent>>;

    /// Key under which this source's identifiers are recorded on imported rows.
    fn provider(&self) -> &'static str;
}
