use serde::Serialize;

use crate::ImportFilters;

/// Arts & Theatre segment
pub const ARTS_THEATRE_SEGMENT_ID: &str = "KZFzniwnSyZfZ7v7nE";
/// Theatre sub-genre
pub const THEATRE_SUB_GENRE_ID: &str = "KnvZfZ7vAd1";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Miles,
    Km,
}

/// Query parameters of the Discovery API event search.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventSearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latlong: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<DistanceUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_genre_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl EventSearchParams {
    /// Restricts the search to theatre events.
    pub fn musicals_only(mut self) -> Self {
        self.segment_id = Some(ARTS_THEATRE_SEGMENT_ID.to_string());
        self.sub_genre_id = Some(THEATRE_SUB_GENRE_ID.to_string());
        self
    }
}

impl From<&ImportFilters> for EventSearchParams {
    fn from(filters: &ImportFilters) -> Self {
        Self {
            city: filters.city.clone(),
            state_code: filters.state_code.clone(),
            country_code: Some(filters.country_code.clone()),
            radius: filters.radius,
            unit: filters.radius.map(|_| DistanceUnit::Miles),
            start_date_time: filters
                .start_date
                .map(|d| format!("{}T00:00:00Z", d.format("%Y-%m-%d"))),
            end_date_time: filters
                .end_date
                .map(|d| format!("{}T23:59:59Z", d.format("%Y-%m-%d"))),
            size: Some(filters.limit),
            ..Self::default()
        }
    }
}
