use serde::{Deserialize, Serialize};

/// One event as delivered by an event source, before normalization.
///
/// Dates and times stay in the provider's string form; parsing them is part
/// of reconciling the event, so a malformed value only fails that event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    pub external_id: String,
    pub name: String,
    /// `YYYY-MM-DD` in the venue's local time zone; absent for date-TBA events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_date: Option<String>,
    /// `HH:MM` or `HH:MM:SS`; absent for events without a published start time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_time: Option<String>,
    pub status_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<RawVenue>,
    #[serde(default)]
    pub classifications: Vec<RawClassification>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawVenue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawClassification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_genre: Option<String>,
}

impl RawEvent {
    pub fn primary_genre(&self) -> Option<&str> {
        self.classifications
            .first()
            .and_then(|c| c.genre.as_deref())
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }
}
