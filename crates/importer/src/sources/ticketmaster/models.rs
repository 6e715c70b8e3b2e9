use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EventSearchResponse {
    #[serde(rename = "_embedded")]
    pub embedded: Option<EmbeddedEvents>,
    pub page: Option<Page>,
}

impl EventSearchResponse {
    pub fn into_events(self) -> Vec<TicketmasterEvent> {
        self.embedded.map(|e| e.events).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmbeddedEvents {
    #[serde(default)]
    pub events: Vec<TicketmasterEvent>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TicketmasterEvent {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub url: Option<String>,
    #[serde(default)]
    pub dates: EventDates,
    #[serde(default)]
    pub classifications: Vec<Classification>,
    #[serde(rename = "_embedded")]
    pub embedded: Option<EmbeddedVenues>,
}

/// Every field may be absent; date-TBA events carry no `localDate`.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct EventDates {
    #[serde(default)]
    pub start: EventStart,
    pub timezone: Option<String>,
    pub status: Option<EventStatus>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventStart {
    pub local_date: Option<String>,
    pub local_time: Option<String>,
    pub date_time: Option<String>,
    #[serde(rename = "dateTBA", default)]
    pub date_tba: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EventStatus {
    pub code: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    #[serde(default)]
    pub primary: bool,
    pub segment: Option<NamedRef>,
    pub genre: Option<NamedRef>,
    pub sub_genre: Option<NamedRef>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NamedRef {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmbeddedVenues {
    #[serde(default)]
    pub venues: Vec<TicketmasterVenue>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TicketmasterVenue {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub postal_code: Option<String>,
    pub city: Option<City>,
    pub state: Option<State>,
    pub address: Option<Address>,
    pub location: Option<Location>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct City {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub name: Option<String>,
    pub state_code: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Address {
    pub line1: Option<String>,
    pub line2: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Location {
    pub longitude: Option<String>,
    pub latitude: Option<String>,
}
