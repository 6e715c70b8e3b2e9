mod client;
mod models;
mod params;

pub use client::{DEFAULT_BASE_URL, TicketmasterClient};
pub use models::*;
pub use params::{
    ARTS_THEATRE_SEGMENT_ID, DistanceUnit, EventSearchParams, THEATRE_SUB_GENRE_ID,
};

use crate::canonical::{RawClassification, RawEvent, RawVenue};
use crate::traits::{EventSource, ImportFilters};
use crate::Result;
use tracing::info;

pub const PROVIDER: &str = "ticketmaster";

#[async_trait::async_trait]
impl EventSource for TicketmasterClient {
    async fn search_musical_events(&self, filters: &ImportFilters) -> Result<Vec<RawEvent>> {
        let response = self
            .search_musicals(EventSearchParams::from(filters))
            .await?;

        if let Some(page) = &response.page {
            info!(
                "Ticketmaster page {}/{} ({} total events)",
                page.number + 1,
                page.total_pages.max(1),
                page.total_elements
            );
        }

        Ok(response
            .into_events()
            .into_iter()
            .map(RawEvent::from)
            .collect())
    }

    fn provider(&self) -> &'static str {
        PROVIDER
    }
}

impl From<TicketmasterEvent> for RawEvent {
    fn from(event: TicketmasterEvent) -> Self {
        let venue = event
            .embedded
            .and_then(|e| e.venues.into_iter().next())
            .map(RawVenue::from);

        let classifications = event
            .classifications
            .into_iter()
            .map(|c| RawClassification {
                segment: c.segment.map(|s| s.name),
                genre: c.genre.map(|g| g.name),
                sub_genre: c.sub_genre.map(|s| s.name),
            })
            .collect();

        Self {
            external_id: event.id,
            name: event.name,
            local_date: event.dates.start.local_date,
            local_time: event.dates.start.local_time,
            status_code: event.dates.status.map(|s| s.code).unwrap_or_default(),
            ticket_url: event.url,
            venue,
            classifications,
        }
    }
}

impl From<TicketmasterVenue> for RawVenue {
    fn from(venue: TicketmasterVenue) -> Self {
        let (latitude, longitude) = venue
            .location
            .map(|l| (l.latitude, l.longitude))
            .unwrap_or((None, None));

        Self {
            external_id: venue.id,
            name: venue.name,
            address: venue.address.and_then(|a| a.line1).unwrap_or_default(),
            city: venue.city.map(|c| c.name).unwrap_or_default(),
            state: venue.state.and_then(|s| s.state_code).unwrap_or_default(),
            postal_code: venue.postal_code.unwrap_or_default(),
            latitude,
            longitude,
        }
    }
}
