use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;
use storage::models::{ExternalIds, NewMusical, NewPerformance, NewProduction, NewVenue};
use tracing::{debug, warn};
use uuid::Uuid;

use super::models::{RawEvent, RawVenue};
use crate::normalizer;
use crate::{ImporterError, Result};

pub const DEFAULT_GENRE: &str = "Musical";
pub const DEFAULT_PERFORMANCE_TIME: (u32, u32) = (19, 30);

/// Turns one raw event into the field sets the reconciler writes, tagging
/// every row with the event source's identifier.
pub struct EventMapper<'a> {
    provider: &'a str,
    today: NaiveDate,
}

impl<'a> EventMapper<'a> {
    pub fn new(provider: &'a str, today: NaiveDate) -> Self {
        Self { provider, today }
    }

    pub fn venue(&self, venue: &RawVenue) -> NewVenue {
        let external_ids = venue
            .external_id
            .as_deref()
            .map(|id| ExternalIds::single(self.provider, id))
            .unwrap_or_default();

        NewVenue {
            name: venue.name.trim().to_string(),
            address: venue.address.clone(),
            city: venue.city.trim().to_string(),
            state: venue.state.trim().to_string(),
            zip_code: venue.postal_code.clone(),
            latitude: parse_coordinate(venue.latitude.as_deref(), &venue.name),
            longitude: parse_coordinate(venue.longitude.as_deref(), &venue.name),
            capacity: None,
            external_ids,
        }
    }

    pub fn musical(&self, event: &RawEvent) -> NewMusical {
        let genre = match event.primary_genre() {
            Some(genre) => genre.to_string(),
            None => {
                debug!(
                    "Event {} has no genre classification, using '{}'",
                    event.external_id, DEFAULT_GENRE
                );
                DEFAULT_GENRE.to_string()
            }
        };

        NewMusical {
            name: normalizer::canonical_musical_name(&event.name),
            description: Some(format!("{} - {}", event.name, genre)),
            genre,
            external_ids: ExternalIds::single(self.provider, &event.external_id),
        }
    }

    pub fn production(&self, event: &RawEvent, musical_id: Uuid) -> Result<NewProduction> {
        let start_date = parse_date(event.local_date.as_deref())?;

        Ok(NewProduction {
            musical_id,
            name: event.name.clone(),
            production_type: normalizer::production_type(&event.name),
            status: normalizer::production_status(start_date, self.today),
            external_ids: ExternalIds::single(self.provider, &event.external_id),
        })
    }

    pub fn performance(
        &self,
        event: &RawEvent,
        production_id: Uuid,
        venue_id: Uuid,
    ) -> Result<NewPerformance> {
        let performance_time = match event.local_time.as_deref() {
            Some(time) => parse_time(time)?,
            None => default_performance_time(),
        };

        Ok(NewPerformance {
            production_id,
            venue_id,
            performance_date: parse_date(event.local_date.as_deref())?,
            performance_time,
            ticket_url: event.ticket_url.clone(),
            availability: normalizer::availability(&event.status_code),
            external_ids: ExternalIds::single(self.provider, &event.external_id),
        })
    }
}

pub fn default_performance_time() -> NaiveTime {
    let (hour, minute) = DEFAULT_PERFORMANCE_TIME;
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn parse_date(value: Option<&str>) -> Result<NaiveDate> {
    let value = value
        .ok_or_else(|| ImporterError::TransformationError("missing start date".to_string()))?;
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        ImporterError::TransformationError(format!("invalid start date '{}': {}", value, e))
    })
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|e| {
            ImporterError::TransformationError(format!("invalid start time '{}': {}", value, e))
        })
}

fn parse_coordinate(value: Option<&str>, venue_name: &str) -> Option<Decimal> {
    let value = value?.trim();
    match Decimal::from_str(value) {
        Ok(coordinate) => Some(coordinate),
        Err(_) => {
            warn!(
                "Dropping unparsable coordinate '{}' for venue {}",
                value, venue_name
            );
            None
        }
    }
}
