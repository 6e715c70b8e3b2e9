//! Pure derivations from raw event fields: canonical musical title,
//! production type and status, and seat availability.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use storage::models::{Availability, ProductionStatus, ProductionType};
use tracing::warn;

lazy_static! {
    /// Applied in order; each strips a trailing qualifier from the event name.
    static ref TRAILING_QUALIFIERS: Vec<Regex> = [
        r"(?i)\s*-\s*The Musical.*$",
        r"(?i)\s*-\s*National Tour.*$",
        r"(?i)\s*-\s*Broadway.*$",
        r"(?i)\s*-\s*Tour.*$",
        r"\s*\(.*\)$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("qualifier pattern is valid"))
    .collect();
}

/// Title used as the musical's natural key.
///
/// Falls back to the raw name untouched when stripping would leave nothing.
pub fn canonical_musical_name(raw_event_name: &str) -> String {
    let mut name = raw_event_name.to_string();
    for pattern in TRAILING_QUALIFIERS.iter() {
        name = pattern.replace(&name, "").into_owned();
    }

    let name = name.trim();
    if name.is_empty() {
        raw_event_name.to_string()
    } else {
        name.to_string()
    }
}

pub fn production_type(raw_event_name: &str) -> ProductionType {
    let lower = raw_event_name.to_lowercase();

    if lower.contains("broadway") {
        ProductionType::Broadway
    } else if lower.contains("tour") {
        ProductionType::Touring
    } else {
        ProductionType::Regional
    }
}

pub fn production_status(event_date: NaiveDate, today: NaiveDate) -> ProductionStatus {
    if event_date < today {
        ProductionStatus::Completed
    } else if event_date > today {
        ProductionStatus::Upcoming
    } else {
        ProductionStatus::Active
    }
}

/// Unknown provider codes map to `Available` rather than failing the event.
pub fn availability(provider_status_code: &str) -> Availability {
    match provider_status_code.to_lowercase().as_str() {
        "onsale" => Availability::Available,
        "soldout" => Availability::SoldOut,
        "limited" => Availability::Limited,
        other => {
            warn!(
                "Unknown event status code '{}', defaulting availability to {}",
                other,
                Availability::Available
            );
            Availability::Available
        }
    }
}
