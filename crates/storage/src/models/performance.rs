use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Availability, ExternalIds};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Performance {
    pub performance_id: Uuid,
    pub production_id: Uuid,
    pub venue_id: Uuid,
    pub performance_date: NaiveDate,
    pub performance_time: NaiveTime,
    pub ticket_url: Option<String>,
    pub availability: String,
    #[schema(value_type = Object)]
    pub external_ids: Json<ExternalIds>,
    pub created_at: chrono::NaiveDateTime,
}

/// Natural key of a performance: one production at one venue at one date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PerformanceKey {
    pub production_id: Uuid,
    pub venue_id: Uuid,
    pub performance_date: NaiveDate,
    pub performance_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPerformance {
    pub production_id: Uuid,
    pub venue_id: Uuid,
    pub performance_date: NaiveDate,
    pub performance_time: NaiveTime,
    pub ticket_url: Option<String>,
    pub availability: Availability,
    pub external_ids: ExternalIds,
}

impl NewPerformance {
    pub fn key(&self) -> PerformanceKey {
        PerformanceKey {
            production_id: self.production_id,
            venue_id: self.venue_id,
            performance_date: self.performance_date,
            performance_time: self.performance_time,
        }
    }
}
