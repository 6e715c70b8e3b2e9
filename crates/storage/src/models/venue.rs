use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ExternalIds;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Venue {
    pub venue_id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub capacity: Option<i32>,
    #[schema(value_type = Object)]
    pub external_ids: Json<ExternalIds>,
    pub created_at: chrono::NaiveDateTime,
}

/// Field set for inserting a venue. The natural key is `(name, city, state)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVenue {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub capacity: Option<i32>,
    pub external_ids: ExternalIds,
}
