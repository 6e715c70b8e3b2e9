use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ExternalIds;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Musical {
    pub musical_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub genre: String,
    #[schema(value_type = Object)]
    pub external_ids: Json<ExternalIds>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMusical {
    pub name: String,
    pub description: Option<String>,
    pub genre: String,
    pub external_ids: ExternalIds,
}
