use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{ExternalIds, ProductionStatus, ProductionType};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Production {
    pub production_id: Uuid,
    pub musical_id: Uuid,
    pub name: String,
    pub production_type: String,
    pub status: String,
    #[schema(value_type = Object)]
    pub external_ids: Json<ExternalIds>,
    pub created_at: chrono::NaiveDateTime,
}

/// Field set for inserting a production. The natural key is `(musical_id, name)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduction {
    pub musical_id: Uuid,
    pub name: String,
    pub production_type: ProductionType,
    pub status: ProductionStatus,
    pub external_ids: ExternalIds,
}
