use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{NewProduction, Production};

pub struct ProductionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_natural_key(
        &self,
        musical_id: Uuid,
        name: &str,
    ) -> Result<Option<Production>> {
        let production = sqlx::query_as::<_, Production>(
            r#"
            SELECT production_id, musical_id, name, production_type, status,
                   external_ids, created_at
            FROM productions
            WHERE musical_id = $1 AND name = $2
            "#,
        )
        .bind(musical_id)
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(production)
    }

    pub async fn create(&self, production: &NewProduction) -> Result<Production> {
        let created = sqlx::query_as::<_, Production>(
            r#"
            INSERT INTO productions (musical_id, name, production_type, status, external_ids)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING production_id, musical_id, name, production_type, status,
                      external_ids, created_at
            "#,
        )
        .bind(production.musical_id)
        .bind(&production.name)
        .bind(production.production_type.as_str())
        .bind(production.status.as_str())
        .bind(Json(&production.external_ids))
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }
}
