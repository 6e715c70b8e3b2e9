use sqlx::PgPool;
use sqlx::types::Json;

use crate::error::Result;
use crate::models::{NewPerformance, Performance, PerformanceKey};

pub struct PerformanceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PerformanceRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_natural_key(&self, key: &PerformanceKey) -> Result<Option<Performance>> {
        let performance = sqlx::query_as::<_, Performance>(
            r#"
            SELECT performance_id, production_id, venue_id, performance_date, performance_time,
                   ticket_url, availability, external_ids, created_at
            FROM performances
            WHERE production_id = $1 AND venue_id = $2
              AND performance_date = $3 AND performance_time = $4
            "#,
        )
        .bind(key.production_id)
        .bind(key.venue_id)
        .bind(key.performance_date)
        .bind(key.performance_time)
        .fetch_optional(self.pool)
        .await?;

        Ok(performance)
    }

    pub async fn create(&self, performance: &NewPerformance) -> Result<Performance> {
        let created = sqlx::query_as::<_, Performance>(
            r#"
            INSERT INTO performances
                (production_id, venue_id, performance_date, performance_time,
                 ticket_url, availability, external_ids)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING performance_id, production_id, venue_id, performance_date, performance_time,
                      ticket_url, availability, external_ids, created_at
            "#,
        )
        .bind(performance.production_id)
        .bind(performance.venue_id)
        .bind(performance.performance_date)
        .bind(performance.performance_time)
        .bind(&performance.ticket_url)
        .bind(performance.availability.as_str())
        .bind(Json(&performance.external_ids))
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }
}
