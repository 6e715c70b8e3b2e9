use sqlx::PgPool;
use sqlx::types::Json;

use crate::error::Result;
use crate::models::{NewVenue, Venue};

pub struct VenueRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VenueRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Exact match on `(name, city, state)`
    pub async fn find_by_natural_key(
        &self,
        name: &str,
        city: &str,
        state: &str,
    ) -> Result<Option<Venue>> {
        let venue = sqlx::query_as::<_, Venue>(
            r#"
            SELECT venue_id, name, address, city, state, zip_code, latitude, longitude,
                   capacity, external_ids, created_at
            FROM venues
            WHERE name = $1 AND city = $2 AND state = $3
            "#,
        )
        .bind(name)
        .bind(city)
        .bind(state)
        .fetch_optional(self.pool)
        .await?;

        Ok(venue)
    }

    pub async fn create(&self, venue: &NewVenue) -> Result<Venue> {
        let created = sqlx::query_as::<_, Venue>(
            r#"
            INSERT INTO venues
                (name, address, city, state, zip_code, latitude, longitude, capacity, external_ids)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING venue_id, name, address, city, state, zip_code, latitude, longitude,
                      capacity, external_ids, created_at
            "#,
        )
        .bind(&venue.name)
        .bind(&venue.address)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.zip_code)
        .bind(venue.latitude)
        .bind(venue.longitude)
        .bind(venue.capacity)
        .bind(Json(&venue.external_ids))
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }
}
