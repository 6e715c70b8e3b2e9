use sqlx::PgPool;
use sqlx::types::Json;

use crate::error::Result;
use crate::models::{Musical, NewMusical};

pub struct MusicalRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MusicalRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Musical>> {
        let musical = sqlx::query_as::<_, Musical>(
            r#"
            SELECT musical_id, name, description, genre, external_ids, created_at
            FROM musicals
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(musical)
    }

    pub async fn create(&self, musical: &NewMusical) -> Result<Musical> {
        let created = sqlx::query_as::<_, Musical>(
            r#"
            INSERT INTO musicals (name, description, genre, external_ids)
            VALUES ($1, $2, $3, $4)
            RETURNING musical_id, name, description, genre, external_ids, created_at
            "#,
        )
        .bind(&musical.name)
        .bind(&musical.description)
        .bind(&musical.genre)
        .bind(Json(&musical.external_ids))
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }
}
