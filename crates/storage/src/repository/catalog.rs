use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::CatalogTable;

/// Table-wide operations shared by the four catalog tables.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self, table: CatalogTable) -> Result<i64> {
        // Table names come from the closed `CatalogTable` set, never from input.
        let sql = format!("SELECT COUNT(*) FROM {}", table.table_name());
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    pub async fn delete_all(&self, table: CatalogTable) -> Result<u64> {
        let sql = format!("DELETE FROM {}", table.table_name());
        let result = sqlx::query(&sql).execute(self.pool).await?;

        Ok(result.rows_affected())
    }

    /// Existing entries win over the merged one, so another import can never
    /// overwrite the id a provider has already recorded.
    pub async fn add_external_id(
        &self,
        table: CatalogTable,
        row_id: Uuid,
        provider: &str,
        external_id: &str,
    ) -> Result<()> {
        let sql = format!(
            "UPDATE {} SET external_ids = jsonb_build_object($2::text, $3::text) || external_ids WHERE {} = $1",
            table.table_name(),
            table.id_column()
        );

        let result = sqlx::query(&sql)
            .bind(row_id)
            .bind(provider)
            .bind(external_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
