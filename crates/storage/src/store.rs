use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    CatalogTable, Musical, NewMusical, NewPerformance, NewProduction, NewVenue, Performance,
    PerformanceKey, Production, Venue,
};

/// Row-level operations the catalog import needs from a datastore.
///
/// Lookups are exact-match on natural keys and return `Ok(None)` on a miss.
/// Inserts return the created row and fail with a unique-violation error when
/// the natural key is already taken, or a foreign-key error when a referenced
/// row does not exist.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_venue(&self, name: &str, city: &str, state: &str) -> Result<Option<Venue>>;
    async fn insert_venue(&self, venue: &NewVenue) -> Result<Venue>;

    async fn find_musical(&self, name: &str) -> Result<Option<Musical>>;
    async fn insert_musical(&self, musical: &NewMusical) -> Result<Musical>;

    async fn find_production(&self, musical_id: Uuid, name: &str) -> Result<Option<Production>>;
    async fn insert_production(&self, production: &NewProduction) -> Result<Production>;

    async fn find_performance(&self, key: &PerformanceKey) -> Result<Option<Performance>>;
    async fn insert_performance(&self, performance: &NewPerformance) -> Result<Performance>;

    /// Adds `provider -> external_id` to a row's identifier map, keeping any
    /// entry already recorded for that provider.
    async fn add_external_id(
        &self,
        table: CatalogTable,
        row_id: Uuid,
        provider: &str,
        external_id: &str,
    ) -> Result<()>;

    async fn count(&self, table: CatalogTable) -> Result<i64>;

    /// Deletes every row of `table`, returning how many were removed.
    async fn delete_all(&self, table: CatalogTable) -> Result<u64>;
}

#[async_trait]
impl<T: CatalogStore + ?Sized> CatalogStore for Arc<T> {
    async fn find_venue(&self, name: &str, city: &str, state: &str) -> Result<Option<Venue>> {
        (**self).find_venue(name, city, state).await
    }

    async fn insert_venue(&self, venue: &NewVenue) -> Result<Venue> {
        (**self).insert_venue(venue).await
    }

    async fn find_musical(&self, name: &str) -> Result<Option<Musical>> {
        (**self).find_musical(name).await
    }

    async fn insert_musical(&self, musical: &NewMusical) -> Result<Musical> {
        (**self).insert_musical(musical).await
    }

    async fn find_production(&self, musical_id: Uuid, name: &str) -> Result<Option<Production>> {
        (**self).find_production(musical_id, name).await
    }

    async fn insert_production(&self, production: &NewProduction) -> Result<Production> {
        (**self).insert_production(production).await
    }

    async fn find_performance(&self, key: &PerformanceKey) -> Result<Option<Performance>> {
        (**self).find_performance(key).await
    }

    async fn insert_performance(&self, performance: &NewPerformance) -> Result<Performance> {
        (**self).insert_performance(performance).await
    }

    async fn add_external_id(
        &self,
        table: CatalogTable,
        row_id: Uuid,
        provider: &str,
        external_id: &str,
    ) -> Result<()> {
        (**self)
            .add_external_id(table, row_id, provider, external_id)
            .await
    }

    async fn count(&self, table: CatalogTable) -> Result<i64> {
        (**self).count(table).await
    }

    async fn delete_all(&self, table: CatalogTable) -> Result<u64> {
        (**self).delete_all(table).await
    }
}
