pub mod catalog;
pub mod musical;
pub mod performance;
pub mod production;
pub mod venue;

use async_trait::async_trait;
use uuid::Uuid;

use crate::Database;
use crate::error::Result;
use crate::models::{
    CatalogTable, Musical, NewMusical, NewPerformance, NewProduction, NewVenue, Performance,
    PerformanceKey, Production, Venue,
};
use crate::store::CatalogStore;

pub use catalog::CatalogRepository;
pub use musical::MusicalRepository;
pub use performance::PerformanceRepository;
pub use production::ProductionRepository;
pub use venue::VenueRepository;

#[async_trait]
impl CatalogStore for Database {
    async fn find_venue(&self, name: &str, city: &str, state: &str) -> Result<Option<Venue>> {
        VenueRepository::new(self.pool())
            .find_by_natural_key(name, city, state)
            .await
    }

    async fn insert_venue(&self, venue: &NewVenue) -> Result<Venue> {
        VenueRepository::new(self.pool()).create(venue).await
    }

    async fn find_musical(&self, name: &str) -> Result<Option<Musical>> {
        MusicalRepository::new(self.pool()).find_by_name(name).await
    }

    async fn insert_musical(&self, musical: &NewMusical) -> Result<Musical> {
        MusicalRepository::new(self.pool()).create(musical).await
    }

    async fn find_production(&self, musical_id: Uuid, name: &str) -> Result<Option<Production>> {
        ProductionRepository::new(self.pool())
            .find_by_natural_key(musical_id, name)
            .await
    }

    async fn insert_production(&self, production: &NewProduction) -> Result<Production> {
        ProductionRepository::new(self.pool()).create(production).await
    }

    async fn find_performance(&self, key: &PerformanceKey) -> Result<Option<Performance>> {
        PerformanceRepository::new(self.pool())
            .find_by_natural_key(key)
            .await
    }

    async fn insert_performance(&self, performance: &NewPerformance) -> Result<Performance> {
        PerformanceRepository::new(self.pool())
            .create(performance)
            .await
    }

    async fn add_external_id(
        &self,
        table: CatalogTable,
        row_id: Uuid,
        provider: &str,
        external_id: &str,
    ) -> Result<()> {
        CatalogRepository::new(self.pool())
            .add_external_id(table, row_id, provider, external_id)
            .await
    }

    async fn count(&self, table: CatalogTable) -> Result<i64> {
        CatalogRepository::new(self.pool()).count(table).await
    }

    async fn delete_all(&self, table: CatalogTable) -> Result<u64> {
        CatalogRepository::new(self.pool()).delete_all(table).await
    }
}
