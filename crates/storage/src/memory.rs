use async_trait::async_trait;
use sqlx::types::Json;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{
    CatalogTable, ExternalIds, Musical, NewMusical, NewPerformance, NewProduction, NewVenue,
    Performance, PerformanceKey, Production, Venue,
};
use crate::store::CatalogStore;

#[derive(Default)]
struct Tables {
    venues: Vec<Venue>,
    musicals: Vec<Musical>,
    productions: Vec<Production>,
    performances: Vec<Performance>,
}

/// In-memory catalog with the same natural-key and foreign-key constraints as
/// the Postgres schema. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn venues(&self) -> Vec<Venue> {
        self.lock().venues.clone()
    }

    pub fn musicals(&self) -> Vec<Musical> {
        self.lock().musicals.clone()
    }

    pub fn productions(&self) -> Vec<Production> {
        self.lock().productions.clone()
    }

    pub fn performances(&self) -> Vec<Performance> {
        self.lock().performances.clone()
    }
}

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

fn merge_into(ids: &mut Json<ExternalIds>, provider: &str, external_id: &str) {
    ids.0.insert_if_absent(provider, external_id);
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_venue(&self, name: &str, city: &str, state: &str) -> Result<Option<Venue>> {
        let tables = self.lock();
        Ok(tables
            .venues
            .iter()
            .find(|v| v.name == name && v.city == city && v.state == state)
            .cloned())
    }

    async fn insert_venue(&self, venue: &NewVenue) -> Result<Venue> {
        let mut tables = self.lock();
        if tables
            .venues
            .iter()
            .any(|v| v.name == venue.name && v.city == venue.city && v.state == venue.state)
        {
            return Err(StorageError::UniqueViolation(format!(
                "venues ({}, {}, {})",
                venue.name, venue.city, venue.state
            )));
        }

        let row = Venue {
            venue_id: Uuid::new_v4(),
            name: venue.name.clone(),
            address: venue.address.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            zip_code: venue.zip_code.clone(),
            latitude: venue.latitude,
            longitude: venue.longitude,
            capacity: venue.capacity,
            external_ids: Json(venue.external_ids.clone()),
            created_at: now(),
        };
        tables.venues.push(row.clone());

        debug!("Created venue: {} with id {}", row.name, row.venue_id);
        Ok(row)
    }

    async fn find_musical(&self, name: &str) -> Result<Option<Musical>> {
        let tables = self.lock();
        Ok(tables.musicals.iter().find(|m| m.name == name).cloned())
    }

    async fn insert_musical(&self, musical: &NewMusical) -> Result<Musical> {
        let mut tables = self.lock();
        if tables.musicals.iter().any(|m| m.name == musical.name) {
            return Err(StorageError::UniqueViolation(format!(
                "musicals ({})",
                musical.name
            )));
        }

        let row = Musical {
            musical_id: Uuid::new_v4(),
            name: musical.name.clone(),
            description: musical.description.clone(),
            genre: musical.genre.clone(),
            external_ids: Json(musical.external_ids.clone()),
            created_at: now(),
        };
        tables.musicals.push(row.clone());

        debug!("Created musical: {} with id {}", row.name, row.musical_id);
        Ok(row)
    }

    async fn find_production(&self, musical_id: Uuid, name: &str) -> Result<Option<Production>> {
        let tables = self.lock();
        Ok(tables
            .productions
            .iter()
            .find(|p| p.musical_id == musical_id && p.name == name)
            .cloned())
    }

    async fn insert_production(&self, production: &NewProduction) -> Result<Production> {
        let mut tables = self.lock();
        if !tables
            .musicals
            .iter()
            .any(|m| m.musical_id == production.musical_id)
        {
            return Err(StorageError::ForeignKeyViolation(format!(
                "productions.musical_id {} does not reference an existing musical",
                production.musical_id
            )));
        }
        if tables
            .productions
            .iter()
            .any(|p| p.musical_id == production.musical_id && p.name == production.name)
        {
            return Err(StorageError::UniqueViolation(format!(
                "productions ({}, {})",
                production.musical_id, production.name
            )));
        }

        let row = Production {
            production_id: Uuid::new_v4(),
            musical_id: production.musical_id,
            name: production.name.clone(),
            production_type: production.production_type.as_str().to_string(),
            status: production.status.as_str().to_string(),
            external_ids: Json(production.external_ids.clone()),
            created_at: now(),
        };
        tables.productions.push(row.clone());

        debug!("Created production: {} with id {}", row.name, row.production_id);
        Ok(row)
    }

    async fn find_performance(&self, key: &PerformanceKey) -> Result<Option<Performance>> {
        let tables = self.lock();
        Ok(tables
            .performances
            .iter()
            .find(|p| {
                p.production_id == key.production_id
                    && p.venue_id == key.venue_id
                    && p.performance_date == key.performance_date
                    && p.performance_time == key.performance_time
            })
            .cloned())
    }

    async fn insert_performance(&self, performance: &NewPerformance) -> Result<Performance> {
        let mut tables = self.lock();
        if !tables
            .productions
            .iter()
            .any(|p| p.production_id == performance.production_id)
        {
            return Err(StorageError::ForeignKeyViolation(format!(
                "performances.production_id {} does not reference an existing production",
                performance.production_id
            )));
        }
        if !tables
            .venues
            .iter()
            .any(|v| v.venue_id == performance.venue_id)
        {
            return Err(StorageError::ForeignKeyViolation(format!(
                "performances.venue_id {} does not reference an existing venue",
                performance.venue_id
            )));
        }

        let key = performance.key();
        if tables.performances.iter().any(|p| {
            p.production_id == key.production_id
                && p.venue_id == key.venue_id
                && p.performance_date == key.performance_date
                && p.performance_time == key.performance_time
        }) {
            return Err(StorageError::UniqueViolation(format!(
                "performances ({}, {}, {} {})",
                key.production_id, key.venue_id, key.performance_date, key.performance_time
            )));
        }

        let row = Performance {
            performance_id: Uuid::new_v4(),
            production_id: performance.production_id,
            venue_id: performance.venue_id,
            performance_date: performance.performance_date,
            performance_time: performance.performance_time,
            ticket_url: performance.ticket_url.clone(),
            availability: performance.availability.as_str().to_string(),
            external_ids: Json(performance.external_ids.clone()),
            created_at: now(),
        };
        tables.performances.push(row.clone());

        debug!("Created performance with id {}", row.performance_id);
        Ok(row)
    }

    async fn add_external_id(
        &self,
        table: CatalogTable,
        row_id: Uuid,
        provider: &str,
        external_id: &str,
    ) -> Result<()> {
        let mut tables = self.lock();
        let ids = match table {
            CatalogTable::Venues => tables
                .venues
                .iter_mut()
                .find(|r| r.venue_id == row_id)
                .map(|r| &mut r.external_ids),
            CatalogTable::Musicals => tables
                .musicals
                .iter_mut()
                .find(|r| r.musical_id == row_id)
                .map(|r| &mut r.external_ids),
            CatalogTable::Productions => tables
                .productions
                .iter_mut()
                .find(|r| r.production_id == row_id)
                .map(|r| &mut r.external_ids),
            CatalogTable::Performances => tables
                .performances
                .iter_mut()
                .find(|r| r.performance_id == row_id)
                .map(|r| &mut r.external_ids),
        };

        let ids = ids.ok_or(StorageError::NotFound)?;
        merge_into(ids, provider, external_id);
        Ok(())
    }

    async fn count(&self, table: CatalogTable) -> Result<i64> {
        let tables = self.lock();
        let count = match table {
            CatalogTable::Venues => tables.venues.len(),
            CatalogTable::Musicals => tables.musicals.len(),
            CatalogTable::Productions => tables.productions.len(),
            CatalogTable::Performances => tables.performances.len(),
        };
        Ok(count as i64)
    }

    async fn delete_all(&self, table: CatalogTable) -> Result<u64> {
        let mut tables = self.lock();

        let referenced = match table {
            CatalogTable::Venues => !tables.performances.is_empty(),
            CatalogTable::Musicals => !tables.productions.is_empty(),
            CatalogTable::Productions => !tables.performances.is_empty(),
            CatalogTable::Performances => false,
        };
        if referenced {
            return Err(StorageError::ForeignKeyViolation(format!(
                "{} rows are still referenced",
                table
            )));
        }

        let removed = match table {
            CatalogTable::Venues => std::mem::take(&mut tables.venues).len(),
            CatalogTable::Musicals => std::mem::take(&mut tables.musicals).len(),
            CatalogTable::Productions => std::mem::take(&mut tables.productions).len(),
            CatalogTable::Performances => std::mem::take(&mut tables.performances).len(),
        };
        Ok(removed as u64)
    }
}
