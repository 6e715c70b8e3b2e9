use storage::CatalogStore;
use storage::error::StorageError;
use storage::models::{
    CatalogTable, ExternalIds, Musical, NewMusical, NewPerformance, NewProduction, NewVenue,
    Performance, Production, Venue,
};
use tracing::debug;
use uuid::Uuid;

use crate::{ImporterError, Result};

/// A row resolved by natural key, and whether this call inserted it.
#[derive(Debug, Clone)]
pub struct Reconciled<T> {
    pub row: T,
    pub created: bool,
}

impl<T> Reconciled<T> {
    fn found(row: T) -> Self {
        Self {
            row,
            created: false,
        }
    }

    fn created(row: T) -> Self {
        Self { row, created: true }
    }
}

/// Find-or-create for the four catalog entities.
///
/// Callers must resolve a venue and a musical before the production that
/// references the musical, and both before the performance.
pub struct Reconciler<'a, S: CatalogStore + ?Sized> {
    store: &'a S,
    provider: &'a str,
}

impl<'a, S: CatalogStore + ?Sized> Reconciler<'a, S> {
    pub fn new(store: &'a S, provider: &'a str) -> Self {
        Self { store, provider }
    }

    pub async fn venue(&self, fields: &NewVenue) -> Result<Reconciled<Venue>> {
        let table = CatalogTable::Venues;
        let lookup = || self.store.find_venue(&fields.name, &fields.city, &fields.state);

        let row = match lookup().await.map_err(|e| persistence(table, e))? {
            Some(existing) => existing,
            None => match self.store.insert_venue(fields).await {
                Ok(row) => {
                    debug!("Created venue '{}' ({})", row.name, row.venue_id);
                    return Ok(Reconciled::created(row));
                }
                Err(e) if e.is_unique_violation() => {
                    let row = refetch(lookup, table, e).await?;
                    debug!("Venue '{}' was created concurrently, reusing it", row.name);
                    row
                }
                Err(e) => return Err(persistence(table, e)),
            },
        };

        self.link_provider_id(table, row.venue_id, &row.external_ids, &fields.external_ids)
            .await?;
        Ok(Reconciled::found(row))
    }

    pub async fn musical(&self, fields: &NewMusical) -> Result<Reconciled<Musical>> {
        let table = CatalogTable::Musicals;
        let lookup = || self.store.find_musical(&fields.name);

        let row = match lookup().await.map_err(|e| persistence(table, e))? {
            Some(existing) => existing,
            None => match self.store.insert_musical(fields).await {
                Ok(row) => {
                    debug!("Created musical '{}' ({})", row.name, row.musical_id);
                    return Ok(Reconciled::created(row));
                }
                Err(e) if e.is_unique_violation() => {
                    let row = refetch(lookup, table, e).await?;
                    debug!("Musical '{}' was created concurrently, reusing it", row.name);
                    row
                }
                Err(e) => return Err(persistence(table, e)),
            },
        };

        self.link_provider_id(table, row.musical_id, &row.external_ids, &fields.external_ids)
            .await?;
        Ok(Reconciled::found(row))
    }

    pub async fn production(&self, fields: &NewProduction) -> Result<Reconciled<Production>> {
        let table = CatalogTable::Productions;
        let lookup = || self.store.find_production(fields.musical_id, &fields.name);

        let row = match lookup().await.map_err(|e| persistence(table, e))? {
            Some(existing) => existing,
            None => match self.store.insert_production(fields).await {
                Ok(row) => {
                    debug!("Created production '{}' ({})", row.name, row.production_id);
                    return Ok(Reconciled::created(row));
                }
                Err(e) if e.is_unique_violation() => {
                    let row = refetch(lookup, table, e).await?;
                    debug!("Production '{}' was created concurrently, reusing it", row.name);
                    row
                }
                Err(e) => return Err(persistence(table, e)),
            },
        };

        let existing = &row.external_ids;
        self.link_provider_id(table, row.production_id, existing, &fields.external_ids)
            .await?;
        Ok(Reconciled::found(row))
    }

    pub async fn performance(&self, fields: &NewPerformance) -> Result<Reconciled<Performance>> {
        let table = CatalogTable::Performances;
        let key = fields.key();
        let lookup = || self.store.find_performance(&key);

        let row = match lookup().await.map_err(|e| persistence(table, e))? {
            Some(existing) => existing,
            None => match self.store.insert_performance(fields).await {
                Ok(row) => {
                    debug!(
                        "Created performance {} on {} at {}",
                        row.performance_id, row.performance_date, row.performance_time
                    );
                    return Ok(Reconciled::created(row));
                }
                Err(e) if e.is_unique_violation() => refetch(lookup, table, e).await?,
                Err(e) => return Err(persistence(table, e)),
            },
        };

        let existing = &row.external_ids;
        self.link_provider_id(table, row.performance_id, existing, &fields.external_ids)
            .await?;
        Ok(Reconciled::found(row))
    }

    /// Records this provider's id on an existing row that has none yet.
    async fn link_provider_id(
        &self,
        table: CatalogTable,
        row_id: Uuid,
        existing: &ExternalIds,
        incoming: &ExternalIds,
    ) -> Result<()> {
        if existing.contains_provider(self.provider) {
            return Ok(());
        }
        let Some(external_id) = incoming.get(self.provider) else {
            return Ok(());
        };

        self.store
            .add_external_id(table, row_id, self.provider, external_id)
            .await
            .map_err(|e| persistence(table, e))?;

        debug!(
            "Linked {} {} to {} id {}",
            table.entity_name(),
            row_id,
            self.provider,
            external_id
        );
        Ok(())
    }
}

/// Re-runs a natural-key lookup after an insert lost a uniqueness race. A
/// miss here reports the original insert error.
async fn refetch<T, F, Fut>(lookup: F, table: CatalogTable, insert_error: StorageError) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = storage::Result<Option<T>>>,
{
    lookup()
        .await
        .map_err(|e| persistence(table, e))?
        .ok_or_else(|| persistence(table, insert_error))
}

fn persistence(table: CatalogTable, error: StorageError) -> ImporterError {
    ImporterError::persistence(table, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime};
    use std::sync::atomic::{AtomicBool, Ordering};
    use storage::MemoryStore;
    use storage::models::{Availability, PerformanceKey, ProductionStatus, ProductionType};

    const PROVIDER: &str = "ticketmaster";

    fn venue_fields() -> NewVenue {
        NewVenue {
            name: "Pantages Theatre".to_string(),
            address: "6233 Hollywood Blvd".to_string(),
            city: "Los Angeles".to_string(),
            state: "CA".to_string(),
            zip_code: "90028".to_string(),
            latitude: None,
            longitude: None,
            capacity: None,
            external_ids: ExternalIds::single(PROVIDER, "KovZpa2gne"),
        }
    }

    fn musical_fields(name: &str) -> NewMusical {
        NewMusical {
            name: name.to_string(),
            description: None,
            genre: "Musical".to_string(),
            external_ids: ExternalIds::single(PROVIDER, "evt-1"),
        }
    }

    #[tokio::test]
    async fn test_second_lookup_returns_existing_row() {
        let store = MemoryStore::new();
        let reconciler = Reconciler::new(&store, PROVIDER);

        let first = reconciler.venue(&venue_fields()).await.unwrap();
        let second = reconciler.venue(&venue_fields()).await.unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.row.venue_id, second.row.venue_id);
        assert_eq!(store.count(CatalogTable::Venues).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_existing_row_gains_missing_provider_id() {
        let store = MemoryStore::new();
        store
            .insert_musical(&NewMusical {
                external_ids: ExternalIds::single("seatgeek", "sg-77"),
                ..musical_fields("Hadestown")
            })
            .await
            .unwrap();

        let reconciled = Reconciler::new(&store, PROVIDER)
            .musical(&musical_fields("Hadestown"))
            .await
            .unwrap();
        assert!(!reconciled.created);

        let stored = store.find_musical("Hadestown").await.unwrap().unwrap();
        assert_eq!(stored.external_ids.0.get("seatgeek"), Some("sg-77"));
        assert_eq!(stored.external_ids.0.get(PROVIDER), Some("evt-1"));
    }

    #[tokio::test]
    async fn test_full_chain_in_dependency_order() {
        let store = MemoryStore::new();
        let reconciler = Reconciler::new(&store, PROVIDER);

        let venue = reconciler.venue(&venue_fields()).await.unwrap().row;
        let musical = reconciler.musical(&musical_fields("Six")).await.unwrap().row;
        let production = reconciler
            .production(&NewProduction {
                musical_id: musical.musical_id,
                name: "Six - Tour".to_string(),
                production_type: ProductionType::Touring,
                status: ProductionStatus::Upcoming,
                external_ids: ExternalIds::single(PROVIDER, "evt-1"),
            })
            .await
            .unwrap()
            .row;
        let performance = reconciler
            .performance(&NewPerformance {
                production_id: production.production_id,
                venue_id: venue.venue_id,
                performance_date: NaiveDate::from_ymd_opt(2024, 9, 14).unwrap(),
                performance_time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
                ticket_url: None,
                availability: Availability::Limited,
                external_ids: ExternalIds::single(PROVIDER, "evt-1"),
            })
            .await
            .unwrap();

        assert!(performance.created);
        assert_eq!(performance.row.availability, "limited");
        assert_eq!(performance.row.production_id, production.production_id);
    }

    #[tokio::test]
    async fn test_performance_with_unknown_production_is_a_persistence_error() {
        let store = MemoryStore::new();
        let reconciler = Reconciler::new(&store, PROVIDER);
        let venue = reconciler.venue(&venue_fields()).await.unwrap().row;

        let err = reconciler
            .performance(&NewPerformance {
                production_id: Uuid::new_v4(),
                venue_id: venue.venue_id,
                performance_date: NaiveDate::from_ymd_opt(2024, 9, 14).unwrap(),
                performance_time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
                ticket_url: None,
                availability: Availability::Available,
                external_ids: ExternalIds::new(),
            })
            .await
            .unwrap_err();

        match err {
            ImporterError::Persistence { entity, .. } => {
                assert_eq!(entity, CatalogTable::Performances)
            }
            other => panic!("expected persistence error, got {other:?}"),
        }
        assert_eq!(store.count(CatalogTable::Performances).await.unwrap(), 0);
    }

    /// Misses the first musical lookup after another writer has already
    /// inserted the row, as a concurrent import would.
    struct RacingStore {
        inner: MemoryStore,
        raced: AtomicBool,
    }

    #[async_trait]
    impl CatalogStore for RacingStore {
        async fn find_venue(
            &self,
            n: &str,
            c: &str,
            s: &str,
        ) -> storage::Result<Option<Venue>> {
            self.inner.find_venue(n, c, s).await
        }
        async fn insert_venue(&self, v: &NewVenue) -> storage::Result<Venue> {
            self.inner.insert_venue(v).await
        }
        async fn find_musical(&self, name: &str) -> storage::Result<Option<Musical>> {
            if !self.raced.swap(true, Ordering::SeqCst) {
                self.inner
                    .insert_musical(&NewMusical {
                        external_ids: ExternalIds::single("seatgeek", "sg-1"),
                        ..musical_fields(name)
                    })
                    .await?;
                return Ok(None);
            }
            self.inner.find_musical(name).await
        }
        async fn insert_musical(&self, m: &NewMusical) -> storage::Result<Musical> {
            self.inner.insert_musical(m).await
        }
        async fn find_production(
            &self,
            id: Uuid,
            n: &str,
        ) -> storage::Result<Option<Production>> {
            self.inner.find_production(id, n).await
        }
        async fn insert_production(&self, p: &NewProduction) -> storage::Result<Production> {
            self.inner.insert_production(p).await
        }
        async fn find_performance(
            &self,
            k: &PerformanceKey,
        ) -> storage::Result<Option<Performance>> {
            self.inner.find_performance(k).await
        }
        async fn insert_performance(&self, p: &NewPerformance) -> storage::Result<Performance> {
            self.inner.insert_performance(p).await
        }
        async fn add_external_id(
            &self,
            t: CatalogTable,
            id: Uuid,
            p: &str,
            e: &str,
        ) -> storage::Result<()> {
            self.inner.add_external_id(t, id, p, e).await
        }
        async fn count(&self, t: CatalogTable) -> storage::Result<i64> {
            self.inner.count(t).await
        }
        async fn delete_all(&self, t: CatalogTable) -> storage::Result<u64> {
            self.inner.delete_all(t).await
        }
    }

    #[tokio::test]
    async fn test_unique_violation_on_insert_refetches_row() {
        let store = RacingStore {
            inner: MemoryStore::new(),
            raced: AtomicBool::new(false),
        };

        let reconciled = Reconciler::new(&store, PROVIDER)
            .musical(&musical_fields("Wicked"))
            .await
            .unwrap();

        assert!(!reconciled.created);
        assert_eq!(reconciled.row.name, "Wicked");
        assert_eq!(store.count(CatalogTable::Musicals).await.unwrap(), 1);

        let stored = store.inner.find_musical("Wicked").await.unwrap().unwrap();
        assert_eq!(stored.external_ids.0.get("seatgeek"), Some("sg-1"));
        assert_eq!(stored.external_ids.0.get(PROVIDER), Some("evt-1"));
    }
}
