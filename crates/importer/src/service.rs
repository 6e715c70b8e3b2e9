use chrono::{NaiveDate, Utc};
use storage::CatalogStore;
use storage::dto::import::{ImportStats, ImportSummary};
use storage::models::CatalogTable;
use tracing::{error, info, warn};

use crate::canonical::{EventMapper, RawEvent};
use crate::reconciler::Reconciler;
use crate::traits::{EventSource, ImportFilters};
use crate::{ImporterError, Result};

/// Runs batch imports from one event source into one catalog store.
pub struct ImportService<S, E> {
    store: S,
    source: E,
    reference_date: Option<NaiveDate>,
}

impl<S: CatalogStore, E: EventSource> ImportService<S, E> {
    pub fn new(store: S, source: E) -> Self {
        Self {
            store,
            source,
            reference_date: None,
        }
    }

    /// Pins the date production statuses are derived against. Without it
    /// each run uses the current UTC date.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn source(&self) -> &E {
        &self.source
    }

    /// Fetches one batch and reconciles every event independently.
    ///
    /// Never fails as a whole: a failed fetch yields zero counts with a single
    /// error, and a failed event is counted as skipped while the rest of the
    /// batch continues.
    pub async fn import_musical_events(&self, filters: &ImportFilters) -> ImportSummary {
        let mut summary = ImportSummary::default();

        let events = match self.source.search_musical_events(filters).await {
            Ok(events) => events,
            Err(e) => {
                error!("Failed to fetch events from {}: {}", self.source.provider(), e);
                summary.errors.push(format!("Failed to fetch events: {}", e));
                return summary;
            }
        };

        let today = self
            .reference_date
            .unwrap_or_else(|| Utc::now().date_naive());
        info!(
            "Importing {} events from {} (reference date {})",
            events.len(),
            self.source.provider(),
            today
        );

        for event in &events {
            match self.import_event(event, today).await {
                Ok(()) => summary.imported += 1,
                Err(e) => {
                    warn!("Skipping event {}: {}", event.external_id, e);
                    summary.skipped += 1;
                    summary
                        .errors
                        .push(format!("Failed to import event {}: {}", event.external_id, e));
                }
            }
        }

        info!(
            "Import finished: {} imported, {} skipped",
            summary.imported, summary.skipped
        );
        summary
    }

    async fn import_event(&self, event: &RawEvent, today: NaiveDate) -> Result<()> {
        let raw_venue = event
            .venue
            .as_ref()
            .ok_or_else(|| ImporterError::RecordSkipped("missing venue".to_string()))?;

        let provider = self.source.provider();
        let mapper = EventMapper::new(provider, today);
        let reconciler = Reconciler::new(&self.store, provider);

        let venue = reconciler.venue(&mapper.venue(raw_venue)).await?.row;
        let musical = reconciler.musical(&mapper.musical(event)).await?.row;
        let production = reconciler
            .production(&mapper.production(event, musical.musical_id)?)
            .await?
            .row;
        reconciler
            .performance(&mapper.performance(event, production.production_id, venue.venue_id)?)
            .await?;

        Ok(())
    }

    pub async fn get_import_stats(&self) -> Result<ImportStats> {
        Ok(ImportStats {
            musicals: self.count(CatalogTable::Musicals).await?,
            productions: self.count(CatalogTable::Productions).await?,
            performances: self.count(CatalogTable::Performances).await?,
            venues: self.count(CatalogTable::Venues).await?,
        })
    }

    /// Empties the catalog, dependents first.
    ///
    /// Carries no environment policy of its own; callers decide whether a
    /// reset is allowed.
    pub async fn clear_all_data(&self) -> Result<()> {
        for table in CatalogTable::DELETE_ORDER {
            let removed = self
                .store
                .delete_all(table)
                .await
                .map_err(|e| ImporterError::persistence(table, e))?;
            info!("Deleted {} rows from {}", removed, table);
        }
        Ok(())
    }

    async fn count(&self, table: CatalogTable) -> Result<i64> {
        self.store
            .count(table)
            .await
            .map_err(|e| ImporterError::persistence(table, e))
    }
}
