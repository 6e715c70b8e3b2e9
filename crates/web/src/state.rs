use importer::{Environment, ImportService, TicketmasterClient};
use std::sync::Arc;
use storage::CatalogStore;

pub type CatalogImportService = ImportService<Arc<dyn CatalogStore>, TicketmasterClient>;

#[derive(Clone)]
pub struct AppState {
    pub importer: Arc<CatalogImportService>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(importer: CatalogImportService, environment: Environment) -> Self {
        Self {
            importer: Arc::new(importer),
            environment,
        }
    }
}
