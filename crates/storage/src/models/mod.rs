mod classification;
mod external_ids;
mod musical;
mod performance;
mod production;
mod table;
mod venue;

pub use classification::{Availability, ProductionStatus, ProductionType};
pub use external_ids::ExternalIds;
pub use musical::{Musical, NewMusical};
pub use performance::{NewPerformance, Performance, PerformanceKey};
pub use production::{NewProduction, Production};
pub use table::CatalogTable;
pub use venue::{NewVenue, Venue};
