pub mod canonical;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod reconciler;
pub mod service;
pub mod sources;
pub mod traits;

pub use config::{Environment, ImportConfig};
pub use error::{ImporterError, Result};
pub use service::ImportService;
pub use traits::{EventSource, ImportFilters};

pub use sources::ticketmaster::TicketmasterClient;
