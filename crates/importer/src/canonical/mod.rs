pub mod mapper;
pub mod models;

pub use mapper::EventMapper;
pub use models::{RawClassification, RawEvent, RawVenue};
