use axum::{Router, routing::get};

use super::handlers::{get_event, get_status};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(get_status))
        .route("/events/:event_id", get(get_event))
}
