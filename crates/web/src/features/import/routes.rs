use axum::{
    Router,
    routing::{delete, get, post},
};

use super::handlers::{clear_all_data, get_import_stats, import_musicals};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/musicals", post(import_musicals))
        .route("/stats", get(get_import_stats))
        .route("/clear", delete(clear_all_data))
}
