pub mod import;
pub mod ticketmaster;

use axum::Router;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/import", import::routes::routes())
        .nest("/api/ticketmaster", ticketmaster::routes::routes())
        .with_state(state)
}
