use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::dto::import::SourceStatus;

use crate::error::WebError;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/ticketmaster/status",
    responses(
        (status = 200, description = "Whether the Ticketmaster API is configured and reachable", body = SourceStatus)
    ),
    tag = "ticketmaster"
)]
pub async fn get_status(State(state): State<AppState>) -> Result<Response, WebError> {
    let client = state.importer.source();
    let configured = client.is_configured();
    let connected = configured && client.test_connection().await;

    Ok(Json(SourceStatus::new(configured, connected)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/ticketmaster/events/{event_id}",
    params(
        ("event_id" = String, Path, description = "Ticketmaster event id")
    ),
    responses(
        (status = 200, description = "Event details as returned by Ticketmaster"),
        (status = 502, description = "Ticketmaster request failed"),
        (status = 503, description = "Ticketmaster API key not configured")
    ),
    tag = "ticketmaster"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Response, WebError> {
    let event = state.importer.source().get_event_by_id(&event_id).await?;

    Ok(Json(event).into_response())
}
