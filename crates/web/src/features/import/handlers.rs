use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use importer::{Environment, ImportFilters};
use storage::dto::import::{ImportRequest, ImportResponse, ImportStats};
use validator::Validate;

use crate::error::{ApiResult, WebError};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/import/musicals",
    request_body = ImportRequest,
    responses(
        (status = 200, description = "Import finished; per-event failures are listed in errors", body = ImportResponse),
        (status = 400, description = "Invalid request")
    ),
    tag = "import"
)]
pub async fn import_musicals(
    State(state): State<AppState>,
    Json(payload): Json<ImportRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let filters = ImportFilters::from(payload);
    let summary = state.importer.import_musical_events(&filters).await;

    Ok(Json(ImportResponse::from(summary)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/import/stats",
    responses(
        (status = 200, description = "Row counts per catalog table", body = ImportStats)
    ),
    tag = "import"
)]
pub async fn get_import_stats(State(state): State<AppState>) -> Result<Response, WebError> {
    let stats = state.importer.get_import_stats().await?;

    Ok(Json(stats).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/import/clear",
    responses(
        (status = 200, description = "All catalog data cleared"),
        (status = 403, description = "Refused in production")
    ),
    tag = "import"
)]
pub async fn clear_all_data(State(state): State<AppState>) -> Result<Response, WebError> {
    ensure_reset_allowed(state.environment)?;

    state.importer.clear_all_data().await?;
    tracing::info!("Catalog cleared through the API");

    Ok(Json(serde_json::json!({
        "message": "All imported data cleared successfully"
    }))
    .into_response())
}

fn ensure_reset_allowed(environment: Environment) -> ApiResult<()> {
    if environment.is_production() {
        tracing::warn!("Rejected catalog reset in production");
        return Err(WebError::Forbidden(
            "Clear operation not allowed in production".to_string(),
        ));
    }
    Ok(())
}
