use anyhow::Context;
use axum::Router;
use importer::{ImportService, TicketmasterClient};
use std::sync::Arc;
use std::time::Duration;
use storage::{CatalogStore, Database};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod state;

use config::Config;
use features::{import, ticketmaster};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        import::handlers::import_musicals,
        import::handlers::get_import_stats,
        import::handlers::clear_all_data,
        ticketmaster::handlers::get_status,
        ticketmaster::handlers::get_event,
    ),
    components(
        schemas(
            storage::dto::import::ImportRequest,
            storage::dto::import::ImportResponse,
            storage::dto::import::ImportSummary,
            storage::dto::import::ImportStats,
            storage::dto::import::SourceStatus,
        )
    ),
    tags(
        (name = "import", description = "Catalog import endpoints"),
        (name = "ticketmaster", description = "Event source status and lookups"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting musical catalog API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!(
        "Configuration loaded (environment: {:?})",
        config.environment
    );

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let client = TicketmasterClient::new(config.ticketmaster_api_key.clone())
        .context("Failed to build Ticketmaster client")?;

    let store: Arc<dyn CatalogStore> = Arc::new(db);
    let state = AppState::new(ImportService::new(store, client), config.environment);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(features::router(state))
        .layer(cors);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
