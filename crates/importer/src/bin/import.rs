use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use importer::{
    Environment, ImportConfig, ImportFilters, ImportService, TicketmasterClient,
    traits::DEFAULT_RESULT_LIMIT,
};
use storage::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "musicals-import")]
#[command(about = "Musical catalog importer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(long, env = "TICKETMASTER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Import musical events into the catalog
    Musicals {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Print row counts per catalog table
    Stats,
    /// Delete every catalog row (refused when APP_ENV is production)
    Clear,
    /// Report whether the event source is configured and reachable
    CheckSource,
}

#[derive(clap::Args)]
struct FilterArgs {
    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    state_code: Option<String>,

    #[arg(long)]
    radius: Option<u32>,

    #[arg(long)]
    start_date: Option<NaiveDate>,

    #[arg(long)]
    end_date: Option<NaiveDate>,

    #[arg(long, default_value_t = DEFAULT_RESULT_LIMIT)]
    limit: u32,
}

impl From<FilterArgs> for ImportFilters {
    fn from(args: FilterArgs) -> Self {
        Self {
            city: args.city,
            state_code: args.state_code,
            radius: args.radius,
            start_date: args.start_date,
            end_date: args.end_date,
            limit: args.limit,
            ..Self::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "import={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ImportConfig {
        ticketmaster_api_key: cli.api_key,
        ..ImportConfig::from_env()
    };
    let client = TicketmasterClient::new(config.ticketmaster_api_key.clone())?;

    if let Commands::CheckSource = cli.command {
        return check_source(&client).await;
    }

    tracing::info!("Connecting to database...");
    let db = Database::new(&cli.database_url).await?;
    db.run_migrations().await?;
    let service = ImportService::new(db, client);

    match cli.command {
        Commands::Musicals { filters } => handle_import(&service, filters.into()).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Clear => handle_clear(&service, config.environment).await?,
        Commands::CheckSource => {}
    }

    Ok(())
}

async fn handle_import(
    service: &ImportService<Database, TicketmasterClient>,
    filters: ImportFilters,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Importing musicals (city: {}, state: {}, limit: {})",
        filters.city.as_deref().unwrap_or("any"),
        filters.state_code.as_deref().unwrap_or("any"),
        filters.limit
    );

    let summary = service.import_musical_events(&filters).await;
    for error in &summary.errors {
        tracing::warn!("  {}", error);
    }
    tracing::info!(
        "Summary: {} imported, {} skipped",
        summary.imported,
        summary.skipped
    );

    if summary.imported == 0 && !summary.errors.is_empty() {
        return Err(format!("import failed with {} error(s)", summary.errors.len()).into());
    }
    Ok(())
}

async fn handle_stats(
    service: &ImportService<Database, TicketmasterClient>,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = service.get_import_stats().await?;

    tracing::info!("Catalog contents:");
    tracing::info!("  musicals:     {}", stats.musicals);
    tracing::info!("  productions:  {}", stats.productions);
    tracing::info!("  performances: {}", stats.performances);
    tracing::info!("  venues:       {}", stats.venues);
    tracing::info!("  total:        {}", stats.total());
    Ok(())
}

async fn handle_clear(
    service: &ImportService<Database, TicketmasterClient>,
    environment: Environment,
) -> Result<(), Box<dyn std::error::Error>> {
    if environment.is_production() {
        return Err("Refusing to clear catalog data in production".into());
    }

    service.clear_all_data().await?;
    tracing::info!("All catalog data cleared");
    Ok(())
}

async fn check_source(client: &TicketmasterClient) -> Result<(), Box<dyn std::error::Error>> {
    if !client.is_configured() {
        tracing::warn!("Ticketmaster API key is not set (TICKETMASTER_API_KEY)");
        return Err("event source not configured".into());
    }

    if client.test_connection().await {
        tracing::info!("Ticketmaster API is configured and reachable");
        Ok(())
    } else {
        Err("Ticketmaster API is configured but not reachable".into())
    }
}
