use anyhow::{Context, Result};
use importer::{Environment, ImportConfig};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub environment: Environment,
    pub ticketmaster_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let import = ImportConfig::from_env();

        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            environment: import.environment,
            ticketmaster_api_key: import.ticketmaster_api_key,
        })
    }
}
