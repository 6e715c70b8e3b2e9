use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::models::{EventSearchResponse, TicketmasterEvent};
use super::params::EventSearchParams;
use crate::{ImporterError, Result};

pub const DEFAULT_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Ticketmaster Discovery API
pub struct TicketmasterClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl TicketmasterClient {
    /// Create a client; a missing or blank key is accepted here and reported
    /// as `NotConfigured` on the first call.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("musicals-importer/0.1")
            .build()
            .map_err(ImporterError::upstream)?;

        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if api_key.is_none() {
            warn!("TICKETMASTER_API_KEY is not set; event imports will be refused");
        }

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            ImporterError::NotConfigured("Ticketmaster API key is required".to_string())
        })
    }

    pub async fn search_events(&self, params: &EventSearchParams) -> Result<EventSearchResponse> {
        let url = format!("{}/events.json", self.base_url);
        self.get_json(&url, Some(params)).await
    }

    /// Event search restricted to the Arts & Theatre segment, Theatre sub-genre.
    pub async fn search_musicals(&self, params: EventSearchParams) -> Result<EventSearchResponse> {
        self.search_events(&params.musicals_only()).await
    }

    pub async fn get_event_by_id(&self, event_id: &str) -> Result<TicketmasterEvent> {
        let url = format!("{}/events/{}.json", self.base_url, event_id);
        self.get_json::<TicketmasterEvent>(&url, None).await
    }

    /// Issues a one-result search; any failure reads as unreachable.
    pub async fn test_connection(&self) -> bool {
        if !self.is_configured() {
            return false;
        }

        let params = EventSearchParams {
            size: Some(1),
            ..EventSearchParams::default()
        };

        match self.search_events(&params).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Ticketmaster connection test failed: {}", e);
                false
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: Option<&EventSearchParams>,
    ) -> Result<T> {
        let api_key = self.api_key()?;

        let mut request = self.client.get(url).query(&[("apikey", api_key)]);
        if let Some(params) = params {
            request = request.query(params);
        }

        debug!("GET {}", url);
        let response = request.send().await.map_err(ImporterError::upstream)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ImporterError::UpstreamUnavailable(format!(
                "Ticketmaster API error ({}): {}",
                status, error_text
            )));
        }

        let body = response.json::<T>().await.map_err(ImporterError::upstream)?;
        info!("Ticketmaster request to {} succeeded", url);

        Ok(body)
    }
}
