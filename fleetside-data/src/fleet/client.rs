use std::time::Duration;

use async_trait::async_trait;
use fleetside_core::{FetchError, FleetSnapshot, FleetSource};
use log::{debug, warn};
use reqwest::Client;

use crate::ClientBuildError;

/// Vehicle listing endpoint used when none is configured.
pub const DEFAULT_FLEET_ENDPOINT: &str = "https://app.check24.de/cars.json";

/// Default user agent for fleet requests.
pub const DEFAULT_USER_AGENT: &str = "fleetside/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpFleetClient`].
#[derive(Debug, Clone)]
pub struct HttpFleetClientConfig {
    /// Listing endpoint returning a JSON array of vehicles.
    pub endpoint: String,
    /// Connect and overall request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpFleetClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_FLEET_ENDPOINT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpFleetClientConfig {
    /// Create a configuration for the given endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// [`FleetSource`] backed by the HTTP listing endpoint.
#[derive(Debug, Clone)]
pub struct HttpFleetClient {
    client: Client,
    config: HttpFleetClientConfig,
}

impl HttpFleetClient {
    /// Create a client for `endpoint` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(HttpFleetClientConfig::new(endpoint))
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: HttpFleetClientConfig) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// The configured listing endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    async fn fetch(&self) -> Result<FleetSnapshot, FetchError> {
        let url = self.endpoint();
        debug!("fetching fleet listing from {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;
        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;

        decode_listing(url, &body)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error) -> FetchError {
        let message = if error.is_timeout() {
            format!("timed out after {}s", self.config.timeout.as_secs())
        } else {
            error.to_string()
        };
        FetchError::Transport {
            url: self.config.endpoint.clone(),
            status: error.status().map(|status| status.as_u16()),
            message,
        }
    }
}

/// Decode a listing body, treating a blank body as [`FetchError::Empty`].
fn decode_listing(url: &str, body: &[u8]) -> Result<FleetSnapshot, FetchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FetchError::Empty {
            url: url.to_owned(),
        });
    }
    Ok(FleetSnapshot::from_json_slice(body)?)
}

#[async_trait]
impl FleetSource for HttpFleetClient {
    async fn fetch_fleet(&self) -> Result<FleetSnapshot, FetchError> {
        let result = self.fetch().await;
        match &result {
            Ok(snapshot) => debug!("fetched {} vehicles", snapshot.len()),
            Err(err) => warn!("fleet fetch failed: {err}"),
        }
        result
    }
}
