//! HTTP-based [`RouteProvider`] using OSRM's Route API.

use std::time::Duration;

use async_trait::async_trait;
use fleetside_core::{Position, RawRoute, RouteProvider, RoutingProviderError};
use log::debug;
use reqwest::{Client, StatusCode};

use super::osrm::RouteResponse;
use crate::ClientBuildError;

/// OSRM instance used when none is configured.
pub const DEFAULT_OSRM_URL: &str = "http://localhost:5000";

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "fleetside-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Query options: only the summary of the single best route is needed.
const ROUTE_QUERY: &str = "overview=false&alternatives=false&steps=false";

/// Configuration for [`OsrmRouteProvider`].
#[derive(Debug, Clone)]
pub struct OsrmRouteProviderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OsrmRouteProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OSRM_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OsrmRouteProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
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

/// Walking route provider backed by the OSRM Route API.
#[derive(Debug, Clone)]
pub struct OsrmRouteProvider {
    client: Client,
    config: OsrmRouteProviderConfig,
}

impl OsrmRouteProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(OsrmRouteProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: OsrmRouteProviderConfig) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// Build the OSRM Route API URL for a walk from `from` to `to`.
    ///
    /// The URL format is: `{base_url}/route/v1/walking/{lon},{lat};{lon},{lat}`.
    fn build_route_url(&self, from: Position, to: Position) -> String {
        format!(
            "{}/route/v1/walking/{},{};{},{}?{ROUTE_QUERY}",
            self.config.base_url.trim_end_matches('/'),
            from.longitude,
            from.latitude,
            to.longitude,
            to.latitude
        )
    }

    async fn fetch_route(
        &self,
        from: Position,
        to: Position,
    ) -> Result<RawRoute, RoutingProviderError> {
        let url = self.build_route_url(from, to);
        debug!("requesting walking route {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        // OSRM reports routing failures such as `NoRoute` with a 400 status and
        // a JSON body; prefer the body's code whenever it parses.
        match serde_json::from_slice::<RouteResponse>(&body) {
            Ok(parsed) if status.is_success() || !parsed.is_ok() => {
                Self::convert_response(parsed)
            }
            Ok(_) => Err(status_error(&url, status)),
            Err(_) if !status.is_success() => Err(status_error(&url, status)),
            Err(err) => Err(RoutingProviderError::Parse {
                message: err.to_string(),
            }),
        }
    }

    /// Convert a reqwest error to a `RoutingProviderError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RoutingProviderError {
        if error.is_timeout() {
            return RoutingProviderError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RoutingProviderError::HttpStatus {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        RoutingProviderError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Convert an OSRM response to the first route's distance and duration.
    fn convert_response(response: RouteResponse) -> Result<RawRoute, RoutingProviderError> {
        if response.is_unroutable() {
            return Err(RoutingProviderError::NoRoute);
        }
        if !response.is_ok() {
            return Err(RoutingProviderError::Service {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }

        let route = response
            .routes
            .into_iter()
            .flatten()
            .next()
            .ok_or(RoutingProviderError::NoRoute)?;
        Ok(RawRoute::new(route.distance, route.duration))
    }
}

fn status_error(url: &str, status: StatusCode) -> RoutingProviderError {
    RoutingProviderError::HttpStatus {
        url: url.to_owned(),
        status: status.as_u16(),
        message: status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned(),
    }
}

#[async_trait]
impl RouteProvider for OsrmRouteProvider {
    async fn walking_route(
        &self,
        from: Position,
        to: Position,
    ) -> Result<RawRoute, RoutingProviderError> {
        self.fetch_route(from, to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::OsrmRoute;
    use rstest::{fixture, rstest};

    #[fixture]
    fn provider() -> OsrmRouteProvider {
        OsrmRouteProvider::new("http://osrm.example.com").expect("provider should build")
    }

    #[rstest]
    fn build_route_url_orders_longitude_first(provider: OsrmRouteProvider) {
        let url = provider.build_route_url(
            Position::new(48.137_154, 11.576_124),
            Position::new(48.134_557, 11.576_921),
        );

        assert_eq!(
            url,
            "http://osrm.example.com/route/v1/walking/11.576124,48.137154;11.576921,48.134557\
             ?overview=false&alternatives=false&steps=false"
        );
    }

    #[rstest]
    fn build_route_url_strips_trailing_slash() {
        let provider =
            OsrmRouteProvider::new("http://osrm.example.com/").expect("provider should build");

        let url = provider.build_route_url(Position::ORIGIN, Position::ORIGIN);

        assert!(url.starts_with("http://osrm.example.com/route/"));
        assert!(!url.contains("//route"));
    }

    #[rstest]
    fn convert_response_takes_first_route() {
        let response = RouteResponse {
            code: "Ok".to_owned(),
            message: None,
            routes: Some(vec![
                OsrmRoute {
                    distance: 1234.5,
                    duration: 125.0,
                },
                OsrmRoute {
                    distance: 9.0,
                    duration: 9.0,
                },
            ]),
        };

        let route = OsrmRouteProvider::convert_response(response).expect("should convert");

        assert_eq!(route, RawRoute::new(1234.5, 125.0));
    }

    #[rstest]
    #[case(Some(Vec::new()))]
    #[case(None)]
    fn convert_response_without_routes_is_no_route(#[case] routes: Option<Vec<OsrmRoute>>) {
        let response = RouteResponse {
            code: "Ok".to_owned(),
            message: None,
            routes,
        };

        let err = OsrmRouteProvider::convert_response(response).expect_err("should fail");

        assert_eq!(err, RoutingProviderError::NoRoute);
    }

    #[rstest]
    #[case("NoRoute")]
    #[case("NoSegment")]
    fn convert_response_maps_unroutable_codes(#[case] code: &str) {
        let response = RouteResponse {
            code: code.to_owned(),
            message: Some("Impossible route between points".to_owned()),
            routes: None,
        };

        let err = OsrmRouteProvider::convert_response(response).expect_err("should fail");

        assert_eq!(err, RoutingProviderError::NoRoute);
    }

    #[rstest]
    fn convert_response_handles_service_error() {
        let response = RouteResponse {
            code: "InvalidQuery".to_owned(),
            message: Some("Query string malformed".to_owned()),
            routes: None,
        };

        let err = OsrmRouteProvider::convert_response(response).expect_err("should fail");

        assert_eq!(
            err,
            RoutingProviderError::Service {
                code: "InvalidQuery".to_owned(),
                message: "Query string malformed".to_owned(),
            }
        );
    }

    #[rstest]
    fn status_error_uses_reason_phrase() {
        let err = status_error("http://osrm.example.com", StatusCode::BAD_GATEWAY);

        assert_eq!(
            err,
            RoutingProviderError::HttpStatus {
                url: "http://osrm.example.com".to_owned(),
                status: 502,
                message: "Bad Gateway".to_owned(),
            }
        );
    }
}
