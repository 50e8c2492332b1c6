use thiserror::Error;

/// Failures reported by a [`crate::RouteProvider`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingProviderError {
    /// The routing service could not be reached.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Description of the failure.
        message: String,
    },
    /// The routing service did not answer in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The routing service answered with a failure status.
    #[error("routing service at {url} returned HTTP {status}: {message}")]
    HttpStatus {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Reason phrase or body excerpt.
        message: String,
    },
    /// The routing service reported an error code.
    #[error("routing service error {code}: {message}")]
    Service {
        /// Service-specific error code.
        code: String,
        /// Service-supplied message.
        message: String,
    },
    /// The response body could not be parsed.
    #[error("failed to parse routing response: {message}")]
    Parse {
        /// Parser message.
        message: String,
    },
    /// No walking route connects the two positions.
    #[error("no walking route found")]
    NoRoute,
    /// The provider returned a negative or non-finite distance or duration.
    #[error("routing service returned an invalid route: {message}")]
    InvalidRoute {
        /// Which value was rejected.
        message: String,
    },
}

/// Failure of [`crate::RouteResolver::resolve_route`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// No route could be produced; the cause is kept for diagnostics.
    #[error("walking route unavailable: {source}")]
    Unavailable {
        /// Underlying provider failure.
        #[source]
        source: RoutingProviderError,
    },
}
