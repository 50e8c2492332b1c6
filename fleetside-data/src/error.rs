//! Construction errors shared by the HTTP adapters.

use thiserror::Error;

/// Failure to build an HTTP-backed adapter.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The HTTP client rejected its configuration.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
