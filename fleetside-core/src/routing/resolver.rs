//! Normalise provider answers into [`RouteResult`] values.

use log::{debug, warn};

use super::error::RouteError;
use super::provider::RouteProvider;
use super::result::RouteResult;
use crate::vehicle::Position;

/// Resolve walking routes through a [`RouteProvider`].
///
/// The resolver is cheap to clone when the provider is, so a copy can be moved
/// into each background task.
#[derive(Debug, Clone)]
pub struct RouteResolver<P> {
    provider: P,
}

impl<P> RouteResolver<P>
where
    P: RouteProvider,
{
    /// Wrap a routing provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Borrow the underlying provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve the walking route from `from` to `to`.
    ///
    /// Provider failures, "no route" answers and invalid raw values all become
    /// [`RouteError::Unavailable`].
    pub async fn resolve_route(
        &self,
        from: Position,
        to: Position,
    ) -> Result<RouteResult, RouteError> {
        debug!("resolving walking route from {from} to {to}");
        let outcome = match self.provider.walking_route(from, to).await {
            Ok(raw) => RouteResult::from_raw(raw),
            Err(err) => Err(err),
        };
        outcome.map_err(|source| {
            warn!("walking route from {from} to {to} unavailable: {source}");
            RouteError::Unavailable { source }
        })
    }
}
