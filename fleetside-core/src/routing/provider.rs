//! Routing provider trait for point-to-point walking directions.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::RoutingProviderError;
use super::result::RawRoute;
use crate::vehicle::Position;

/// Compute walking directions between two positions.
///
/// The provider owns its wire protocol and timeout policy. It reports raw
/// metres and seconds; normalisation happens in [`crate::RouteResolver`].
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use fleetside_core::{Position, RawRoute, RouteProvider, RoutingProviderError};
///
/// struct StraightLine;
///
/// #[async_trait]
/// impl RouteProvider for StraightLine {
///     async fn walking_route(
///         &self,
///         _from: Position,
///         _to: Position,
///     ) -> Result<RawRoute, RoutingProviderError> {
///         Ok(RawRoute::new(1234.5, 125.0))
///     }
/// }
/// ```
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Return the walking route from `from` to `to`.
    ///
    /// Implementations return [`RoutingProviderError::NoRoute`] when the
    /// service finds no route.
    async fn walking_route(
        &self,
        from: Position,
        to: Position,
    ) -> Result<RawRoute, RoutingProviderError>;
}

#[async_trait]
impl<P> RouteProvider for Arc<P>
where
    P: RouteProvider + ?Sized,
{
    async fn walking_route(
        &self,
        from: Position,
        to: Position,
    ) -> Result<RawRoute, RoutingProviderError> {
        (**self).walking_route(from, to).await
    }
}
