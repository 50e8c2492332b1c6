//! Walking routes from the user to a vehicle.
//!
//! A [`RouteProvider`] answers point-to-point walking requests with raw metres
//! and seconds. The [`RouteResolver`] normalises that answer into a
//! [`RouteResult`] (kilometres rounded to two decimals, whole minutes
//! truncated) and collapses every provider failure into
//! [`RouteError::Unavailable`].

mod error;
mod provider;
mod resolver;
mod result;

pub use error::{RouteError, RoutingProviderError};
pub use provider::RouteProvider;
pub use resolver::RouteResolver;
pub use result::{RawRoute, RouteResult};
