//! Walking routes over the OSRM Route API.
//!
//! [`OsrmRouteProvider`] implements [`fleetside_core::RouteProvider`] by
//! asking an OSRM instance for the fastest walking route between two
//! positions and reporting the first route's distance and duration.
//!
//! # Example
//!
//! ```no_run
//! use fleetside_core::{Position, RouteResolver};
//! use fleetside_data::routing::OsrmRouteProvider;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = RouteResolver::new(OsrmRouteProvider::new("http://localhost:5000")?);
//! let route = resolver
//!     .resolve_route(Position::new(48.137, 11.575), Position::new(48.134, 11.576))
//!     .await?;
//! println!("{} / {}", route.distance_label(), route.travel_time_label());
//! # Ok(())
//! # }
//! ```

mod osrm;
mod provider;

pub use osrm::{OsrmRoute, RouteResponse};
pub use provider::{
    DEFAULT_OSRM_URL, DEFAULT_USER_AGENT, OsrmRouteProvider, OsrmRouteProviderConfig,
};
