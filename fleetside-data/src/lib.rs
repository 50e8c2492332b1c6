//! Adapters and runtime for the Fleetside engine.
//!
//! Responsibilities:
//! - Fetch the fleet listing over HTTP ([`fleet::HttpFleetClient`]).
//! - Resolve walking routes through OSRM ([`routing::OsrmRouteProvider`]).
//! - Feed platform location fixes to the engine ([`location`]).
//! - Run the single-writer session loop ([`session::FleetSession`]).
//!
//! Boundaries:
//! - Domain rules live in `fleetside-core`; this crate only moves data.
//! - Network I/O runs on background tasks; results are marshalled back onto
//!   the session task, which is the only place state is mutated.

#![forbid(unsafe_code)]

mod error;
pub mod fleet;
pub mod location;
pub mod routing;
pub mod session;

#[doc(hidden)]
pub mod test_support;

pub use error::ClientBuildError;
