//! Core domain types for the Fleetside engine.
//!
//! Responsibilities:
//! - Decode fleet listings into typed [`Vehicle`] records.
//! - Hold the current [`FleetSnapshot`] and reservation in a [`FleetStore`].
//! - Normalise walking routes into [`RouteResult`] values.
//! - Drive selection through the [`SelectionCoordinator`] state machine.
//!
//! Boundaries:
//! - No network or runtime code lives here. Collaborators are reached through
//!   the [`FleetSource`], [`RouteProvider`] and [`LocationProvider`] traits.
//! - State mutation is single-threaded; asynchronous results are handed back
//!   to the coordinator together with the generation they were issued under.

#![forbid(unsafe_code)]

pub mod fleet;
pub mod location;
pub mod routing;
pub mod selection;
pub mod store;
pub mod vehicle;

#[doc(hidden)]
pub mod test_support;

pub use fleet::{FetchError, FleetDecodeError, FleetSnapshot, FleetSource};
pub use location::{FixedLocation, LocationProvider};
pub use routing::{
    RawRoute, RouteError, RouteProvider, RouteResolver, RouteResult, RoutingProviderError,
};
pub use selection::{
    DeliveryOutcome, Generation, IgnoreReason, ReservationPolicy, RouteTicket,
    SelectionCoordinator, SelectionPhase, SelectionState, TapOutcome,
};
pub use store::FleetStore;
pub use vehicle::{Position, Vehicle, VehicleId};
