//! Facade crate for the Fleetside engine.
//!
//! This crate re-exports the core domain types and, behind the `http` feature,
//! the HTTP adapters and the session runtime.

#![forbid(unsafe_code)]

pub use fleetside_core::{
    DeliveryOutcome, FetchError, FixedLocation, FleetDecodeError, FleetSnapshot, FleetSource,
    FleetStore, Generation, IgnoreReason, LocationProvider, Position, RawRoute, ReservationPolicy,
    RouteError, RouteProvider, RouteResolver, RouteResult, RouteTicket, RoutingProviderError,
    SelectionCoordinator, SelectionPhase, SelectionState, TapOutcome, Vehicle, VehicleId,
};

#[cfg(feature = "http")]
pub use fleetside_data::{
    ClientBuildError,
    fleet::{HttpFleetClient, HttpFleetClientConfig},
    location::{LocationPublisher, WatchLocationProvider, location_channel},
    routing::{OsrmRouteProvider, OsrmRouteProviderConfig},
    session::{
        FleetSession, FleetStatus, SessionClosed, SessionCollaborators, SessionConfig,
        SessionEvent, SessionHandle, SessionView,
    },
};
