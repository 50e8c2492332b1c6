//! Vehicle selection, route gating and reservation toggles.
//!
//! The [`SelectionCoordinator`] owns the [`crate::FleetStore`] and the
//! [`SelectionState`]. It is driven by discrete events (taps, route
//! deliveries, panel dismissal, reservation toggles) on a single logical
//! thread and never blocks.

mod coordinator;
mod state;

pub use coordinator::{
    DeliveryOutcome, Generation, IgnoreReason, ReservationPolicy, RouteTicket,
    SelectionCoordinator, TapOutcome,
};
pub use state::{SelectionPhase, SelectionState};
