//! Inputs to and published snapshots of a running session.

use fleetside_core::{
    FetchError, FleetSnapshot, LocationProvider, Position, SelectionCoordinator, SelectionState,
    Vehicle, VehicleId,
};

/// User intent delivered to a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A vehicle marker was tapped.
    TapVehicle(VehicleId),
    /// The reserve/release control was pressed.
    ToggleReservation,
    /// The detail panel was dismissed.
    DismissPanel,
    /// The user asked for the fleet to be fetched again.
    Refresh,
}

/// Availability of the fleet listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FleetStatus {
    /// A fetch is in flight; any previously loaded vehicles are kept.
    #[default]
    Loading,
    /// The latest fetch succeeded.
    Ready,
    /// The latest fetch failed; any previously loaded vehicles are kept.
    Unavailable(FetchError),
}

/// Everything a presentation layer needs to render one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionView {
    /// Availability of the fleet listing.
    pub fleet: FleetStatus,
    /// Vehicles in server order.
    pub vehicles: FleetSnapshot,
    /// The reserved vehicle, if any.
    pub reserved: Option<VehicleId>,
    /// Mean vehicle position, used to centre the map.
    pub centroid: Position,
    /// Selection, route and detail-panel state.
    pub selection: SelectionState,
}

impl SessionView {
    pub(crate) fn capture<L>(fleet: &FleetStatus, coordinator: &SelectionCoordinator<L>) -> Self
    where
        L: LocationProvider,
    {
        let store = coordinator.store();
        Self {
            fleet: fleet.clone(),
            vehicles: store.snapshot().clone(),
            reserved: store.reserved().cloned(),
            centroid: store.centroid(),
            selection: coordinator.state().clone(),
        }
    }

    /// Whether `id` is the reserved vehicle.
    #[must_use]
    pub fn is_reserved(&self, id: &VehicleId) -> bool {
        self.reserved.as_ref() == Some(id)
    }

    /// The vehicle most recently tapped.
    #[must_use]
    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        self.selection
            .selected_vehicle_id()
            .and_then(|id| self.vehicles.get(id))
    }

    /// The vehicle the displayed route and detail panel describe.
    #[must_use]
    pub fn shown_vehicle(&self) -> Option<&Vehicle> {
        self.selection
            .route_vehicle_id()
            .and_then(|id| self.vehicles.get(id))
    }
}
