//! In-memory holder for the current fleet and reservation.
//!
//! The store performs no I/O and no validation of reservation targets. It is
//! owned by exactly one [`crate::SelectionCoordinator`] per session.

use crate::fleet::FleetSnapshot;
use crate::vehicle::{Position, Vehicle, VehicleId};

/// Current fleet snapshot plus at most one reserved vehicle.
///
/// # Examples
///
/// ```
/// use fleetside_core::{FleetSnapshot, FleetStore, VehicleId};
/// use fleetside_core::test_support::vehicle_at;
///
/// let mut store = FleetStore::default();
/// store.replace_snapshot(FleetSnapshot::new(vec![
///     vehicle_at("a", 48.0, 11.0),
///     vehicle_at("b", 48.2, 11.2),
/// ])?);
/// store.reserve(Some(VehicleId::from("a")));
/// assert!(store.is_reserved(&VehicleId::from("a")));
/// assert!(!store.is_reserved(&VehicleId::from("b")));
/// # Ok::<(), fleetside_core::FleetDecodeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FleetStore {
    snapshot: FleetSnapshot,
    centroid: Position,
    reserved: Option<VehicleId>,
}

impl FleetStore {
    /// Replace the whole snapshot. The reservation is left untouched.
    pub fn replace_snapshot(&mut self, snapshot: FleetSnapshot) {
        self.centroid = snapshot.centroid();
        self.snapshot = snapshot;
    }

    /// Vehicles in server order.
    #[must_use]
    pub fn current_vehicles(&self) -> &[Vehicle] {
        self.snapshot.vehicles()
    }

    /// The current snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &FleetSnapshot {
        &self.snapshot
    }

    /// Look up a vehicle in the current snapshot.
    #[must_use]
    pub fn vehicle(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.snapshot.get(id)
    }

    /// Set the reservation, or clear it with `None`.
    pub fn reserve(&mut self, id: Option<VehicleId>) {
        self.reserved = id;
    }

    /// The reserved vehicle, if any.
    #[must_use]
    pub const fn reserved(&self) -> Option<&VehicleId> {
        self.reserved.as_ref()
    }

    /// Whether `id` is the reserved vehicle.
    #[must_use]
    pub fn is_reserved(&self, id: &VehicleId) -> bool {
        self.reserved.as_ref() == Some(id)
    }

    /// Mean position of all vehicles; `(0, 0)` for an empty fleet.
    ///
    /// Computed once per snapshot.
    #[must_use]
    pub const fn centroid(&self) -> Position {
        self.centroid
    }
}
