//! The selection state machine.

use log::{debug, warn};

use super::state::SelectionState;
use crate::fleet::FleetSnapshot;
use crate::location::LocationProvider;
use crate::routing::{RouteError, RouteResult};
use crate::store::FleetStore;
use crate::vehicle::{Position, VehicleId};

/// Monotonically increasing tag identifying one route resolution.
///
/// A result is applied only when its generation equals the coordinator's
/// current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// The generation that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Everything needed to run one route resolution off the mutation thread.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTicket {
    /// Generation the result must be delivered under.
    pub generation: Generation,
    /// Vehicle being resolved.
    pub vehicle_id: VehicleId,
    /// The user's position when the vehicle was tapped.
    pub from: Position,
    /// The vehicle's position.
    pub to: Position,
}

/// Why a tap did not change the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The user's position is unknown.
    NoLocation,
    /// The vehicle is not in the current fleet snapshot.
    UnknownVehicle,
}

/// Result of [`SelectionCoordinator::tap_vehicle`].
#[derive(Debug, Clone, PartialEq)]
pub enum TapOutcome {
    /// A resolution must be started for the ticket.
    Resolve(RouteTicket),
    /// The tapped vehicle was already selected; the selection is now empty.
    Deselected,
    /// Nothing changed.
    Ignored(IgnoreReason),
}

/// Result of [`SelectionCoordinator::deliver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The route was stored and the detail panel shown.
    Applied,
    /// The resolution failed and the selection returned to idle.
    Collapsed,
    /// The result was stale and was ignored.
    Discarded,
}

/// Initial reservation applied when a fleet snapshot is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReservationPolicy {
    /// Leave the reservation untouched.
    #[default]
    None,
    /// Reserve the first listed vehicle when nothing is reserved yet.
    FirstVehicle,
}

/// Ties vehicle taps to route resolution and detail-panel visibility, and
/// mediates reservation toggles.
///
/// The coordinator performs no I/O. A tap that needs a route returns a
/// [`RouteTicket`]; the caller resolves it elsewhere and hands the result back
/// through [`SelectionCoordinator::deliver`]. Superseded results are discarded
/// by comparing generations.
///
/// # Examples
///
/// ```
/// use fleetside_core::{
///     DeliveryOutcome, FixedLocation, FleetSnapshot, Position, RawRoute, RouteResult,
///     SelectionCoordinator, TapOutcome,
/// };
/// use fleetside_core::test_support::vehicle_at;
///
/// let mut coordinator = SelectionCoordinator::new(FixedLocation::at(Position::new(48.1, 11.5)));
/// let fleet = FleetSnapshot::new(vec![vehicle_at("a", 48.2, 11.6)])?;
/// coordinator.replace_fleet(fleet);
///
/// let TapOutcome::Resolve(ticket) = coordinator.tap_vehicle(&"a".into()) else {
///     panic!("expected a resolution");
/// };
/// let route = RouteResult::from_raw(RawRoute::new(1234.5, 125.0))?;
/// assert_eq!(coordinator.deliver(ticket.generation, Ok(route)), DeliveryOutcome::Applied);
/// assert!(coordinator.state().detail_panel_visible());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct SelectionCoordinator<L> {
    store: FleetStore,
    state: SelectionState,
    generation: Generation,
    location: L,
}

impl<L> SelectionCoordinator<L>
where
    L: LocationProvider,
{
    /// Start idle with an empty fleet.
    pub fn new(location: L) -> Self {
        Self {
            store: FleetStore::default(),
            state: SelectionState::default(),
            generation: Generation::default(),
            location,
        }
    }

    /// Current selection.
    pub const fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Current fleet and reservation.
    pub const fn store(&self) -> &FleetStore {
        &self.store
    }

    /// Generation of the most recent resolution or reset.
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Swap in a new fleet snapshot. Selection and reservation are kept.
    pub fn replace_fleet(&mut self, snapshot: FleetSnapshot) {
        self.store.replace_snapshot(snapshot);
    }

    /// Swap in a new fleet snapshot and apply `policy` to the reservation.
    pub fn load_fleet(&mut self, snapshot: FleetSnapshot, policy: ReservationPolicy) {
        let first = snapshot.first().map(|vehicle| vehicle.id.clone());
        self.replace_fleet(snapshot);
        if policy == ReservationPolicy::FirstVehicle && self.store.reserved().is_none() {
            if let Some(id) = first {
                debug!("reserving first listed vehicle {id}");
                self.store.reserve(Some(id));
            }
        }
    }

    /// Handle a tap on a vehicle marker.
    ///
    /// Tapping the selected vehicle clears the selection. Tapping any other
    /// known vehicle starts a new resolution, provided the user's position is
    /// known; the previous route and panel stay visible until it completes.
    pub fn tap_vehicle(&mut self, id: &VehicleId) -> TapOutcome {
        if self.state.selected_vehicle_id.as_ref() == Some(id) {
            debug!("vehicle {id} tapped again; clearing selection");
            self.reset();
            return TapOutcome::Deselected;
        }
        let Some(vehicle) = self.store.vehicle(id) else {
            debug!("ignoring tap on unknown vehicle {id}");
            return TapOutcome::Ignored(IgnoreReason::UnknownVehicle);
        };
        let to = vehicle.position;
        let Some(from) = self.location.current_position() else {
            debug!("ignoring tap on vehicle {id}: no current position");
            return TapOutcome::Ignored(IgnoreReason::NoLocation);
        };

        self.generation = self.generation.next();
        self.state.selected_vehicle_id = Some(id.clone());
        self.state.route_pending = true;
        debug!(
            "resolving route to vehicle {id} under generation {}",
            self.generation.get()
        );
        TapOutcome::Resolve(RouteTicket {
            generation: self.generation,
            vehicle_id: id.clone(),
            from,
            to,
        })
    }

    /// Hand back the result of the resolution issued under `generation`.
    ///
    /// Stale results are discarded. A failure collapses the selection to idle
    /// so no partial state remains.
    pub fn deliver(
        &mut self,
        generation: Generation,
        result: Result<RouteResult, RouteError>,
    ) -> DeliveryOutcome {
        if generation != self.generation || !self.state.route_pending {
            debug!(
                "discarding route result from generation {} (current {})",
                generation.get(),
                self.generation.get()
            );
            return DeliveryOutcome::Discarded;
        }
        match result {
            Ok(route) => {
                self.state.route = Some(route);
                self.state.route_vehicle_id = self.state.selected_vehicle_id.clone();
                self.state.detail_panel_visible = true;
                self.state.route_pending = false;
                DeliveryOutcome::Applied
            }
            Err(err) => {
                warn!("clearing selection: {err}");
                self.reset();
                DeliveryOutcome::Collapsed
            }
        }
    }

    /// Hide the detail panel, keeping selection and route.
    ///
    /// Returns `true` when the panel was visible.
    pub fn dismiss_panel(&mut self) -> bool {
        std::mem::replace(&mut self.state.detail_panel_visible, false)
    }

    /// Flip the reservation of the vehicle shown in the detail panel.
    ///
    /// Returns the new reserved flag, or `None` when no vehicle is shown.
    pub fn toggle_reservation(&mut self) -> Option<bool> {
        let id = self.state.route_vehicle_id.clone()?;
        if self.store.is_reserved(&id) {
            debug!("cancelling reservation of vehicle {id}");
            self.store.reserve(None);
            Some(false)
        } else {
            debug!("reserving vehicle {id}");
            self.store.reserve(Some(id));
            Some(true)
        }
    }

    /// Set or clear the reservation directly.
    pub fn reserve(&mut self, id: Option<VehicleId>) {
        self.store.reserve(id);
    }

    /// Clear the selection and invalidate any outstanding resolution.
    fn reset(&mut self) {
        self.generation = self.generation.next();
        self.state = SelectionState::default();
    }
}
