//! Selection state observed by the presentation layer.

use crate::routing::RouteResult;
use crate::vehicle::VehicleId;

/// Coarse phase of the selection state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPhase {
    /// Nothing is selected.
    Idle,
    /// A route to the vehicle is being resolved.
    Resolving(VehicleId),
    /// The vehicle is selected and its route is known.
    Selected(VehicleId),
}

/// Read-only view of the user's current selection.
///
/// `selected_vehicle_id` tracks the most recent tap. While a resolution for a
/// newly tapped vehicle is pending, the previously resolved route and the
/// detail panel stay in place; `route_vehicle_id` names the vehicle they
/// describe.
///
/// Invariant: with no selection there is no route, no route vehicle, no
/// visible panel and nothing pending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionState {
    pub(crate) selected_vehicle_id: Option<VehicleId>,
    pub(crate) detail_panel_visible: bool,
    pub(crate) route: Option<RouteResult>,
    pub(crate) route_vehicle_id: Option<VehicleId>,
    pub(crate) route_pending: bool,
}

impl SelectionState {
    /// The most recently tapped vehicle, if any.
    #[must_use]
    pub const fn selected_vehicle_id(&self) -> Option<&VehicleId> {
        self.selected_vehicle_id.as_ref()
    }

    /// Whether the detail panel is shown.
    #[must_use]
    pub const fn detail_panel_visible(&self) -> bool {
        self.detail_panel_visible
    }

    /// The displayed walking route, if one has resolved.
    #[must_use]
    pub const fn route(&self) -> Option<&RouteResult> {
        self.route.as_ref()
    }

    /// The vehicle the displayed route and detail panel describe.
    #[must_use]
    pub const fn route_vehicle_id(&self) -> Option<&VehicleId> {
        self.route_vehicle_id.as_ref()
    }

    /// Whether a route resolution is outstanding.
    #[must_use]
    pub const fn route_pending(&self) -> bool {
        self.route_pending
    }

    /// Whether nothing is selected.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.selected_vehicle_id.is_none()
    }

    /// Current phase of the state machine.
    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        match (&self.selected_vehicle_id, self.route_pending) {
            (None, _) => SelectionPhase::Idle,
            (Some(id), true) => SelectionPhase::Resolving(id.clone()),
            (Some(id), false) => SelectionPhase::Selected(id.clone()),
        }
    }

    /// Check the selection invariants.
    ///
    /// With no selection, nothing else may be set. A route and its vehicle are
    /// always present together, and a settled selection shows its own route.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let route_pair_matches = self.route.is_some() == self.route_vehicle_id.is_some();
        match &self.selected_vehicle_id {
            None => {
                self.route.is_none()
                    && self.route_vehicle_id.is_none()
                    && !self.route_pending
                    && !self.detail_panel_visible
            }
            Some(selected) if !self.route_pending => {
                route_pair_matches && self.route_vehicle_id.as_ref() == Some(selected)
            }
            Some(_) => route_pair_matches,
        }
    }
}
