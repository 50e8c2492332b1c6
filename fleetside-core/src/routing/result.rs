//! Raw and normalised walking route values.

use super::error::RoutingProviderError;

/// A provider's walking route before normalisation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRoute {
    /// Route length in metres.
    pub distance_meters: f64,
    /// Expected travel time in seconds.
    pub travel_time_seconds: f64,
}

impl RawRoute {
    /// Construct a raw route.
    #[must_use]
    pub const fn new(distance_meters: f64, travel_time_seconds: f64) -> Self {
        Self {
            distance_meters,
            travel_time_seconds,
        }
    }
}

/// Walking distance and time from the user to a vehicle.
///
/// Distance is in kilometres rounded to two decimals; time is in whole minutes,
/// truncated rather than rounded.
///
/// # Examples
///
/// ```
/// use fleetside_core::{RawRoute, RouteResult};
///
/// let route = RouteResult::from_raw(RawRoute::new(1234.5, 125.0))?;
/// assert_eq!(route.distance_km(), 1.23);
/// assert_eq!(route.travel_time_minutes(), 2);
/// assert_eq!(route.distance_label(), "1.23 km");
/// assert_eq!(route.travel_time_label(), "2 minutes");
/// # Ok::<(), fleetside_core::RoutingProviderError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteResult {
    distance_km: f64,
    travel_time_minutes: u32,
}

impl RouteResult {
    /// Normalise a provider route.
    ///
    /// Negative or non-finite inputs are rejected with
    /// [`RoutingProviderError::InvalidRoute`].
    pub fn from_raw(raw: RawRoute) -> Result<Self, RoutingProviderError> {
        let distance_meters = require_non_negative(raw.distance_meters, "distance")?;
        let travel_time_seconds = require_non_negative(raw.travel_time_seconds, "travel time")?;
        Ok(Self {
            distance_km: metres_to_kilometres(distance_meters),
            travel_time_minutes: seconds_to_whole_minutes(travel_time_seconds),
        })
    }

    /// Walking distance in kilometres, two-decimal precision.
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Walking time in whole minutes.
    #[must_use]
    pub const fn travel_time_minutes(&self) -> u32 {
        self.travel_time_minutes
    }

    /// Distance formatted for display, e.g. `"1.23 km"`.
    #[must_use]
    pub fn distance_label(&self) -> String {
        format!("{:.2} km", self.distance_km)
    }

    /// Travel time formatted for display, e.g. `"2 minutes"`.
    #[must_use]
    pub fn travel_time_label(&self) -> String {
        format!("{} minutes", self.travel_time_minutes)
    }
}

fn require_non_negative(value: f64, what: &str) -> Result<f64, RoutingProviderError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(RoutingProviderError::InvalidRoute {
            message: format!("{what} {value} is not a non-negative number"),
        })
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "unit conversion and decimal rounding require float maths"
)]
fn metres_to_kilometres(metres: f64) -> f64 {
    let kilometres = metres / 1000.0;
    // Round the exact binary value half-to-even, as `%.2f` does.
    format!("{kilometres:.2}")
        .parse()
        .unwrap_or(kilometres)
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "input is finite and non-negative; the cast saturates at u32::MAX"
)]
fn seconds_to_whole_minutes(seconds: f64) -> u32 {
    (seconds / 60.0).trunc() as u32
}
