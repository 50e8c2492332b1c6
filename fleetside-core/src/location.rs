//! Access to the user's current position.

use std::sync::Arc;

use crate::vehicle::Position;

/// Report the user's current position.
///
/// `None` is a valid answer: permission may be denied or no fix may be
/// available yet. Callers must tolerate it.
pub trait LocationProvider: Send + Sync {
    /// The most recent known position, if any.
    fn current_position(&self) -> Option<Position>;
}

impl<P> LocationProvider for Arc<P>
where
    P: LocationProvider + ?Sized,
{
    fn current_position(&self) -> Option<Position> {
        (**self).current_position()
    }
}

/// A location provider that always reports the same answer.
///
/// # Examples
///
/// ```
/// use fleetside_core::{FixedLocation, LocationProvider, Position};
///
/// let here = FixedLocation::at(Position::new(48.137, 11.576));
/// assert_eq!(here.current_position(), Some(Position::new(48.137, 11.576)));
/// assert_eq!(FixedLocation::unavailable().current_position(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedLocation(Option<Position>);

impl FixedLocation {
    /// Always report `position`.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self(Some(position))
    }

    /// Never report a position.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self(None)
    }
}

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> Option<Position> {
        self.0
    }
}
