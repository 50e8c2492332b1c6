//! Live location fed by the host platform.
//!
//! The platform side owns a [`LocationPublisher`] and pushes every fix (or
//! `None` when the fix is lost). The engine reads the latest value through a
//! [`WatchLocationProvider`] at the moment a vehicle is tapped.

use fleetside_core::{LocationProvider, Position};
use log::debug;
use tokio::sync::watch;

/// Create a connected publisher/provider pair seeded with `initial`.
///
/// # Examples
///
/// ```
/// use fleetside_core::{LocationProvider, Position};
/// use fleetside_data::location::location_channel;
///
/// let (publisher, provider) = location_channel(None);
/// assert_eq!(provider.current_position(), None);
///
/// publisher.publish(Some(Position::new(48.137, 11.575)));
/// assert_eq!(provider.current_position(), Some(Position::new(48.137, 11.575)));
/// ```
#[must_use]
pub fn location_channel(initial: Option<Position>) -> (LocationPublisher, WatchLocationProvider) {
    let (sender, receiver) = watch::channel(initial);
    (
        LocationPublisher { sender },
        WatchLocationProvider { receiver },
    )
}

/// Write side of a location channel.
#[derive(Debug)]
pub struct LocationPublisher {
    sender: watch::Sender<Option<Position>>,
}

impl LocationPublisher {
    /// Record the latest fix, or `None` when the position is unknown.
    pub fn publish(&self, position: Option<Position>) {
        debug!("location update: {position:?}");
        self.sender.send_modify(|current| *current = position);
    }

    /// A new provider reading from this publisher.
    #[must_use]
    pub fn provider(&self) -> WatchLocationProvider {
        WatchLocationProvider {
            receiver: self.sender.subscribe(),
        }
    }
}

/// [`LocationProvider`] answering with the most recently published fix.
///
/// Once the publisher is dropped the last published value keeps being
/// reported.
#[derive(Debug, Clone)]
pub struct WatchLocationProvider {
    receiver: watch::Receiver<Option<Position>>,
}

impl LocationProvider for WatchLocationProvider {
    fn current_position(&self) -> Option<Position> {
        *self.receiver.borrow()
    }
}
