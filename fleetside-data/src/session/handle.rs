//! Client side of a running [`super::FleetSession`].

use fleetside_core::VehicleId;
use log::warn;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::view::{SessionEvent, SessionView};

/// The session task has stopped and no longer accepts events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("fleet session has stopped")]
pub struct SessionClosed;

/// Handle used to drive a session and observe its state.
///
/// Dropping the handle stops the session once queued events are processed.
#[derive(Debug)]
pub struct SessionHandle {
    events: mpsc::Sender<SessionEvent>,
    view: watch::Receiver<SessionView>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub(crate) const fn new(
        events: mpsc::Sender<SessionEvent>,
        view: watch::Receiver<SessionView>,
        task: JoinHandle<()>,
    ) -> Self {
        Self { events, view, task }
    }

    /// Queue an event, waiting while the event buffer is full.
    ///
    /// # Errors
    ///
    /// Returns [`SessionClosed`] when the session task has stopped.
    pub async fn send(&self, event: SessionEvent) -> Result<(), SessionClosed> {
        self.events.send(event).await.map_err(|_| SessionClosed)
    }

    /// Queue a tap on the vehicle `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionClosed`] when the session task has stopped.
    pub async fn tap_vehicle(&self, id: impl Into<VehicleId>) -> Result<(), SessionClosed> {
        self.send(SessionEvent::TapVehicle(id.into())).await
    }

    /// Queue a reservation toggle for the shown vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`SessionClosed`] when the session task has stopped.
    pub async fn toggle_reservation(&self) -> Result<(), SessionClosed> {
        self.send(SessionEvent::ToggleReservation).await
    }

    /// Queue a detail-panel dismissal.
    ///
    /// # Errors
    ///
    /// Returns [`SessionClosed`] when the session task has stopped.
    pub async fn dismiss_panel(&self) -> Result<(), SessionClosed> {
        self.send(SessionEvent::DismissPanel).await
    }

    /// Queue a manual fleet refresh.
    ///
    /// # Errors
    ///
    /// Returns [`SessionClosed`] when the session task has stopped.
    pub async fn refresh(&self) -> Result<(), SessionClosed> {
        self.send(SessionEvent::Refresh).await
    }

    /// The most recently published view.
    #[must_use]
    pub fn view(&self) -> SessionView {
        self.view.borrow().clone()
    }

    /// A receiver notified whenever a new view is published.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view.clone()
    }

    /// Wait until a published view satisfies `predicate` and return it.
    ///
    /// The current view is checked first.
    ///
    /// # Errors
    ///
    /// Returns [`SessionClosed`] when the session stops before a matching
    /// view is published.
    pub async fn wait_for<F>(&mut self, mut predicate: F) -> Result<SessionView, SessionClosed>
    where
        F: FnMut(&SessionView) -> bool,
    {
        let view = self
            .view
            .wait_for(&mut predicate)
            .await
            .map_err(|_| SessionClosed)?;
        Ok(view.clone())
    }

    /// Stop the session and wait for its task to finish.
    pub async fn shutdown(self) {
        let Self { events, task, .. } = self;
        drop(events);
        if let Err(err) = task.await {
            warn!("fleet session task ended abnormally: {err}");
        }
    }
}
