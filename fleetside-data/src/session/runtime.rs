//! The session task and its configuration.

use std::fmt;
use std::sync::Arc;

use fleetside_core::{
    FetchError, FleetSnapshot, FleetSource, Generation, LocationProvider, ReservationPolicy,
    RouteError, RouteProvider, RouteResolver, RouteResult, RouteTicket, SelectionCoordinator,
    TapOutcome,
};
use log::{debug, trace, warn};
use tokio::sync::{mpsc, watch};

use super::handle::SessionHandle;
use super::view::{FleetStatus, SessionEvent, SessionView};

/// Default capacity of the event channel.
const DEFAULT_COMMAND_BUFFER: usize = 32;

/// Tunables for a [`FleetSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Reservation applied when a fleet snapshot is loaded.
    pub reservation_policy: ReservationPolicy,
    /// Capacity of the event channel; senders wait when it is full.
    pub command_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reservation_policy: ReservationPolicy::default(),
            command_buffer: DEFAULT_COMMAND_BUFFER,
        }
    }
}

impl SessionConfig {
    /// Set the reservation policy.
    #[must_use]
    pub const fn with_reservation_policy(mut self, policy: ReservationPolicy) -> Self {
        self.reservation_policy = policy;
        self
    }

    /// Set the event channel capacity. Zero is treated as one.
    #[must_use]
    pub const fn with_command_buffer(mut self, capacity: usize) -> Self {
        self.command_buffer = capacity;
        self
    }
}

/// The collaborators a session talks to.
#[derive(Clone)]
pub struct SessionCollaborators {
    /// Source of fleet snapshots.
    pub fleet: Arc<dyn FleetSource>,
    /// Walking routing provider.
    pub routes: Arc<dyn RouteProvider>,
    /// The user's current position.
    pub location: Arc<dyn LocationProvider>,
}

impl SessionCollaborators {
    /// Bundle concrete collaborators.
    #[must_use]
    pub fn new(
        fleet: impl FleetSource + 'static,
        routes: impl RouteProvider + 'static,
        location: impl LocationProvider + 'static,
    ) -> Self {
        Self {
            fleet: Arc::new(fleet),
            routes: Arc::new(routes),
            location: Arc::new(location),
        }
    }
}

impl fmt::Debug for SessionCollaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCollaborators")
            .field("fleet", &"<dyn FleetSource>")
            .field("routes", &"<dyn RouteProvider>")
            .field("location", &"<dyn LocationProvider>")
            .finish()
    }
}

/// Results posted back to the session task by background work.
enum Completion {
    Fleet {
        generation: u64,
        result: Result<FleetSnapshot, FetchError>,
    },
    Route {
        generation: Generation,
        result: Result<RouteResult, RouteError>,
    },
}

/// The session task: sole owner and mutator of the selection state.
pub struct FleetSession {
    config: SessionConfig,
    coordinator: SelectionCoordinator<Arc<dyn LocationProvider>>,
    resolver: RouteResolver<Arc<dyn RouteProvider>>,
    fleet_source: Arc<dyn FleetSource>,
    fleet_status: FleetStatus,
    fetch_generation: u64,
    completions: mpsc::UnboundedSender<Completion>,
    view: watch::Sender<SessionView>,
}

impl fmt::Debug for FleetSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FleetSession")
            .field("config", &self.config)
            .field("fleet_status", &self.fleet_status)
            .field("fetch_generation", &self.fetch_generation)
            .field("selection", self.coordinator.state())
            .finish_non_exhaustive()
    }
}

impl FleetSession {
    /// Start a session on the current Tokio runtime.
    ///
    /// The first fleet fetch is issued immediately. The session stops once its
    /// [`SessionHandle`] is shut down or dropped.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    #[must_use]
    pub fn spawn(config: SessionConfig, collaborators: SessionCollaborators) -> SessionHandle {
        let (event_tx, event_rx) = mpsc::channel(config.command_buffer.max(1));
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(SessionView::default());

        let session = Self {
            config,
            coordinator: SelectionCoordinator::new(collaborators.location),
            resolver: RouteResolver::new(collaborators.routes),
            fleet_source: collaborators.fleet,
            fleet_status: FleetStatus::Loading,
            fetch_generation: 0,
            completions: completion_tx,
            view: view_tx,
        };
        let task = tokio::spawn(session.run(event_rx, completion_rx));
        SessionHandle::new(event_tx, view_rx, task)
    }

    async fn run(
        mut self,
        mut events: mpsc::Receiver<SessionEvent>,
        mut completions: mpsc::UnboundedReceiver<Completion>,
    ) {
        debug!("fleet session started");
        self.start_fetch();
        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    self.handle_event(event);
                }
                Some(completion) = completions.recv() => self.handle_completion(completion),
            }
            self.publish();
        }
        debug!("fleet session stopped");
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::TapVehicle(id) => match self.coordinator.tap_vehicle(&id) {
                TapOutcome::Resolve(ticket) => self.start_resolution(ticket),
                TapOutcome::Deselected => debug!("vehicle {id} deselected"),
                TapOutcome::Ignored(reason) => debug!("tap on {id} ignored: {reason:?}"),
            },
            SessionEvent::ToggleReservation => {
                if let Some(reserved) = self.coordinator.toggle_reservation() {
                    debug!("reservation toggled, now reserved: {reserved}");
                }
            }
            SessionEvent::DismissPanel => {
                if self.coordinator.dismiss_panel() {
                    debug!("detail panel dismissed");
                }
            }
            SessionEvent::Refresh => self.start_fetch(),
        }
    }

    fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Fleet { generation, result } => {
                if generation != self.fetch_generation {
                    warn!("discarding superseded fleet fetch {generation}");
                    return;
                }
                match result {
                    Ok(snapshot) => {
                        debug!("loaded fleet of {} vehicles", snapshot.len());
                        self.coordinator
                            .load_fleet(snapshot, self.config.reservation_policy);
                        self.fleet_status = FleetStatus::Ready;
                    }
                    Err(err) => {
                        warn!("fleet unavailable: {err}");
                        self.fleet_status = FleetStatus::Unavailable(err);
                    }
                }
            }
            Completion::Route { generation, result } => {
                let outcome = self.coordinator.deliver(generation, result);
                debug!("route result {generation:?}: {outcome:?}");
            }
        }
    }

    fn start_fetch(&mut self) {
        self.fleet_status = FleetStatus::Loading;
        self.fetch_generation = self.fetch_generation.wrapping_add(1);
        let generation = self.fetch_generation;
        let source = Arc::clone(&self.fleet_source);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let result = source.fetch_fleet().await;
            if completions
                .send(Completion::Fleet { generation, result })
                .is_err()
            {
                debug!("session stopped before fleet fetch {generation} completed");
            }
        });
    }

    fn start_resolution(&self, ticket: RouteTicket) {
        let resolver = self.resolver.clone();
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let result = resolver.resolve_route(ticket.from, ticket.to).await;
            let completion = Completion::Route {
                generation: ticket.generation,
                result,
            };
            if completions.send(completion).is_err() {
                debug!(
                    "session stopped before route to {} resolved",
                    ticket.vehicle_id
                );
            }
        });
    }

    fn publish(&self) {
        let next = SessionView::capture(&self.fleet_status, &self.coordinator);
        let changed = self.view.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
        if changed {
            trace!("published session view");
        }
    }
}
