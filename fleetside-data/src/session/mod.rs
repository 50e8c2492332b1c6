//! Single-writer session runtime.
//!
//! [`FleetSession`] owns the [`fleetside_core::SelectionCoordinator`] on one
//! Tokio task. User input arrives as [`SessionEvent`]s over a bounded channel;
//! fleet fetches and route resolutions run on background tasks and post their
//! results back to the same task, so every state change happens in one place.
//! Observers read immutable [`SessionView`] snapshots from a
//! [`tokio::sync::watch`] channel.
//!
//! # Example
//!
//! ```no_run
//! use fleetside_core::{FixedLocation, Position};
//! use fleetside_data::fleet::HttpFleetClient;
//! use fleetside_data::routing::OsrmRouteProvider;
//! use fleetside_data::session::{
//!     FleetSession, FleetStatus, SessionCollaborators, SessionConfig,
//! };
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let collaborators = SessionCollaborators::new(
//!     HttpFleetClient::new("https://app.check24.de/cars.json")?,
//!     OsrmRouteProvider::new("http://localhost:5000")?,
//!     FixedLocation::at(Position::new(48.137, 11.575)),
//! );
//! let mut session = FleetSession::spawn(SessionConfig::default(), collaborators);
//! let view = session
//!     .wait_for(|view| view.fleet != FleetStatus::Loading)
//!     .await?;
//! println!("{} vehicles", view.vehicles.len());
//! session.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod handle;
mod runtime;
mod view;

pub use handle::{SessionClosed, SessionHandle};
pub use runtime::{FleetSession, SessionCollaborators, SessionConfig};
pub use view::{FleetStatus, SessionEvent, SessionView};
