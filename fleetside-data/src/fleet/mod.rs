//! Fleet listing over HTTP.
//!
//! [`HttpFleetClient`] implements [`fleetside_core::FleetSource`] against the
//! vehicle listing endpoint: one `GET` per fetch, no caching and no retries.
//!
//! # Example
//!
//! ```no_run
//! use fleetside_core::FleetSource;
//! use fleetside_data::fleet::HttpFleetClient;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpFleetClient::new("https://app.check24.de/cars.json")?;
//! let fleet = client.fetch_fleet().await?;
//! println!("{} vehicles", fleet.len());
//! # Ok(())
//! # }
//! ```

mod client;

pub use client::{
    DEFAULT_FLEET_ENDPOINT, DEFAULT_USER_AGENT, HttpFleetClient, HttpFleetClientConfig,
};
