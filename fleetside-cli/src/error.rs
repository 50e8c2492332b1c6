//! Error types emitted by the Fleetside CLI.

use std::sync::Arc;

use fleetside_core::{FetchError, VehicleId};
use fleetside_data::ClientBuildError;
use thiserror::Error;

/// Errors emitted by the Fleetside CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A coordinate is outside its valid range.
    #[error("{field} {value} is out of range ({min} to {max})")]
    CoordinateOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// The async runtime could not be started.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Constructing the fleet client failed.
    #[error("failed to build fleet client for {endpoint:?}: {source}")]
    BuildFleetClient {
        endpoint: String,
        #[source]
        source: ClientBuildError,
    },
    /// Constructing the routing provider failed.
    #[error("failed to build routing provider for {base_url:?}: {source}")]
    BuildRouteProvider {
        base_url: String,
        #[source]
        source: ClientBuildError,
    },
    /// The fleet listing could not be loaded.
    #[error("fleet unavailable: {0}")]
    FleetUnavailable(#[from] FetchError),
    /// The requested vehicle is not in the current fleet.
    #[error("vehicle {id} is not in the current fleet")]
    UnknownVehicle { id: VehicleId },
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
