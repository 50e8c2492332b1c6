//! Command-line interface for exploring a car-sharing fleet.
//!
//! `fleetside fleet` lists the vehicles currently offered; `fleetside route`
//! selects one of them from a given position and reports the walking route.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fleet;
mod route;

pub use error::CliError;

pub(crate) const ARG_FLEET_ENDPOINT: &str = "fleet-endpoint";
pub(crate) const ARG_OSRM_URL: &str = "osrm-url";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_VEHICLE_ID: &str = "vehicle-id";
pub(crate) const ARG_LATITUDE: &str = "latitude";
pub(crate) const ARG_LONGITUDE: &str = "longitude";
pub(crate) const ENV_VEHICLE_ID: &str = "FLEETSIDE_CMDS_ROUTE_VEHICLE_ID";
pub(crate) const ENV_LATITUDE: &str = "FLEETSIDE_CMDS_ROUTE_LATITUDE";
pub(crate) const ENV_LONGITUDE: &str = "FLEETSIDE_CMDS_ROUTE_LONGITUDE";

/// Run the Fleetside CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Fleet(args) => runtime.block_on(fleet::run_fleet(args, &mut stdout)),
        Command::Route(args) => runtime.block_on(route::run_route(args, &mut stdout)),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "fleetside",
    about = "Browse a car-sharing fleet and plan the walk to a vehicle",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the vehicles currently offered.
    Fleet(fleet::FleetArgs),
    /// Show the walking route from a position to one vehicle.
    Route(route::RouteArgs),
}

#[cfg(test)]
mod tests;
