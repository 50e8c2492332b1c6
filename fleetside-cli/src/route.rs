//! `route` command: select one vehicle and report the walk to it.

use std::io::Write;

use clap::Parser;
use fleetside_core::{
    FixedLocation, FleetSource, Position, ReservationPolicy, RouteProvider, RouteResolver,
    RouteResult, SelectionCoordinator, TapOutcome, Vehicle, VehicleId,
};
use fleetside_data::routing::{OsrmRouteProvider, OsrmRouteProviderConfig};
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fleet::ClientSettings;
use crate::{
    ARG_FLEET_ENDPOINT, ARG_LATITUDE, ARG_LONGITUDE, ARG_OSRM_URL, ARG_TIMEOUT_SECS,
    ARG_VEHICLE_ID, CliError, ENV_LATITUDE, ENV_LONGITUDE, ENV_VEHICLE_ID,
};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load the fleet, select one vehicle as if its marker was \
                 tapped from the given position, and print the walking \
                 distance and time reported by the OSRM instance. With \
                 --reserve the shown vehicle is reserved afterwards.",
    about = "Show the walking route to one vehicle"
)]
#[ortho_config(prefix = "FLEETSIDE")]
pub(crate) struct RouteArgs {
    /// Identifier of the vehicle to walk to.
    #[arg(value_name = "vehicle-id")]
    #[serde(default)]
    pub(crate) vehicle_id: Option<String>,
    /// Latitude of the starting position in decimal degrees.
    #[arg(long = ARG_LATITUDE, value_name = "deg", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Longitude of the starting position in decimal degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "deg", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// URL of the vehicle listing.
    #[arg(long = ARG_FLEET_ENDPOINT, value_name = "url")]
    #[serde(default)]
    pub(crate) fleet_endpoint: Option<String>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_OSRM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_url: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Reserve the vehicle once its route is shown.
    #[arg(long)]
    #[serde(default)]
    pub(crate) reserve: bool,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteConfig {
    pub(crate) vehicle_id: VehicleId,
    pub(crate) position: Position,
    pub(crate) client: ClientSettings,
    pub(crate) osrm_url: String,
    pub(crate) reserve: bool,
}

impl RouteConfig {
    fn build_route_provider(&self) -> Result<OsrmRouteProvider, CliError> {
        let config = OsrmRouteProviderConfig::new(self.osrm_url.clone())
            .with_timeout(self.client.timeout);
        OsrmRouteProvider::with_config(config).map_err(|source| CliError::BuildRouteProvider {
            base_url: self.osrm_url.clone(),
            source,
        })
    }
}

fn require_coordinate(
    value: Option<f64>,
    field: &'static str,
    env: &'static str,
    limit: f64,
) -> Result<f64, CliError> {
    let value = value.ok_or(CliError::MissingArgument { field, env })?;
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(value)
    } else {
        Err(CliError::CoordinateOutOfRange {
            field,
            value,
            min: -limit,
            max: limit,
        })
    }
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let vehicle_id = args
            .vehicle_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_VEHICLE_ID,
                env: ENV_VEHICLE_ID,
            })?;
        let latitude = require_coordinate(args.latitude, ARG_LATITUDE, ENV_LATITUDE, 90.0)?;
        let longitude = require_coordinate(args.longitude, ARG_LONGITUDE, ENV_LONGITUDE, 180.0)?;

        let default_base_url = OsrmRouteProviderConfig::default().base_url;
        Ok(Self {
            vehicle_id: VehicleId::new(vehicle_id),
            position: Position::new(latitude, longitude),
            client: ClientSettings::resolve(args.fleet_endpoint, args.timeout_secs),
            osrm_url: args.osrm_url.unwrap_or(default_base_url),
            reserve: args.reserve,
        })
    }
}

/// What the `route` command found out.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteReport {
    pub(crate) vehicle: Vehicle,
    pub(crate) route: Option<RouteResult>,
    pub(crate) reserved: Option<bool>,
}

pub(crate) async fn run_route(args: RouteArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let fleet = config.client.build()?;
    let routes = config.build_route_provider()?;
    let report = execute_route(&config, &fleet, routes).await?;
    write_route_report(writer, &report)
}

/// Load the fleet, tap the configured vehicle and resolve its route.
pub(crate) async fn execute_route<P>(
    config: &RouteConfig,
    fleet: &dyn FleetSource,
    routes: P,
) -> Result<RouteReport, CliError>
where
    P: RouteProvider,
{
    let snapshot = fleet.fetch_fleet().await?;
    let mut coordinator = SelectionCoordinator::new(FixedLocation::at(config.position));
    coordinator.load_fleet(snapshot, ReservationPolicy::None);

    let id = &config.vehicle_id;
    let ticket = match coordinator.tap_vehicle(id) {
        TapOutcome::Resolve(ticket) => ticket,
        outcome => {
            debug!("tap on {id} produced {outcome:?}");
            return Err(CliError::UnknownVehicle { id: id.clone() });
        }
    };
    let result = RouteResolver::new(routes)
        .resolve_route(ticket.from, ticket.to)
        .await;
    coordinator.deliver(ticket.generation, result);

    let reserved = if config.reserve {
        coordinator.toggle_reservation()
    } else {
        None
    };
    let vehicle = coordinator
        .store()
        .vehicle(id)
        .cloned()
        .ok_or_else(|| CliError::UnknownVehicle { id: id.clone() })?;
    Ok(RouteReport {
        vehicle,
        route: coordinator.state().route().copied(),
        reserved,
    })
}

pub(crate) fn write_route_report(
    writer: &mut dyn Write,
    report: &RouteReport,
) -> Result<(), CliError> {
    let vehicle = &report.vehicle;
    writeln!(
        writer,
        "{} {} ({} {}) at {}",
        vehicle.id, vehicle.display_name, vehicle.brand, vehicle.model_name, vehicle.position
    )
    .map_err(CliError::WriteOutput)?;
    let written = match report.route {
        Some(route) => writeln!(
            writer,
            "walking distance: {}\nwalking time: {}",
            route.distance_label(),
            route.travel_time_label()
        ),
        None => writeln!(writer, "route unavailable"),
    };
    written.map_err(CliError::WriteOutput)?;
    if let Some(reserved) = report.reserved {
        writeln!(writer, "reserved: {}", if reserved { "yes" } else { "no" })
            .map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}
