//! `fleet` command: list the current fleet.

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use fleetside_core::{FleetSnapshot, FleetSource};
use fleetside_data::fleet::{HttpFleetClient, HttpFleetClientConfig};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_FLEET_ENDPOINT, ARG_TIMEOUT_SECS, CliError};

/// CLI arguments for the `fleet` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Fetch the vehicle listing once and print every vehicle in \
                 server order, followed by the fleet centroid. The endpoint \
                 can come from CLI flags, configuration files, or environment \
                 variables.",
    about = "List the vehicles currently offered"
)]
#[ortho_config(prefix = "FLEETSIDE")]
pub(crate) struct FleetArgs {
    /// URL of the vehicle listing.
    #[arg(long = ARG_FLEET_ENDPOINT, value_name = "url")]
    #[serde(default)]
    pub(crate) fleet_endpoint: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl FleetArgs {
    pub(crate) fn into_config(self) -> Result<FleetConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(FleetConfig::from(merged))
    }
}

/// Resolved `fleet` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FleetConfig {
    pub(crate) client: ClientSettings,
}

/// Fleet client settings shared by every command that loads the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClientSettings {
    pub(crate) endpoint: String,
    pub(crate) timeout: Duration,
}

impl ClientSettings {
    pub(crate) fn resolve(endpoint: Option<String>, timeout_secs: Option<u64>) -> Self {
        let defaults = HttpFleetClientConfig::default();
        Self {
            endpoint: endpoint.unwrap_or(defaults.endpoint),
            timeout: timeout_secs.map_or(defaults.timeout, Duration::from_secs),
        }
    }

    pub(crate) fn build(&self) -> Result<HttpFleetClient, CliError> {
        let config =
            HttpFleetClientConfig::new(self.endpoint.clone()).with_timeout(self.timeout);
        HttpFleetClient::with_config(config).map_err(|source| CliError::BuildFleetClient {
            endpoint: self.endpoint.clone(),
            source,
        })
    }
}

impl From<FleetArgs> for FleetConfig {
    fn from(args: FleetArgs) -> Self {
        Self {
            client: ClientSettings::resolve(args.fleet_endpoint, args.timeout_secs),
        }
    }
}

pub(crate) async fn run_fleet(args: FleetArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let client = config.client.build()?;
    run_fleet_with(&client, writer).await
}

pub(crate) async fn run_fleet_with(
    source: &dyn FleetSource,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let snapshot = source.fetch_fleet().await?;
    write_fleet(writer, &snapshot)
}

fn write_fleet(writer: &mut dyn Write, snapshot: &FleetSnapshot) -> Result<(), CliError> {
    for vehicle in snapshot {
        writeln!(
            writer,
            "{}\t{}\t{} {}\t{}/{}\t{}",
            vehicle.id,
            vehicle.display_name,
            vehicle.brand,
            vehicle.model_name,
            vehicle.fuel_type,
            vehicle.transmission_type,
            vehicle.position
        )
        .map_err(CliError::WriteOutput)?;
    }
    writeln!(
        writer,
        "{} vehicles, centroid {}",
        snapshot.len(),
        snapshot.centroid()
    )
    .map_err(CliError::WriteOutput)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<FleetConfig, CliError> {
    let merged = FleetArgs::merge_from_layers(layers).map_err(CliError::from)?;
    Ok(FleetConfig::from(merged))
}
