//! Command-line interface for reconstructing bikeway networks offline.
#![forbid(unsafe_code)]

use std::io::Write;
use std::num::NonZeroUsize;

use bikeway_core::MergeConfig;
use bikeway_data::{NetworkReport, PipelineConfig, reconstruct};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

mod error;
mod source;

pub use error::CliError;

const ARG_TABLE: &str = "table";
const ARG_PROXIMITY_THRESHOLD: &str = "proximity-threshold";
const ARG_MIN_LENGTH: &str = "min-length";
const ARG_MAX_PASSES: &str = "max-passes";
const ARG_SAMPLE_STRIDE: &str = "sample-stride";
const ENV_TABLE: &str = "BIKEWAY_CMDS_NETWORK_TABLE";

/// Run the bikeway CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments, configuration, input or output
/// fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &mut stdout)
}

fn run_command(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Reconstruct(args) => {
            let report = load_report(args)?;
            write_json(writer, &report.routes)
        }
        Command::Summary(args) => {
            let report = load_report(args)?;
            write_json(writer, &report.summary)
        }
    }
}

fn load_report(args: NetworkArgs) -> Result<NetworkReport, CliError> {
    let config = resolve_network_config(args)?;
    let table = source::read_table(&config.table)?;
    info!("read bikeway table from {}", config.table);
    Ok(reconstruct(&table, &config.pipeline))
}

fn resolve_network_config(args: NetworkArgs) -> Result<NetworkConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "bikeway",
    about = "Reconstruct continuous bike routes from a bikeway export",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the reconstructed routes as JSON.
    Reconstruct(NetworkArgs),
    /// Print load statistics for the reconstructed network as JSON.
    Summary(NetworkArgs),
}

/// Arguments shared by the `reconstruct` and `summary` subcommands.
///
/// Values can come from CLI flags, configuration files, or environment
/// variables.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[ortho_config(prefix = "BIKEWAY")]
struct NetworkArgs {
    /// Path to the bikeway CSV export.
    #[arg(value_name = "path")]
    #[serde(default)]
    table: Option<Utf8PathBuf>,
    /// Planar distance in degrees at which two endpoints touch.
    #[arg(long = ARG_PROXIMITY_THRESHOLD, value_name = "degrees")]
    #[serde(default)]
    proximity_threshold: Option<f64>,
    /// Planar length in degrees below which a route is discarded.
    #[arg(long = ARG_MIN_LENGTH, value_name = "degrees")]
    #[serde(default)]
    min_length: Option<f64>,
    /// Upper bound on merge passes.
    #[arg(long = ARG_MAX_PASSES, value_name = "count")]
    #[serde(default)]
    max_passes: Option<usize>,
    /// Keep every n-th geometry point.
    #[arg(long = ARG_SAMPLE_STRIDE, value_name = "n")]
    #[serde(default)]
    sample_stride: Option<usize>,
}

impl NetworkArgs {
    fn into_config(self) -> Result<NetworkConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        NetworkConfig::try_from(merged)
    }
}

/// Resolved configuration for one network command.
#[derive(Debug, Clone, PartialEq)]
struct NetworkConfig {
    table: Utf8PathBuf,
    pipeline: PipelineConfig,
}

impl NetworkConfig {
    fn validate_sources(&self) -> Result<(), CliError> {
        source::require_file(&self.table, ARG_TABLE)
    }
}

impl TryFrom<NetworkArgs> for NetworkConfig {
    type Error = CliError;

    fn try_from(args: NetworkArgs) -> Result<Self, Self::Error> {
        let table = args.table.ok_or(CliError::MissingArgument {
            field: ARG_TABLE,
            env: ENV_TABLE,
        })?;

        let defaults = MergeConfig::default();
        let merge = MergeConfig::new(
            args.proximity_threshold
                .unwrap_or(defaults.proximity_threshold()),
            args.min_length.unwrap_or(defaults.min_length()),
            args.max_passes.unwrap_or(defaults.max_passes()),
        )?;

        let mut pipeline = PipelineConfig::default().with_merge(merge);
        if let Some(stride) = args.sample_stride {
            let stride = NonZeroUsize::new(stride).ok_or(CliError::ZeroSampleStride)?;
            pipeline = pipeline.with_sample_stride(stride);
        }

        Ok(Self { table, pipeline })
    }
}

#[cfg(test)]
fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<NetworkConfig, CliError> {
    let merged = NetworkArgs::merge_from_layers(layers).map_err(CliError::from)?;
    NetworkConfig::try_from(merged)
}

#[cfg(test)]
mod tests;
