//! Run a simulation and report its summary

use std::path::Path;

use anyhow::{Context, Result};
use motorctl_sim::{SimConfig, Simulation, SimulationTrace, TraceFormat};
use tracing::{debug, info};

use crate::commands::RunArgs;
use crate::commands::validate::load;
use crate::error::CliError;
use crate::output;

pub fn execute(args: &RunArgs, json: bool) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load(path)?,
        None => {
            debug!("No configuration file given, using defaults");
            SimConfig::default()
        }
    };
    apply_overrides(&mut config, args);

    // Unknown extensions fail before the run.
    let format = match (&args.output, args.format) {
        (_, Some(format)) => Some(TraceFormat::from(format)),
        (Some(path), None) => Some(
            TraceFormat::from_path(path)
                .map_err(CliError::Export)
                .with_context(|| format!("Cannot infer trace format of {}", path.display()))?,
        ),
        (None, None) => None,
    };

    let simulation = Simulation::new(config)
        .map_err(CliError::Config)
        .context("Failed to set up the simulation")?;
    let trace = simulation.run();

    if let (Some(path), Some(format)) = (&args.output, format) {
        write_trace(&trace, path, format)?;
    }

    output::print_run_summary(&trace.summary(), trace.seed, args.output.as_deref(), json);
    Ok(())
}

fn apply_overrides(config: &mut SimConfig, args: &RunArgs) {
    if let Some(seed) = args.seed {
        config.noise.seed = Some(seed);
    }
    if args.no_limit {
        config.output_limitation = false;
    }
}

fn write_trace(trace: &SimulationTrace, path: &Path, format: TraceFormat) -> Result<()> {
    trace
        .write_to_path(path, format)
        .map_err(CliError::Export)
        .with_context(|| format!("Failed to write trace to {}", path.display()))?;
    info!(path = %path.display(), ?format, samples = trace.samples.len(), "Trace written");
    Ok(())
}
