//! Command implementations for the motorctl CLI

pub mod config;
pub mod run;
pub mod validate;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use motorctl_sim::TraceFormat;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Simulation configuration file (YAML or JSON); built-in defaults when omitted
    #[arg(short, long, value_name = "FILE", env = "MOTORCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the recorded trace to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Trace file format; guessed from the output extension when omitted
    #[arg(long, value_enum, requires = "output")]
    pub format: Option<FormatArg>,

    /// Measurement noise seed, overriding the configuration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run the regulator without output limitation
    #[arg(long)]
    pub no_limit: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for TraceFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => TraceFormat::Csv,
            FormatArg::Json => TraceFormat::Json,
        }
    }
}
