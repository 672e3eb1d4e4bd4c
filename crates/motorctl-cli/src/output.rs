//! Output formatting for CLI responses

use std::path::Path;

use anyhow::Error;
use colored::*;
use motorctl_sim::{SimConfig, TraceSummary};
use serde_json::json;

use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error),
            "causes": error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        }
    });
    print_json(&error_json, "error");
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print the summary of a finished run
pub fn print_run_summary(
    summary: &TraceSummary,
    seed: u64,
    trace_path: Option<&Path>,
    json: bool,
) {
    if json {
        let output = json!({
            "success": true,
            "seed": seed,
            "trace": trace_path.map(|p| p.display().to_string()),
            "summary": summary,
        });
        print_json(&output, "run summary");
        return;
    }

    println!("{}", "Simulation Summary:".bold());
    println!("  Steps:              {} ({:.2} s)", summary.steps, summary.duration);
    println!("  Seed:               {}", seed);
    println!("  Peak action:        {:.3}", summary.peak_action);
    println!("  Final error:        {:.4}", summary.final_error);
    println!("  Integral |error|:   {:.4}", summary.integral_abs_error);
    println!("  Max overshoot:      {:.4}", summary.max_overshoot);

    let saturated = summary.saturated_steps.to_string();
    if summary.saturated_steps > 0 {
        println!("  Saturated steps:    {}", saturated.yellow());
    } else {
        println!("  Saturated steps:    {}", saturated.green());
    }

    if let Some(path) = trace_path {
        println!("{} Trace written to {}", "✓".green(), path.display());
    }
}

/// Print the result of a successful validation
pub fn print_validation(path: &Path, config: &SimConfig, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "valid": true,
            "path": path.display().to_string(),
            "steps": config.sample_count(),
            "sample_period": config.sample_period(),
        });
        print_json(&output, "validation result");
    } else {
        println!(
            "{} {} is valid ({} steps of {} s)",
            "✓".green(),
            path.display().to_string().bold(),
            config.sample_count(),
            config.sample_period()
        );
    }
}

fn print_json(value: &serde_json::Value, what: &str) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format {} as JSON: {}", what, e),
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::Config(_)) => "ConfigError",
        Some(CliError::Export(_)) => "ExportError",
        None => "Error",
    }
}
