//! Recorded simulation output and its export formats.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Column names of the CSV export, in [`TraceSample`] field order.
pub const CSV_HEADER: [&str; 5] = ["time", "setpoint", "measurement", "filtered", "action"];

/// One recorded sampling interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceSample {
    /// Time in seconds
    pub time: f64,
    /// Setpoint
    pub setpoint: f64,
    /// Raw (noisy) plant output
    pub measurement: f64,
    /// Filtered measurement seen by the regulator
    pub filtered: f64,
    /// Control action applied during the next interval
    pub action: f64,
}

/// Aggregate figures for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TraceSummary {
    /// Number of recorded samples
    pub steps: usize,
    /// Simulated time of the last sample
    pub duration: f64,
    /// Samples whose action was cut by output limitation
    pub saturated_steps: usize,
    /// Largest absolute control action
    pub peak_action: f64,
    /// Setpoint minus filtered measurement at the last sample
    pub final_error: f64,
    /// Sum of |setpoint - filtered| · dt over the run
    pub integral_abs_error: f64,
    /// Largest amount by which the filtered measurement exceeded the setpoint
    pub max_overshoot: f64,
}

/// Output file format for a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceFormat {
    /// Comma separated values with a header row
    #[default]
    Csv,
    /// Pretty-printed JSON document
    Json,
}

impl TraceFormat {
    /// Pick the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnsupportedFormat`] for anything but `.csv` or `.json`.
    pub fn from_path(path: &Path) -> Result<Self, SimError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        extension.parse()
    }
}

impl FromStr for TraceFormat {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(TraceFormat::Csv),
            "json" => Ok(TraceFormat::Json),
            other => Err(SimError::UnsupportedFormat(format!(
                "trace format '{other}' (expected csv or json)"
            ))),
        }
    }
}

/// Everything recorded by one [`Simulation::run`](crate::Simulation::run).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationTrace {
    /// Sampling interval in seconds
    pub sample_period: f64,
    /// Noise seed the run used
    pub seed: u64,
    /// Per-step records in time order
    pub samples: Vec<TraceSample>,
    /// Samples whose action was cut by output limitation
    pub saturated_steps: usize,
}

impl SimulationTrace {
    /// Compute the run summary.
    pub fn summary(&self) -> TraceSummary {
        let mut summary = TraceSummary {
            steps: self.samples.len(),
            saturated_steps: self.saturated_steps,
            ..TraceSummary::default()
        };

        for sample in &self.samples {
            let error = sample.setpoint - sample.filtered;
            summary.peak_action = summary.peak_action.max(sample.action.abs());
            summary.integral_abs_error += error.abs() * self.sample_period;
            summary.max_overshoot = summary.max_overshoot.max(-error);
        }

        if let Some(last) = self.samples.last() {
            summary.duration = last.time;
            summary.final_error = last.setpoint - last.filtered;
        }
        summary
    }

    /// Write the samples as CSV with a `time,setpoint,measurement,filtered,action` header.
    ///
    /// The header is written even when there are no samples.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), SimError> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        wtr.write_record(CSV_HEADER)?;
        for sample in &self.samples {
            wtr.serialize(sample)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the whole trace as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), SimError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Write in `format` to any writer.
    pub fn write<W: Write>(&self, writer: W, format: TraceFormat) -> Result<(), SimError> {
        match format {
            TraceFormat::Csv => self.write_csv(writer),
            TraceFormat::Json => self.write_json(writer),
        }
    }

    /// Create (or truncate) `path` and write the trace to it.
    pub fn write_to_path(&self, path: &Path, format: TraceFormat) -> Result<(), SimError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer, format)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn sample(time: f64, setpoint: f64, filtered: f64, action: f64) -> TraceSample {
        TraceSample {
            time,
            setpoint,
            measurement: filtered,
            filtered,
            action,
        }
    }

    fn small_trace() -> SimulationTrace {
        SimulationTrace {
            sample_period: 0.5,
            seed: 1,
            samples: vec![
                sample(0.0, 1.0, 0.0, 48.0),
                sample(0.5, 1.0, 1.5, -10.0),
                sample(1.0, 1.0, 0.75, 2.0),
            ],
            saturated_steps: 1,
        }
    }

    #[test]
    fn test_summary() {
        let summary = small_trace().summary();
        assert_eq!(summary.steps, 3);
        assert_eq!(summary.saturated_steps, 1);
        assert_abs_diff_eq!(summary.duration, 1.0, epsilon = 0.0);
        assert_abs_diff_eq!(summary.peak_action, 48.0, epsilon = 0.0);
        assert_abs_diff_eq!(summary.final_error, 0.25, epsilon = 1e-12);
        // (1.0 + 0.5 + 0.25) · 0.5
        assert_abs_diff_eq!(summary.integral_abs_error, 0.875, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.max_overshoot, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_summary_of_empty_trace() {
        let trace = SimulationTrace {
            sample_period: 0.01,
            seed: 0,
            samples: Vec::new(),
            saturated_steps: 0,
        };
        assert_eq!(trace.summary(), TraceSummary::default());
    }

    #[test]
    fn test_csv_export() -> TestResult {
        let mut buf = Vec::new();
        small_trace().write_csv(&mut buf)?;
        let text = String::from_utf8(buf)?;
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("time,setpoint,measurement,filtered,action"));
        assert_eq!(lines.next(), Some("0.0,1.0,0.0,0.0,48.0"));
        assert_eq!(text.lines().count(), 4);
        Ok(())
    }

    #[test]
    fn test_csv_export_of_empty_trace_has_header() -> TestResult {
        let trace = SimulationTrace {
            sample_period: 0.01,
            seed: 0,
            samples: Vec::new(),
            saturated_steps: 0,
        };
        let mut buf = Vec::new();
        trace.write_csv(&mut buf)?;
        assert_eq!(String::from_utf8(buf)?, "time,setpoint,measurement,filtered,action\n");
        Ok(())
    }

    #[test]
    fn test_json_export_round_trip() -> TestResult {
        let trace = small_trace();
        let mut buf = Vec::new();
        trace.write(&mut buf, TraceFormat::Json)?;
        let decoded: SimulationTrace = serde_json::from_slice(&buf)?;
        assert_eq!(decoded, trace);
        Ok(())
    }

    #[test]
    fn test_format_parsing() -> TestResult {
        assert_eq!("csv".parse::<TraceFormat>()?, TraceFormat::Csv);
        assert_eq!("JSON".parse::<TraceFormat>()?, TraceFormat::Json);
        assert!("xml".parse::<TraceFormat>().is_err());
        assert_eq!(
            TraceFormat::from_path(Path::new("out/trace.json"))?,
            TraceFormat::Json
        );
        assert!(TraceFormat::from_path(Path::new("trace")).is_err());
        Ok(())
    }

    #[test]
    fn test_write_to_path() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("trace.csv");
        small_trace().write_to_path(&path, TraceFormat::Csv)?;
        let text = std::fs::read_to_string(&path)?;
        assert!(text.starts_with("time,"));
        Ok(())
    }
}
