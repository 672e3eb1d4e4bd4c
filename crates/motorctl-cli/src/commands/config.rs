//! Print the default simulation configuration

use anyhow::Result;
use motorctl_sim::SimConfig;

/// Print the built-in configuration as YAML, or JSON with `--json`.
pub fn execute(json: bool) -> Result<()> {
    let config = SimConfig::default();
    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", config.to_yaml_string()?);
    }
    Ok(())
}
