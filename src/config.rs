use anyhow::{anyhow, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "cbs-mapf",
    about = "Multi-agent pathfinding on a 2D grid via Conflict-Based Search.",
    version
)]
pub struct Cli {
    #[arg(long, help = "Path to the grid map file (ASCII, '.' free / '#' blocked)")]
    pub grid_path: String,

    #[arg(long, help = "Path to a YAML scenario file of agent start/goal pairs")]
    pub scenario_path: Option<String>,

    #[arg(long, help = "Path to append per-run stats as CSV")]
    pub output_path: Option<String>,

    #[arg(
        long,
        help = "Amount the low-level horizon is padded past the tightest known lower bound",
        default_value_t = 10
    )]
    pub horizon_buffer: usize,

    #[arg(
        long,
        help = "Number of times the low-level horizon is widened before giving up on an agent",
        default_value_t = 3
    )]
    pub horizon_max_attempts: usize,

    #[arg(long, help = "Print the solution as JSON instead of human-readable text")]
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub grid_path: String,
    pub scenario_path: Option<String>,
    pub output_path: Option<String>,
    pub horizon_buffer: usize,
    pub horizon_max_attempts: usize,
    pub json: bool,
}

impl Config {
    pub fn new(cli: &Cli) -> Self {
        Self {
            grid_path: cli.grid_path.clone(),
            scenario_path: cli.scenario_path.clone(),
            output_path: cli.output_path.clone(),
            horizon_buffer: cli.horizon_buffer,
            horizon_max_attempts: cli.horizon_max_attempts,
            json: cli.json,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.horizon_buffer == 0 {
            return Err(anyhow!("horizon-buffer must be at least 1, got 0"));
        }
        if self.horizon_max_attempts == 0 {
            return Err(anyhow!("horizon-max-attempts must be at least 1, got 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_horizon_buffer() {
        let config = Config {
            grid_path: "map.txt".into(),
            scenario_path: None,
            output_path: None,
            horizon_buffer: 0,
            horizon_max_attempts: 3,
            json: false,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn accepts_default_shaped_config() {
        let config = Config {
            grid_path: "map.txt".into(),
            scenario_path: None,
            output_path: None,
            horizon_buffer: 10,
            horizon_max_attempts: 3,
            json: false,
        };
        assert!(config.validate().is_ok());
    }
}
