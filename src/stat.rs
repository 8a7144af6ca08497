//! Per-invocation instrumentation: node expansion counters and timing,
//! accumulated during one `cbs(...)` call and reported by the CLI.

use std::fs::OpenOptions;
use std::io::Write;
use std::time::Duration;

use tracing::error;

use crate::config::Config;

#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub low_level_expanded: usize,
    pub high_level_expanded: usize,
    pub elapsed: Duration,
    pub cost: usize,
}

impl Stats {
    /// Appends one CSV line describing this run to `config.output_path`, if
    /// set. Logs (rather than propagates) write failures: stats are a
    /// best-effort side channel, not load-bearing for the solve itself.
    pub fn append_csv(&self, config: &Config) {
        let Some(output_path) = &config.output_path else {
            return;
        };

        let mut file = match OpenOptions::new()
            .create(true)
            .append(true)
            .open(output_path)
        {
            Ok(file) => file,
            Err(e) => {
                error!("failed to open stats file '{output_path}': {e}");
                return;
            }
        };

        let line = format!(
            "{},{},{},{},{},{}\n",
            config.grid_path,
            config.scenario_path.as_deref().unwrap_or(""),
            self.cost,
            self.elapsed.as_micros(),
            self.high_level_expanded,
            self.low_level_expanded,
        );

        if let Err(e) = file.write_all(line.as_bytes()) {
            error!("failed to write stats to '{output_path}': {e}");
        }
    }
}
