mod agent;
mod config;
mod constraint;
mod error;
mod geometry;
mod grid;
mod highlevel;
mod lowlevel;
mod path;
mod scenario;
mod stat;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use agent::Agent;
use config::{Cli, Config};
use geometry::Position;
use grid::Grid;
use highlevel::{cbs_with_stats, HorizonPolicy};
use stat::Stats;

/// Used when no `--scenario-path` is given: two agents crossing an open
/// 5x5 grid, small enough to eyeball the output of a fresh checkout.
fn demo_agents() -> Vec<Agent> {
    vec![
        Agent { id: 0, start: Position::new(0, 0), goal: Position::new(4, 4) },
        Agent { id: 1, start: Position::new(4, 0), goal: Position::new(0, 4) },
    ]
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::new(&cli);
    config.validate().context("invalid configuration")?;

    let grid = Grid::from_file(&config.grid_path)
        .map_err(|e| anyhow::anyhow!("failed to load grid '{}': {e}", config.grid_path))?;

    let agents = match &config.scenario_path {
        Some(path) => scenario::load_agents_from_yaml(path)
            .with_context(|| format!("failed to load scenario '{path}'"))?,
        None => {
            info!("no --scenario-path given, running the built-in demo scenario");
            demo_agents()
        }
    };

    let starts: Vec<Position> = agents.iter().map(|a| a.start).collect();
    let goals: Vec<Position> = agents.iter().map(|a| a.goal).collect();

    let policy = HorizonPolicy {
        buffer: config.horizon_buffer,
        max_attempts: config.horizon_max_attempts,
    };

    let mut stats = Stats::default();
    let started = Instant::now();
    let solution = cbs_with_stats(&grid, &starts, &goals, policy, &mut stats)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    stats.elapsed = started.elapsed();

    match solution {
        Some(paths) => {
            if config.json {
                println!("{}", serde_json::to_string_pretty(&paths)?);
            } else {
                for (agent, path) in agents.iter().zip(paths.iter()) {
                    println!("agent {}: {:?}", agent.id, path);
                }
                println!(
                    "sum-of-costs={} high-level-expanded={} low-level-expanded={} elapsed={:?}",
                    stats.cost, stats.high_level_expanded, stats.low_level_expanded, stats.elapsed
                );
            }
        }
        None => {
            if config.json {
                println!("null");
            } else {
                println!("no solution found within the configured horizon");
            }
        }
    }

    stats.append_csv(&config);
    Ok(())
}
