//! YAML scenario loading: a flat sequence of agents, each with a start and
//! goal, deserialized directly into [`Agent`].

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::geometry::Position;

/// The on-disk shape of one scenario entry: `start`/`goal` are `[x, y]`
/// pairs rather than `Position`'s mapping form, matching the flat scenario
/// files this crate's fixtures use.
#[derive(Debug, Serialize, Deserialize)]
struct ScenarioAgent {
    id: usize,
    start: [usize; 2],
    goal: [usize; 2],
}

impl From<&Agent> for ScenarioAgent {
    fn from(agent: &Agent) -> Self {
        ScenarioAgent {
            id: agent.id,
            start: [agent.start.x, agent.start.y],
            goal: [agent.goal.x, agent.goal.y],
        }
    }
}

impl From<ScenarioAgent> for Agent {
    fn from(raw: ScenarioAgent) -> Self {
        Agent {
            id: raw.id,
            start: Position::new(raw.start[0], raw.start[1]),
            goal: Position::new(raw.goal[0], raw.goal[1]),
        }
    }
}

pub fn load_agents_from_yaml(path: &str) -> Result<Vec<Agent>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: Vec<ScenarioAgent> = serde_yaml::from_reader(reader)?;
    Ok(raw.into_iter().map(Agent::from).collect())
}

/// Writes a scenario file in the same flat-sequence shape `load_agents_from_yaml`
/// reads; used by scenario-authoring tools and exercised here by the
/// round-trip test.
pub fn write_agents_to_yaml(path: &str, agents: &[Agent]) -> Result<()> {
    let raw: Vec<ScenarioAgent> = agents.iter().map(ScenarioAgent::from).collect();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let yaml = serde_yaml::to_string(&raw)?;
    writer.write_all(yaml.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_ids_and_coordinates_from_a_flat_sequence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "- id: 0\n  start: [0, 0]\n  goal: [1, 1]\n- id: 1\n  start: [2, 2]\n  goal: [3, 3]"
        )
        .unwrap();

        let agents = load_agents_from_yaml(file.path().to_str().unwrap()).unwrap();
        assert_eq!(agents.len(), 2);
        assert_eq!(agents[0].id, 0);
        assert_eq!(agents[0].start, Position::new(0, 0));
        assert_eq!(agents[1].goal, Position::new(3, 3));
    }

    #[test]
    fn round_trips_through_write_and_load() {
        let agents = vec![
            Agent { id: 0, start: Position::new(0, 0), goal: Position::new(4, 4) },
            Agent { id: 1, start: Position::new(1, 0), goal: Position::new(3, 4) },
        ];
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap().to_string();

        write_agents_to_yaml(&path, &agents).unwrap();
        let loaded = load_agents_from_yaml(&path).unwrap();
        assert_eq!(loaded, agents);
    }
}
