use super::agent::*;
use super::structure::*;
use serde::{Deserialize, Serialize};

/// Read-only view of the environment for one tick.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u32,
    #[serde(default)]
    pub agents: Vec<Agent>,
    #[serde(default)]
    pub structures: Vec<Structure>,
}

impl Snapshot {
    pub fn from_json(data: &str) -> Result<Snapshot, String> {
        serde_json::from_str(data).map_err(|e| e.to_string())
    }

    pub fn my_agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|a| a.my())
    }

    pub fn hostile_agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|a| !a.my())
    }

    pub fn my_spawn(&self) -> Option<&Structure> {
        self.structures.iter().find(|s| s.kind == StructureKind::Spawn && s.my())
    }

    pub fn hostile_spawn(&self) -> Option<&Structure> {
        self.structures.iter().find(|s| s.kind == StructureKind::Spawn && s.hostile())
    }

    pub fn containers(&self) -> impl Iterator<Item = &Structure> {
        self.structures.iter().filter(|s| s.kind == StructureKind::Container)
    }
}
