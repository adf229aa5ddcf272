use crate::config::TacticsConfig;
use crate::model::*;
use crate::roster::Roster;
use log::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnError {
    /// The facility is already producing something. Retry next tick.
    Busy,
}

/// The production facility collaborator.
pub trait Production {
    fn request_spawn(&mut self, role: Role, body: &[Part]) -> Result<AgentId, SpawnError>;
}

/// One line of the spawn plan: keep `quota` agents of `role` alive, produced
/// with `body`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnEntry {
    pub role: Role,
    pub quota: u32,
    pub body: Vec<Part>,
}

impl SpawnEntry {
    pub fn new(role: Role, quota: u32, body: &[Part]) -> SpawnEntry {
        SpawnEntry {
            role,
            quota,
            body: body.to_vec(),
        }
    }

    /// Economy first, then the defensive convoy, then the army.
    pub fn default_plan() -> Vec<SpawnEntry> {
        use Part::*;

        vec![
            SpawnEntry::new(Role::Collector, 3, &[Move, Carry, Move, Carry, Move, Carry, Move, Carry, Move, Carry]),
            SpawnEntry::new(Role::Defense, 1, &[RangedAttack, RangedAttack, RangedAttack, RangedAttack, RangedAttack, RangedAttack, Move, Move]),
            SpawnEntry::new(Role::Tow, 1, &[Move, Move, Move, Move, Work, Work, Carry, Work, Work, Carry, Work, Work, Carry, Move]),
            SpawnEntry::new(Role::Sapper, 1, &[Move, Move, Move, Move, Work, Work, Carry, Work, Work, Carry, Move]),
            SpawnEntry::new(
                Role::Fighter,
                0,
                &[Move, Move, Move, Move, Move, Move, Move, Move, Attack, Attack, Attack, Attack, Attack, Attack, Move, Move],
            ),
            SpawnEntry::new(Role::Raider, 0, &[Move, Move, Move, Move, RangedAttack, RangedAttack, RangedAttack, Move]),
            SpawnEntry::new(Role::Healer, 0, &[Move, Move, Move, Heal, Heal, Move]),
        ]
    }
}

/// How many agents currently fill a role. Collectors are counted by body, so
/// any friendly agent able to carry counts toward the collector quota.
fn current_count(role: Role, agents: &[Agent]) -> usize {
    match role {
        Role::Collector => agents.iter().filter(|a| a.has_part(Part::Carry)).count(),
        _ => agents.iter().filter(|a| a.role == Some(role)).count(),
    }
}

/// The first plan entry whose quota is not met yet.
pub fn next_spawn<'a>(config: &'a TacticsConfig, agents: &[Agent]) -> Option<&'a SpawnEntry> {
    config
        .spawn
        .iter()
        .find(|entry| current_count(entry.role, agents) < entry.quota as usize)
}

/// Issues at most one spawn request per tick and records the new agent in the
/// roster. Requires a home spawn to exist.
pub fn run_spawn_planner<P: Production + ?Sized>(
    config: &TacticsConfig,
    snapshot: &Snapshot,
    agents: &[Agent],
    roster: &mut Roster,
    production: &mut P,
) -> Option<AgentId> {
    snapshot.my_spawn()?;

    let entry = next_spawn(config, agents)?;

    match production.request_spawn(entry.role, &entry.body) {
        Ok(id) => {
            info!("Spawning {:?} as agent {}", entry.role, id);

            roster.register(id, entry.role);

            Some(id)
        }
        Err(err) => {
            debug!("Spawn of {:?} deferred: {:?}", entry.role, err);

            None
        }
    }
}

/// Production stub that accepts every request, handing out sequential ids.
#[derive(Debug, Default)]
pub struct RecordingProduction {
    next_id: u32,
    busy: bool,
    requests: Vec<(Role, Vec<Part>)>,
}

impl RecordingProduction {
    pub fn new(first_id: u32) -> RecordingProduction {
        RecordingProduction {
            next_id: first_id,
            busy: false,
            requests: Vec::new(),
        }
    }

    /// A facility that rejects every request as busy.
    pub fn busy() -> RecordingProduction {
        RecordingProduction {
            busy: true,
            ..RecordingProduction::default()
        }
    }

    pub fn requests(&self) -> &[(Role, Vec<Part>)] {
        &self.requests
    }
}

impl Production for RecordingProduction {
    fn request_spawn(&mut self, role: Role, body: &[Part]) -> Result<AgentId, SpawnError> {
        if self.busy {
            return Err(SpawnError::Busy);
        }

        let id = AgentId(self.next_id);

        self.next_id += 1;
        self.requests.push((role, body.to_vec()));

        Ok(id)
    }
}
