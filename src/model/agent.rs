use super::body::*;
use super::position::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Energy held per carry part when the snapshot does not state a capacity.
pub const CARRY_CAPACITY: u32 = 50;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    Mine,
    Hostile,
}

/// Behavior assigned to a friendly agent when it is produced. Roles never
/// change at runtime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Shuttles energy from containers to the home spawn.
    Collector,
    /// Melee attacker gated on mob valuation.
    Fighter,
    /// Ranged kiter and designated flanker.
    Raider,
    /// Keeps the most damaged friendly alive.
    Healer,
    /// Pulls immobile support agents into position.
    Tow,
    /// Immobile ranged turret, moved only by a tow.
    Defense,
    /// Worker convoyed together with the defense agent.
    Sapper,
}

impl Role {
    pub fn is_combat(self) -> bool {
        matches!(self, Role::Fighter | Role::Raider)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub pos: Position,
    pub owner: Owner,
    pub body: Vec<Part>,
    pub hits: u32,
    pub hits_max: u32,
    #[serde(default)]
    pub energy: u32,
    #[serde(default)]
    pub energy_capacity: Option<u32>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl Agent {
    /// Undamaged agent with an empty store.
    pub fn new(id: u32, owner: Owner, pos: Position, body: &[Part]) -> Agent {
        let hits = body.len() as u32 * BODYPART_HITS;

        Agent {
            id: AgentId(id),
            pos,
            owner,
            body: body.to_vec(),
            hits,
            hits_max: hits,
            energy: 0,
            energy_capacity: None,
            role: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Agent {
        self.role = Some(role);
        self
    }

    pub fn with_hits(mut self, hits: u32) -> Agent {
        self.hits = hits;
        self
    }

    pub fn with_energy(mut self, energy: u32) -> Agent {
        self.energy = energy;
        self
    }

    pub fn my(&self) -> bool {
        self.owner == Owner::Mine
    }

    pub fn body_cost(&self) -> u32 {
        body_cost(&self.body)
    }

    /// Parts that survive the current damage.
    pub fn living_body(&self) -> &[Part] {
        living_body(&self.body, Some(self.hits))
    }

    pub fn has_part(&self, part: Part) -> bool {
        self.body.contains(&part)
    }

    pub fn has_active_part(&self, part: Part) -> bool {
        self.living_body().contains(&part)
    }

    /// Nominal composition decides mob membership, not current damage.
    pub fn is_combat_capable(&self) -> bool {
        self.body.iter().any(|p| p.is_combat())
    }

    pub fn is_armed(&self) -> bool {
        self.body.iter().any(|p| p.is_weapon())
    }

    pub fn damage(&self) -> u32 {
        self.hits_max.saturating_sub(self.hits)
    }

    pub fn store_capacity(&self) -> u32 {
        self.energy_capacity
            .unwrap_or_else(|| self.body.iter().filter(|p| **p == Part::Carry).count() as u32 * CARRY_CAPACITY)
    }

    pub fn store_free_capacity(&self) -> u32 {
        self.store_capacity().saturating_sub(self.energy)
    }
}

impl HasPosition for Agent {
    fn pos(&self) -> Position {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combat_capability_uses_nominal_body() {
        let healer = Agent::new(1, Owner::Mine, Position::new(0, 0), &[Part::Heal, Part::Move]).with_hits(100);

        assert!(healer.is_combat_capable());
        assert!(!healer.has_active_part(Part::Move));
        assert!(healer.has_active_part(Part::Heal));
        assert!(!healer.is_armed());
    }

    #[test]
    fn store_capacity_defaults_to_carry_parts() {
        let collector = Agent::new(1, Owner::Mine, Position::new(0, 0), &[Part::Move, Part::Carry, Part::Carry]).with_energy(30);

        assert_eq!(collector.store_capacity(), 100);
        assert_eq!(collector.store_free_capacity(), 70);
    }

    #[test]
    fn damage_is_missing_hits() {
        let fighter = Agent::new(3, Owner::Hostile, Position::new(1, 1), &[Part::Attack, Part::Move]).with_hits(120);

        assert_eq!(fighter.damage(), 80);
        assert!(!fighter.my());
    }
}
