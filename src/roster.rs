use crate::model::*;
use log::*;
use serde::{Deserialize, Serialize};
use shrinkwraprs::*;
use std::collections::{HashMap, HashSet};

/// Role assignment for friendly agents. Filled when a spawn request succeeds
/// and pruned once an agent that has been present disappears from the
/// snapshot. Agents still being produced keep their role until they show up.
#[derive(Shrinkwrap, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Roster {
    #[shrinkwrap(main_field)]
    roles: HashMap<AgentId, Role>,
    seen: HashSet<AgentId>,
}

impl Roster {
    pub fn new() -> Roster {
        Roster::default()
    }

    pub fn register(&mut self, id: AgentId, role: Role) {
        if let Some(previous) = self.roles.insert(id, role) {
            if previous != role {
                warn!("Agent {} reassigned from {:?} to {:?}", id, previous, role);
            }
        }
    }

    pub fn role(&self, id: AgentId) -> Option<Role> {
        self.roles.get(&id).copied()
    }

    /// Drops agents that were present on an earlier tick and are now gone,
    /// then adopts roles the snapshot already carries.
    pub fn refresh(&mut self, snapshot: &Snapshot) {
        let present: HashSet<AgentId> = snapshot.my_agents().map(|a| a.id).collect();

        let gone: Vec<AgentId> = self.seen.difference(&present).copied().collect();

        let before = self.roles.len();

        for id in &gone {
            self.seen.remove(id);
            self.roles.remove(id);
        }

        let removed = before - self.roles.len();

        if removed > 0 {
            debug!("Removed {} dead agents from roster", removed);
        }

        self.seen.extend(present);

        for agent in snapshot.my_agents() {
            if let Some(role) = agent.role {
                self.roles.entry(agent.id).or_insert(role);
            }
        }
    }

    /// Friendly agents of the snapshot with their roles filled in.
    pub fn tag(&self, snapshot: &Snapshot) -> Vec<Agent> {
        snapshot
            .my_agents()
            .map(|agent| {
                let mut agent = agent.clone();
                agent.role = self.role(agent.id).or(agent.role);
                agent
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(agents: Vec<Agent>) -> Snapshot {
        Snapshot {
            tick: 1,
            agents,
            structures: Vec::new(),
        }
    }

    #[test]
    fn refresh_prunes_agents_that_disappear() {
        let mut roster = Roster::new();
        roster.register(AgentId(1), Role::Collector);
        roster.register(AgentId(2), Role::Fighter);

        roster.refresh(&snapshot(vec![
            Agent::new(1, Owner::Mine, Position::new(0, 0), &[Part::Carry]),
            Agent::new(2, Owner::Mine, Position::new(1, 0), &[Part::Attack]),
        ]));
        roster.refresh(&snapshot(vec![Agent::new(2, Owner::Mine, Position::new(1, 0), &[Part::Attack])]));

        assert_eq!(roster.role(AgentId(1)), None);
        assert_eq!(roster.role(AgentId(2)), Some(Role::Fighter));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn refresh_keeps_agents_not_yet_produced() {
        let mut roster = Roster::new();
        roster.register(AgentId(1000), Role::Collector);

        roster.refresh(&snapshot(Vec::new()));
        roster.refresh(&snapshot(Vec::new()));

        assert_eq!(roster.role(AgentId(1000)), Some(Role::Collector));

        roster.refresh(&snapshot(vec![Agent::new(1000, Owner::Mine, Position::new(0, 0), &[Part::Carry])]));
        roster.refresh(&snapshot(Vec::new()));

        assert_eq!(roster.role(AgentId(1000)), None);
    }

    #[test]
    fn refresh_adopts_snapshot_roles() {
        let mut roster = Roster::new();

        roster.refresh(&snapshot(vec![
            Agent::new(5, Owner::Mine, Position::new(0, 0), &[Part::Heal]).with_role(Role::Healer),
            Agent::new(6, Owner::Hostile, Position::new(9, 9), &[Part::Heal]).with_role(Role::Healer),
        ]));

        assert_eq!(roster.role(AgentId(5)), Some(Role::Healer));
        assert_eq!(roster.role(AgentId(6)), None);
    }

    #[test]
    fn tag_only_returns_friendly_agents() {
        let mut roster = Roster::new();
        roster.register(AgentId(1), Role::Tow);

        let tagged = roster.tag(&snapshot(vec![
            Agent::new(1, Owner::Mine, Position::new(0, 0), &[Part::Move]),
            Agent::new(2, Owner::Mine, Position::new(1, 0), &[Part::Move]),
            Agent::new(3, Owner::Hostile, Position::new(2, 0), &[Part::Move]),
        ]));

        assert_eq!(tagged.len(), 2);
        assert_eq!(tagged[0].role, Some(Role::Tow));
        assert_eq!(tagged[1].role, None);
    }
}
