use super::costmatrix::CostMatrix;
use super::movementsystem::*;
use crate::model::*;
use log::*;
use pathfinding::prelude::dijkstra;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MELEE_RANGE: u32 = 1;
pub const RANGED_RANGE: u32 = 3;

/// Flee searches never look further than this multiple of the flee range.
const FLEE_SEARCH_RADIUS_FACTOR: u32 = 2;

/// A request recorded by the `GridExecutor`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Intent {
    Move { agent: AgentId, to: Position, goal: Position },
    Flee { agent: AgentId, to: Position },
    Attack { agent: AgentId, target: Target },
    RangedAttack { agent: AgentId, target: Target },
    Heal { agent: AgentId, target: AgentId },
    RangedHeal { agent: AgentId, target: AgentId },
    Withdraw { agent: AgentId, target: StructureId },
    Transfer { agent: AgentId, target: StructureId },
    Pull { agent: AgentId, target: AgentId },
}

impl Intent {
    pub fn agent(&self) -> AgentId {
        match self {
            Intent::Move { agent, .. }
            | Intent::Flee { agent, .. }
            | Intent::Attack { agent, .. }
            | Intent::RangedAttack { agent, .. }
            | Intent::Heal { agent, .. }
            | Intent::RangedHeal { agent, .. }
            | Intent::Withdraw { agent, .. }
            | Intent::Transfer { agent, .. }
            | Intent::Pull { agent, .. } => *agent,
        }
    }
}

/// Reference executor over a snapshot. Validates action ranges and body parts,
/// resolves moves to a single next step with a Dijkstra search on the grid and
/// records everything as intents. Positions are not advanced within a tick.
pub struct GridExecutor<'a> {
    agents: HashMap<AgentId, &'a Agent>,
    structures: HashMap<StructureId, &'a Structure>,
    width: u32,
    height: u32,
    intents: Vec<Intent>,
}

impl<'a> GridExecutor<'a> {
    pub fn new(snapshot: &'a Snapshot, width: u32, height: u32) -> GridExecutor<'a> {
        GridExecutor {
            agents: snapshot.agents.iter().map(|a| (a.id, a)).collect(),
            structures: snapshot.structures.iter().map(|s| (s.id, s)).collect(),
            width,
            height,
            intents: Vec::new(),
        }
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    pub fn into_intents(self) -> Vec<Intent> {
        self.intents
    }

    pub fn intents_for(&self, agent: AgentId) -> impl Iterator<Item = &Intent> {
        self.intents.iter().filter(move |i| i.agent() == agent)
    }

    fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn successors(&self, pos: Position, cost_matrix: Option<&CostMatrix>) -> Vec<(Position, u32)> {
        pos.neighbors()
            .filter(|n| self.in_bounds(*n))
            .map(|n| {
                let cell_cost = cost_matrix.and_then(|m| m.get(n)).unwrap_or(0) as u32;

                (n, 1 + cell_cost)
            })
            .collect()
    }

    fn target_pos(&self, target: Target) -> Option<Position> {
        match target {
            Target::Agent(id) => self.agents.get(&id).map(|a| a.pos),
            Target::Structure(id) => self.structures.get(&id).map(|s| s.pos),
        }
    }

    fn check_action(&self, agent: AgentId, target_pos: Option<Position>, range: u32, part: Option<Part>) -> ActionResult {
        let actor = self.agents.get(&agent).ok_or(ActionErrorCode::InvalidTarget)?;
        let target_pos = target_pos.ok_or(ActionErrorCode::InvalidTarget)?;

        if !actor.my() {
            return Err(ActionErrorCode::InvalidTarget);
        }

        if let Some(part) = part {
            if !actor.has_active_part(part) {
                return Err(ActionErrorCode::NoBodypart);
            }
        }

        if !actor.pos.in_range_to(target_pos, range) {
            return Err(ActionErrorCode::NotInRange);
        }

        Ok(())
    }

    fn record(&mut self, result: ActionResult, intent: Intent) -> ActionResult {
        if result.is_ok() {
            self.intents.push(intent);
        }

        result
    }

    fn flee_step(&self, start: Position, threats: &[Position], range: u32) -> Option<Position> {
        let is_safe = |pos: &Position| threats.iter().all(|t| pos.get_range_to(*t) >= range);

        if is_safe(&start) {
            return None;
        }

        let radius = range * FLEE_SEARCH_RADIUS_FACTOR;

        let result = dijkstra(
            &start,
            |pos| {
                self.successors(*pos, None)
                    .into_iter()
                    .filter(|(n, _)| start.in_range_to(*n, radius))
                    .collect::<Vec<_>>()
            },
            is_safe,
        );

        if let Some((path, _)) = result {
            return path.get(1).copied();
        }

        let nearest_threat = |pos: Position| threats.iter().map(|t| pos.get_range_to(*t)).min().unwrap_or(u32::MAX);
        let current = nearest_threat(start);

        start
            .neighbors()
            .filter(|n| self.in_bounds(*n))
            .map(|n| (nearest_threat(n), n))
            .filter(|(distance, _)| *distance > current)
            .max_by_key(|(distance, _)| *distance)
            .map(|(_, n)| n)
    }
}

impl<'a> Executor for GridExecutor<'a> {
    fn move_to(&mut self, agent: AgentId, target: Position, options: MoveOptions<'_>) {
        let start = match self.agents.get(&agent) {
            Some(actor) => actor.pos,
            None => {
                warn!("Move requested for unknown agent {}", agent);
                return;
            }
        };

        let range = options.get_range();

        if start.in_range_to(target, range) {
            return;
        }

        let cost_matrix = options.get_cost_matrix();

        let result = dijkstra(&start, |pos| self.successors(*pos, cost_matrix), |pos| pos.in_range_to(target, range));

        match result.and_then(|(path, _)| path.get(1).copied()) {
            Some(next) => self.intents.push(Intent::Move { agent, to: next, goal: target }),
            None => debug!("No path for agent {} from {} to {}", agent, start, target),
        }
    }

    fn flee(&mut self, agent: AgentId, threats: &[Position], range: u32) {
        if threats.is_empty() {
            return;
        }

        let start = match self.agents.get(&agent) {
            Some(actor) => actor.pos,
            None => return,
        };

        if let Some(next) = self.flee_step(start, threats, range) {
            self.intents.push(Intent::Flee { agent, to: next });
        }
    }

    fn attack(&mut self, agent: AgentId, target: Target) -> ActionResult {
        let result = self.check_action(agent, self.target_pos(target), MELEE_RANGE, Some(Part::Attack));

        self.record(result, Intent::Attack { agent, target })
    }

    fn ranged_attack(&mut self, agent: AgentId, target: Target) -> ActionResult {
        let result = self.check_action(agent, self.target_pos(target), RANGED_RANGE, Some(Part::RangedAttack));

        self.record(result, Intent::RangedAttack { agent, target })
    }

    fn heal(&mut self, agent: AgentId, target: AgentId) -> ActionResult {
        let result = self.check_action(agent, self.target_pos(Target::Agent(target)), MELEE_RANGE, Some(Part::Heal));

        self.record(result, Intent::Heal { agent, target })
    }

    fn ranged_heal(&mut self, agent: AgentId, target: AgentId) -> ActionResult {
        let result = self.check_action(agent, self.target_pos(Target::Agent(target)), RANGED_RANGE, Some(Part::Heal));

        self.record(result, Intent::RangedHeal { agent, target })
    }

    fn withdraw(&mut self, agent: AgentId, target: StructureId) -> ActionResult {
        let result = self.check_action(agent, self.target_pos(Target::Structure(target)), MELEE_RANGE, Some(Part::Carry));

        self.record(result, Intent::Withdraw { agent, target })
    }

    fn transfer(&mut self, agent: AgentId, target: StructureId) -> ActionResult {
        let result = self.check_action(agent, self.target_pos(Target::Structure(target)), MELEE_RANGE, Some(Part::Carry));

        self.record(result, Intent::Transfer { agent, target })
    }

    fn pull(&mut self, agent: AgentId, target: AgentId) -> ActionResult {
        let result = self.check_action(agent, self.target_pos(Target::Agent(target)), MELEE_RANGE, None);

        self.record(result, Intent::Pull { agent, target })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(agents: Vec<Agent>) -> Snapshot {
        Snapshot {
            tick: 1,
            agents,
            structures: vec![Structure::container(50, Position::new(10, 10), 100)],
        }
    }

    #[test]
    fn move_steps_toward_goal() {
        let snapshot = snapshot(vec![Agent::new(1, Owner::Mine, Position::new(0, 0), &[Part::Move])]);
        let mut executor = GridExecutor::new(&snapshot, 20, 20);

        executor.move_to(AgentId(1), Position::new(5, 5), MoveOptions::new());

        assert_eq!(
            executor.intents(),
            &[Intent::Move {
                agent: AgentId(1),
                to: Position::new(1, 1),
                goal: Position::new(5, 5)
            }]
        );
    }

    #[test]
    fn move_within_range_is_a_no_op() {
        let snapshot = snapshot(vec![Agent::new(1, Owner::Mine, Position::new(4, 4), &[Part::Move])]);
        let mut executor = GridExecutor::new(&snapshot, 20, 20);

        executor.move_to(AgentId(1), Position::new(6, 6), MoveOptions::new().range(2));

        assert!(executor.intents().is_empty());
    }

    #[test]
    fn move_detours_around_costly_cells() {
        let snapshot = snapshot(vec![Agent::new(1, Owner::Mine, Position::new(2, 10), &[Part::Move])]);
        let mut matrix = CostMatrix::new(20, 20);
        for y in 5..=15 {
            matrix.set(Position::new(3, y), 200);
        }
        let mut executor = GridExecutor::new(&snapshot, 20, 20);

        executor.move_to(AgentId(1), Position::new(10, 10), MoveOptions::new().cost_matrix(&matrix));

        match executor.intents() {
            [Intent::Move { to, .. }] => assert_ne!(to.x, 3),
            other => panic!("unexpected intents {:?}", other),
        }
    }

    #[test]
    fn flee_increases_distance() {
        let snapshot = snapshot(vec![Agent::new(1, Owner::Mine, Position::new(10, 10), &[Part::Move])]);
        let mut executor = GridExecutor::new(&snapshot, 30, 30);
        let threat = Position::new(11, 11);

        executor.flee(AgentId(1), &[threat], 6);

        match executor.intents() {
            [Intent::Flee { to, .. }] => assert!(to.get_range_to(threat) > 1),
            other => panic!("unexpected intents {:?}", other),
        }
    }

    #[test]
    fn flee_when_already_safe_does_nothing() {
        let snapshot = snapshot(vec![Agent::new(1, Owner::Mine, Position::new(0, 0), &[Part::Move])]);
        let mut executor = GridExecutor::new(&snapshot, 30, 30);

        executor.flee(AgentId(1), &[Position::new(20, 20)], 6);

        assert!(executor.intents().is_empty());
    }

    #[test]
    fn attack_checks_range_and_parts() {
        let snapshot = snapshot(vec![
            Agent::new(1, Owner::Mine, Position::new(0, 0), &[Part::Attack, Part::Move]),
            Agent::new(2, Owner::Mine, Position::new(0, 1), &[Part::Move]),
            Agent::new(3, Owner::Hostile, Position::new(1, 1), &[Part::Move]),
            Agent::new(4, Owner::Hostile, Position::new(5, 5), &[Part::Move]),
        ]);
        let mut executor = GridExecutor::new(&snapshot, 20, 20);

        assert_eq!(executor.attack(AgentId(1), Target::Agent(AgentId(3))), Ok(()));
        assert_eq!(executor.attack(AgentId(1), Target::Agent(AgentId(4))), Err(ActionErrorCode::NotInRange));
        assert_eq!(executor.attack(AgentId(2), Target::Agent(AgentId(3))), Err(ActionErrorCode::NoBodypart));
        assert_eq!(executor.attack(AgentId(1), Target::Agent(AgentId(99))), Err(ActionErrorCode::InvalidTarget));
        assert_eq!(executor.intents().len(), 1);
    }

    #[test]
    fn ranged_actions_reach_three() {
        let snapshot = snapshot(vec![
            Agent::new(1, Owner::Mine, Position::new(0, 0), &[Part::RangedAttack, Part::Heal]),
            Agent::new(2, Owner::Mine, Position::new(3, 2), &[Part::Move]),
        ]);
        let mut executor = GridExecutor::new(&snapshot, 20, 20);

        assert_eq!(executor.ranged_heal(AgentId(1), AgentId(2)), Ok(()));
        assert_eq!(executor.heal(AgentId(1), AgentId(2)), Err(ActionErrorCode::NotInRange));
        assert_eq!(executor.ranged_attack(AgentId(1), Target::Agent(AgentId(2))), Ok(()));
    }

    #[test]
    fn withdraw_needs_adjacency() {
        let snapshot = snapshot(vec![Agent::new(1, Owner::Mine, Position::new(9, 9), &[Part::Carry, Part::Move])]);
        let mut executor = GridExecutor::new(&snapshot, 20, 20);

        assert_eq!(executor.withdraw(AgentId(1), StructureId(50)), Ok(()));
        assert_eq!(executor.transfer(AgentId(1), StructureId(51)), Err(ActionErrorCode::InvalidTarget));
    }
}
