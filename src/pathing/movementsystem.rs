use super::costmatrix::CostMatrix;
use crate::model::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reasons a primitive action can be rejected by the execution layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionErrorCode {
    /// Retryable: the caller should move toward the same target this tick.
    NotInRange,
    NoBodypart,
    InvalidTarget,
    Busy,
}

impl fmt::Display for ActionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ActionErrorCode::NotInRange => "not in range",
            ActionErrorCode::NoBodypart => "no body part",
            ActionErrorCode::InvalidTarget => "invalid target",
            ActionErrorCode::Busy => "busy",
        };

        f.write_str(text)
    }
}

pub type ActionResult = Result<(), ActionErrorCode>;

/// Something an agent can attack: another agent or a structure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Agent(AgentId),
    Structure(StructureId),
}

#[derive(Copy, Clone, Debug, Default)]
pub struct MoveOptions<'a> {
    range: u32,
    cost_matrix: Option<&'a CostMatrix>,
}

impl<'a> MoveOptions<'a> {
    pub fn new() -> MoveOptions<'a> {
        MoveOptions::default()
    }

    /// Stop once within this range of the target.
    pub fn range(mut self, range: u32) -> MoveOptions<'a> {
        self.range = range;
        self
    }

    /// Bias the path search with per-cell costs.
    pub fn cost_matrix(mut self, cost_matrix: &'a CostMatrix) -> MoveOptions<'a> {
        self.cost_matrix = Some(cost_matrix);
        self
    }

    pub fn get_range(&self) -> u32 {
        self.range
    }

    pub fn get_cost_matrix(&self) -> Option<&'a CostMatrix> {
        self.cost_matrix
    }
}

/// The path search and execution collaborator. Moves are requests, the
/// implementation decides the actual step.
pub trait Executor {
    fn move_to(&mut self, agent: AgentId, target: Position, options: MoveOptions<'_>);

    /// Step away from every threat, aiming for `range` from all of them. Other
    /// agents are not avoided and only a growing distance to the nearest threat
    /// is guaranteed.
    fn flee(&mut self, agent: AgentId, threats: &[Position], range: u32);

    fn attack(&mut self, agent: AgentId, target: Target) -> ActionResult;

    fn ranged_attack(&mut self, agent: AgentId, target: Target) -> ActionResult;

    fn heal(&mut self, agent: AgentId, target: AgentId) -> ActionResult;

    fn ranged_heal(&mut self, agent: AgentId, target: AgentId) -> ActionResult;

    fn withdraw(&mut self, agent: AgentId, target: StructureId) -> ActionResult;

    fn transfer(&mut self, agent: AgentId, target: StructureId) -> ActionResult;

    fn pull(&mut self, agent: AgentId, target: AgentId) -> ActionResult;
}
