use super::actions::*;
use crate::model::*;
use crate::pathing::movementsystem::*;
use crate::tickstate::TickState;
use log::*;

/// Per-agent view of the tick handed to a job.
pub struct JobTickContext<'a, 'b> {
    pub tick_state: &'a TickState<'b>,
    pub agent: &'a Agent,
    pub executor: &'a mut dyn Executor,
    pub action_flags: SimultaneousActionFlags,
}

impl<'a, 'b> JobTickContext<'a, 'b> {
    pub fn new(tick_state: &'a TickState<'b>, agent: &'a Agent, executor: &'a mut dyn Executor) -> JobTickContext<'a, 'b> {
        JobTickContext {
            tick_state,
            agent,
            executor,
            action_flags: SimultaneousActionFlags::UNSET,
        }
    }

    /// Requests a move for the agent unless it already moved this tick.
    pub fn move_to(&mut self, target: Position, options: MoveOptions<'_>) -> bool {
        if self.action_flags.consume(SimultaneousActionFlags::MOVE) {
            self.executor.move_to(self.agent.id, target, options);

            true
        } else {
            false
        }
    }

    pub fn flee(&mut self, threats: &[Position], range: u32) -> bool {
        if self.action_flags.consume(SimultaneousActionFlags::MOVE) {
            self.executor.flee(self.agent.id, threats, range);

            true
        } else {
            false
        }
    }

    /// Runs `action` if its pipeline is free. `None` when the pipeline was
    /// already used this tick.
    pub fn act<F>(&mut self, pipeline: SimultaneousActionFlags, action: F) -> Option<ActionResult>
    where
        F: FnOnce(&mut dyn Executor, AgentId) -> ActionResult,
    {
        if self.action_flags.consume(pipeline) {
            Some(action(&mut *self.executor, self.agent.id))
        } else {
            None
        }
    }
}

/// Logs a rejected action that the caller does not recover from.
pub fn log_action_error(agent: &Agent, action: &str, err: ActionErrorCode) {
    debug!("Agent {} {} failed: {}", agent.id, action, err);
}
