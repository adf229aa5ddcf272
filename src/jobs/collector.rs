use super::actions::*;
use super::context::*;
use crate::findnearest::*;
use crate::pathing::movementsystem::*;
use log::*;

/// Shuttles energy from the nearest stocked container to the home spawn.
pub fn run_collector(tick_context: &mut JobTickContext) {
    let agent = tick_context.agent;
    let state = tick_context.tick_state;

    if agent.store_free_capacity() > 0 {
        let container = match state.containers.iter().copied().find_nearest_linear(agent.pos) {
            Some(container) => container,
            None => {
                debug!("Collector {} has no container to withdraw from", agent.id);
                return;
            }
        };

        match tick_context.act(SimultaneousActionFlags::WITHDRAW, |executor, id| executor.withdraw(id, container.id)) {
            Some(Err(ActionErrorCode::NotInRange)) => {
                tick_context.move_to(container.pos, MoveOptions::new().range(1));
            }
            Some(Err(err)) => log_action_error(agent, "withdraw", err),
            _ => {}
        }
    } else if let Some(spawn) = state.home_spawn {
        match tick_context.act(SimultaneousActionFlags::TRANSFER, |executor, id| executor.transfer(id, spawn.id)) {
            Some(Err(ActionErrorCode::NotInRange)) => {
                tick_context.move_to(spawn.pos, MoveOptions::new().range(1));
            }
            Some(Err(err)) => log_action_error(agent, "transfer", err),
            _ => {}
        }
    }
}
