use super::actions::*;
use super::context::*;
use crate::model::*;
use crate::pathing::movementsystem::*;
use crate::tickstate::TickState;
use log::*;

/// The friendly agent, other than `healer`, missing the most hits. First found
/// wins on ties.
fn most_damaged<'a>(state: &TickState<'a>, healer: &Agent) -> Option<&'a Agent> {
    let mut best: Option<&'a Agent> = None;

    for agent in state.friendly.iter().copied() {
        if agent.id == healer.id || agent.damage() == 0 {
            continue;
        }

        if best.map(|b| agent.damage() > b.damage()).unwrap_or(true) {
            best = Some(agent);
        }
    }

    best
}

pub fn run_healer(tick_context: &mut JobTickContext) {
    let agent = tick_context.agent;
    let state = tick_context.tick_state;

    let heal_target = most_damaged(state, agent);

    match heal_target {
        Some(target) => {
            let target_id = target.id;

            match tick_context.act(SimultaneousActionFlags::HEAL, |executor, id| executor.heal(id, target_id)) {
                Some(Err(ActionErrorCode::NotInRange)) => {
                    match tick_context.act(SimultaneousActionFlags::RANGED_HEAL, |executor, id| executor.ranged_heal(id, target_id)) {
                        Some(Err(ActionErrorCode::NotInRange)) | Some(Ok(())) | None => {}
                        Some(Err(err)) => log_action_error(agent, "ranged heal", err),
                    }
                }
                Some(Err(err)) => log_action_error(agent, "heal", err),
                _ => {}
            }
        }
        None if agent.damage() > 0 => {
            if let Some(Err(err)) = tick_context.act(SimultaneousActionFlags::HEAL, |executor, id| executor.heal(id, id)) {
                log_action_error(agent, "self heal", err);
            }
        }
        None => {}
    }

    let threatened = state
        .hostile
        .iter()
        .any(|hostile| agent.pos.in_range_to(hostile.pos, state.config.healer_flee_range));

    if threatened {
        debug!("Healer {} fleeing", agent.id);

        tick_context.flee(&state.hostile_positions(), state.config.flee_range);
    } else if let Some(target) = heal_target {
        tick_context.move_to(target.pos, MoveOptions::new().range(1));
    } else if let Some(hostile_spawn) = state.hostile_spawn {
        let front = state
            .friendly
            .iter()
            .copied()
            .filter(|a| matches!(a.role, Some(Role::Fighter) | Some(Role::Raider)))
            .min_by_key(|a| a.pos.get_range_to(hostile_spawn.pos));

        if let Some(front) = front {
            tick_context.move_to(front.pos, MoveOptions::new().range(1));
        }
    }
}
