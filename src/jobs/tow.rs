use super::actions::*;
use super::context::*;
use crate::config::TowDestination;
use crate::model::*;
use crate::pathing::movementsystem::*;
use crate::tickstate::TickState;
use log::*;

fn convoy_destination(state: &TickState, tow: &Agent) -> Position {
    match state.config.tow_destination {
        TowDestination::ChokePoint => state.nearest_choke_point(tow.pos),
        TowDestination::HostileBase => state.hostile_spawn.map(|s| s.pos).unwrap_or_else(|| state.grid_center()),
    }
}

fn move_home(tick_context: &mut JobTickContext) {
    let state = tick_context.tick_state;
    let home = state.home_position().unwrap_or_else(|| state.grid_center());

    tick_context.move_to(home, MoveOptions::new().range(1));
}

/// Pulls the sapper, or failing that the defense agent, to the convoy
/// destination. The sapper in turn pulls the defense agent so the three travel
/// as a chain. Towed agents have no behaviour of their own, so their moves are
/// issued from here.
pub fn run_tow(tick_context: &mut JobTickContext) {
    let agent = tick_context.agent;
    let state = tick_context.tick_state;

    if state.config.spawn_quota(Role::Defense) == 0 {
        move_home(tick_context);

        return;
    }

    let sapper = state.agent_with_role(Role::Sapper);
    let defense = state.agent_with_role(Role::Defense);

    let (towed, trailer) = match (sapper, defense) {
        (Some(sapper), defense) => (sapper, defense),
        (None, Some(defense)) => (defense, None),
        (None, None) => {
            move_home(tick_context);

            return;
        }
    };

    let towed_id = towed.id;

    match tick_context.act(SimultaneousActionFlags::PULL, |executor, id| executor.pull(id, towed_id)) {
        Some(Err(ActionErrorCode::NotInRange)) => {
            tick_context.move_to(towed.pos, MoveOptions::new().range(1));
        }
        Some(Err(err)) => log_action_error(agent, "pull", err),
        Some(Ok(())) => {
            let destination = convoy_destination(state, agent);

            debug!("Tow {} hauling {} toward {}", agent.id, towed.id, destination);

            tick_context.move_to(destination, MoveOptions::new());

            let executor = &mut *tick_context.executor;

            match trailer {
                Some(trailer) => match executor.pull(towed.id, trailer.id) {
                    Ok(()) => {
                        executor.move_to(towed.id, agent.pos, MoveOptions::new());
                        executor.move_to(trailer.id, towed.pos, MoveOptions::new());
                    }
                    Err(ActionErrorCode::NotInRange) => executor.move_to(trailer.id, towed.pos, MoveOptions::new().range(1)),
                    Err(err) => log_action_error(towed, "pull", err),
                },
                None => executor.move_to(towed.id, agent.pos, MoveOptions::new()),
            }
        }
        None => {}
    }
}
