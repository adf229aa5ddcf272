use super::actions::*;
use super::context::*;
use crate::findnearest::*;
use crate::military::mob::*;
use crate::military::valuation::should_engage;
use crate::model::*;
use crate::pathing::movementsystem::*;
use crate::tickstate::*;
use log::*;

/// Value of the combat mob standing with `target`. A target without combat
/// parts adds nothing itself, only the combatants linked to its position.
fn target_mob_cost(state: &TickState, target: HostileTarget) -> u32 {
    let link_range = state.config.link_range;

    match target {
        HostileTarget::Agent(agent) if agent.is_combat_capable() => find_mob(agent, &state.hostile_combat, link_range).cost(),
        HostileTarget::Agent(agent) => find_mob_around(agent.pos, &state.hostile_combat, link_range).cost(),
        HostileTarget::Spawn(spawn) => find_mob_around(spawn.pos, &state.hostile_combat, link_range).cost(),
    }
}

/// Melee agent. Holds at the staging position, then attacks the nearest hostile
/// target unless its own mob is outclassed, in which case it falls back to the
/// nearest armed friendly outside its mob.
pub fn run_fighter(tick_context: &mut JobTickContext) {
    let agent = tick_context.agent;
    let state = tick_context.tick_state;

    if state.holding() {
        if let Some(staging) = state.staging_position() {
            tick_context.move_to(staging, MoveOptions::new());
        }

        return;
    }

    let target = match state.nearest_hostile_target(agent.pos) {
        Some(target) => target,
        None => return,
    };

    let range = agent.pos.get_range_to(target.pos());

    let gated = range < state.config.engagement_gate_range && !state.hostile_combat.is_empty();

    if gated {
        let own_mob = find_mob(agent, &state.friendly_combat, state.config.link_range);
        let own_cost = own_mob.cost();
        let target_cost = target_mob_cost(state, target);

        if !should_engage(own_cost, target_cost, state.config.engagement_ratio) {
            debug!("Fighter {} outclassed ({} vs {}), regrouping", agent.id, own_cost, target_cost);

            let rally = state
                .friendly
                .iter()
                .copied()
                .filter(|a| a.is_armed() && !own_mob.contains(a.id))
                .find_nearest_linear(agent.pos);

            match rally {
                Some(rally) => {
                    tick_context.move_to(rally.pos, MoveOptions::new());
                }
                None => debug!("Fighter {} has no armed agent to fall back to", agent.id),
            }

            return;
        }
    }

    let target_id = target.target();

    match tick_context.act(SimultaneousActionFlags::ATTACK, |executor, id| executor.attack(id, target_id)) {
        Some(Err(ActionErrorCode::NotInRange)) => {
            tick_context.move_to(target.pos(), MoveOptions::new().range(1));
        }
        Some(Err(err)) => log_action_error(agent, "attack", err),
        _ => {}
    }
}
