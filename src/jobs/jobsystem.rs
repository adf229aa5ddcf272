use super::collector::*;
use super::context::*;
use super::fighter::*;
use super::healer::*;
use super::raider::*;
use super::tow::*;
use crate::model::*;
use crate::pathing::movementsystem::Executor;
use crate::tickstate::TickState;
use log::*;

/// Runs the decision for a single role. Defense and sapper agents only move
/// when a tow drags them.
pub fn run_role(role: Role, tick_context: &mut JobTickContext) {
    match role {
        Role::Collector => run_collector(tick_context),
        Role::Fighter => run_fighter(tick_context),
        Role::Raider => run_raider(tick_context),
        Role::Healer => run_healer(tick_context),
        Role::Tow => run_tow(tick_context),
        Role::Defense | Role::Sapper => {}
    }
}

/// Runs every friendly agent that has a role, each with a fresh set of action
/// pipelines. Returns how many jobs ran.
pub fn run_jobs(tick_state: &TickState, executor: &mut dyn Executor) -> usize {
    let mut jobs_run = 0;

    for agent in tick_state.friendly.iter().copied() {
        let role = match agent.role {
            Some(role) => role,
            None => {
                debug!("Agent {} has no role, skipping", agent.id);
                continue;
            }
        };

        let speed = agent.ticks_per_move();

        debug!("Running {:?} for agent {} ({} ticks per plain step)", role, agent.id, speed.plain);

        let mut tick_context = JobTickContext::new(tick_state, agent, &mut *executor);

        run_role(role, &mut tick_context);

        jobs_run += 1;
    }

    jobs_run
}
