use super::actions::*;
use super::context::*;
use crate::model::*;
use crate::pathing::movementsystem::*;
use log::*;

/// Ranged kiter. Shoots every tick, closes in while out of its preferred
/// range and backs off once a hostile gets inside it. Mob strength is never
/// weighed here; kiting keeps it out of reach instead.
pub fn run_raider(tick_context: &mut JobTickContext) {
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

    let target_id = target.target();

    match tick_context.act(SimultaneousActionFlags::RANGED_ATTACK, |executor, id| executor.ranged_attack(id, target_id)) {
        Some(Err(ActionErrorCode::NotInRange)) | Some(Ok(())) | None => {}
        Some(Err(err)) => log_action_error(agent, "ranged attack", err),
    }

    let range = agent.pos.get_range_to(target.pos());
    let kite_range = state.config.raider_kite_range;
    let can_shoot = agent.has_active_part(Part::RangedAttack);

    if range > kite_range && can_shoot {
        let mut options = MoveOptions::new().range(kite_range);

        if agent.role.map(|role| state.config.is_flanker(role)).unwrap_or(false) {
            options = options.cost_matrix(&state.flank.cost_matrix);
        }

        tick_context.move_to(target.pos(), options);
    } else if range < kite_range || !can_shoot {
        let mut threats = state.hostile_positions();

        if threats.is_empty() {
            threats.push(target.pos());
        }

        debug!("Raider {} falling back from {} threats", agent.id, threats.len());

        tick_context.flee(&threats, state.config.flee_range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TacticsConfig;
    use crate::pathing::gridexecutor::*;
    use crate::tickstate::TickState;

    fn run(snapshot: &Snapshot) -> Vec<Intent> {
        let config = TacticsConfig::default();
        let friendly: Vec<Agent> = snapshot.my_agents().cloned().collect();
        let state = TickState::build(&config, snapshot, &friendly);
        let mut executor = GridExecutor::new(snapshot, 100, 100);

        let mut tick_context = JobTickContext::new(&state, &friendly[0], &mut executor);
        run_raider(&mut tick_context);

        executor.into_intents()
    }

    fn raider(x: i32, y: i32) -> Agent {
        Agent::new(1, Owner::Mine, Position::new(x, y), &[Part::Move, Part::RangedAttack]).with_role(Role::Raider)
    }

    fn hostile(x: i32, y: i32) -> Agent {
        Agent::new(9, Owner::Hostile, Position::new(x, y), &[Part::RangedAttack, Part::Move])
    }

    #[test]
    fn holds_at_kite_range() {
        let snapshot = Snapshot {
            tick: 200,
            agents: vec![raider(50, 50), hostile(53, 50)],
            structures: Vec::new(),
        };

        let intents = run(&snapshot);

        assert!(matches!(intents[..], [Intent::RangedAttack { .. }]));
    }

    #[test]
    fn closes_from_afar_without_shooting() {
        let snapshot = Snapshot {
            tick: 200,
            agents: vec![raider(50, 50), hostile(60, 50)],
            structures: Vec::new(),
        };

        let intents = run(&snapshot);

        assert!(matches!(intents[..], [Intent::Move { goal, .. }] if goal == Position::new(60, 50)));
    }

    #[test]
    fn flees_when_crowded() {
        let snapshot = Snapshot {
            tick: 200,
            agents: vec![raider(50, 50), hostile(51, 50)],
            structures: Vec::new(),
        };

        let intents = run(&snapshot);

        assert_eq!(intents.len(), 2);
        assert!(matches!(intents[0], Intent::RangedAttack { .. }));

        match intents[1] {
            Intent::Flee { to, .. } => assert!(to.get_range_to(Position::new(51, 50)) > 1),
            ref other => panic!("expected a flee, got {:?}", other),
        }
    }

    #[test]
    fn closes_on_stronger_mob_anyway() {
        let heavy = [Part::Attack, Part::Attack, Part::Attack, Part::RangedAttack, Part::RangedAttack, Part::Move];

        let snapshot = Snapshot {
            tick: 200,
            agents: vec![
                raider(50, 50),
                Agent::new(9, Owner::Hostile, Position::new(60, 50), &heavy),
                Agent::new(10, Owner::Hostile, Position::new(61, 50), &heavy),
            ],
            structures: Vec::new(),
        };

        let intents = run(&snapshot);

        assert!(matches!(intents[..], [Intent::Move { goal, .. }] if goal == Position::new(60, 50)));
    }

    #[test]
    fn disarmed_raider_flees() {
        let snapshot = Snapshot {
            tick: 200,
            agents: vec![raider(50, 50).with_hits(100), hostile(55, 50)],
            structures: Vec::new(),
        };

        let intents = run(&snapshot);

        assert!(matches!(intents[..], [Intent::Flee { .. }]));
    }
}
