use crate::config::TacticsConfig;
use crate::jobs::jobsystem::*;
use crate::model::*;
use crate::pathing::movementsystem::Executor;
use crate::roster::Roster;
use crate::spawnsystem::*;
use crate::tickstate::TickState;
use crate::visualize::CostMatrixVisualizer;
use log::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickSummary {
    pub tick: u32,
    pub friendly_agents: usize,
    pub hostile_agents: usize,
    pub friendly_mob_cost: u32,
    pub hostile_mob_cost: u32,
    pub spawned: Option<AgentId>,
    pub jobs_run: usize,
}

impl fmt::Display for TickSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tick {}: {} friendly, {} hostile, mobs {} vs {}, {} jobs",
            self.tick, self.friendly_agents, self.hostile_agents, self.friendly_mob_cost, self.hostile_mob_cost, self.jobs_run
        )?;

        if let Some(id) = self.spawned {
            write!(f, ", spawned {}", id)?;
        }

        Ok(())
    }
}

/// The controller. Owns the configuration and the role roster, the only
/// state carried from one tick to the next.
#[derive(Debug, Default)]
pub struct Bot {
    config: TacticsConfig,
    roster: Roster,
}

impl Bot {
    pub fn new(config: TacticsConfig) -> Bot {
        Bot {
            config,
            roster: Roster::new(),
        }
    }

    pub fn config(&self) -> &TacticsConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn tick(
        &mut self,
        snapshot: &Snapshot,
        production: &mut dyn Production,
        executor: &mut dyn Executor,
        visualizer: Option<&mut dyn CostMatrixVisualizer>,
    ) -> TickSummary {
        //
        // Roster and spawning
        //

        self.roster.refresh(snapshot);

        let spawned = if self.config.features.spawning {
            let tagged = self.roster.tag(snapshot);

            run_spawn_planner(&self.config, snapshot, &tagged, &mut self.roster, production)
        } else {
            None
        };

        //
        // Tick state
        //

        let friendly = self.roster.tag(snapshot);
        let tick_state = TickState::build(&self.config, snapshot, &friendly);

        if self.config.features.visualize {
            if let Some(visualizer) = visualizer {
                visualizer.visualize_cost_matrix(&tick_state.flank.cost_matrix);
            }
        }

        //
        // Jobs
        //

        let jobs_run = run_jobs(&tick_state, executor);

        let summary = TickSummary {
            tick: snapshot.tick,
            friendly_agents: tick_state.friendly.len(),
            hostile_agents: tick_state.hostile.len(),
            friendly_mob_cost: tick_state.flank.friendly_valuation().cost,
            hostile_mob_cost: tick_state.flank.hostile_valuation().cost,
            spawned,
            jobs_run,
        };

        info!("{}", summary);

        summary
    }
}
