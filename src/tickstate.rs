use crate::config::TacticsConfig;
use crate::findnearest::*;
use crate::military::valuation::combat_agents;
use crate::model::*;
use crate::pathing::costmatrix::*;
use crate::pathing::movementsystem::Target;
use itertools::Itertools;
use log::*;

/// The nearest thing worth attacking: a hostile agent or the hostile spawn.
#[derive(Copy, Clone, Debug)]
pub enum HostileTarget<'a> {
    Agent(&'a Agent),
    Spawn(&'a Structure),
}

impl<'a> HostileTarget<'a> {
    pub fn target(&self) -> Target {
        match self {
            HostileTarget::Agent(agent) => Target::Agent(agent.id),
            HostileTarget::Spawn(spawn) => Target::Structure(spawn.id),
        }
    }
}

impl<'a> HasPosition for HostileTarget<'a> {
    fn pos(&self) -> Position {
        match self {
            HostileTarget::Agent(agent) => agent.pos,
            HostileTarget::Spawn(spawn) => spawn.pos,
        }
    }
}

/// Everything derived from the snapshot at the start of a tick. Read-only
/// while jobs run and dropped when the tick ends.
pub struct TickState<'a> {
    pub tick: u32,
    pub config: &'a TacticsConfig,
    pub friendly: Vec<&'a Agent>,
    pub hostile: Vec<&'a Agent>,
    pub friendly_combat: Vec<&'a Agent>,
    pub hostile_combat: Vec<&'a Agent>,
    /// Containers with stored energy.
    pub containers: Vec<&'a Structure>,
    pub home_spawn: Option<&'a Structure>,
    pub hostile_spawn: Option<&'a Structure>,
    pub flank: FlankerPlan<'a>,
}

impl<'a> TickState<'a> {
    /// `friendly` holds the roster-tagged friendly agents of `snapshot`.
    pub fn build(config: &'a TacticsConfig, snapshot: &'a Snapshot, friendly: &'a [Agent]) -> TickState<'a> {
        let friendly: Vec<&Agent> = friendly.iter().collect();
        let hostile: Vec<&Agent> = snapshot.hostile_agents().collect();

        let friendly_combat = combat_agents(friendly.iter().copied());
        let hostile_combat = combat_agents(hostile.iter().copied());

        let containers = snapshot.containers().filter(|c| c.energy > 0).collect();

        let home_spawn = snapshot.my_spawn();
        let hostile_spawn = snapshot.hostile_spawn();

        if !hostile_combat.is_empty() {
            debug!("Hostile combat agents: {}", hostile_combat.iter().map(|a| a.id).join(", "));
        }

        if home_spawn.is_none() {
            debug!("No home spawn in snapshot for tick {}", snapshot.tick);
        }

        let anchors: Vec<&Agent> = friendly
            .iter()
            .copied()
            .filter(|a| !a.role.map(|role| config.is_flanker(role)).unwrap_or(false))
            .collect();

        let flank = plan_flank(&anchors, &hostile, config.link_range, config.grid_width, config.grid_height);

        TickState {
            tick: snapshot.tick,
            config,
            friendly,
            hostile,
            friendly_combat,
            hostile_combat,
            containers,
            home_spawn,
            hostile_spawn,
            flank,
        }
    }

    pub fn home_position(&self) -> Option<Position> {
        self.home_spawn.map(|s| s.pos)
    }

    /// Where combat roles wait out the hold window.
    pub fn staging_position(&self) -> Option<Position> {
        self.config.staging_position.or_else(|| self.home_position())
    }

    pub fn grid_center(&self) -> Position {
        Position::new((self.config.grid_width / 2) as i32, (self.config.grid_height / 2) as i32)
    }

    /// Whether combat roles are still holding at the staging position.
    pub fn holding(&self) -> bool {
        self.tick <= self.config.engage_after_tick
    }

    pub fn nearest_hostile_target(&self, pos: Position) -> Option<HostileTarget<'a>> {
        self.hostile
            .iter()
            .map(|a| HostileTarget::Agent(*a))
            .chain(self.hostile_spawn.map(HostileTarget::Spawn))
            .find_nearest_linear(pos)
    }

    pub fn hostile_positions(&self) -> Vec<Position> {
        self.hostile.iter().map(|a| a.pos).collect()
    }

    /// First friendly agent holding `role`.
    pub fn agent_with_role(&self, role: Role) -> Option<&'a Agent> {
        self.friendly.iter().copied().find(|a| a.role == Some(role))
    }

    /// The choke point anchor nearest to `pos`. Anchors sit on the far side
    /// of the grid from the home spawn.
    pub fn nearest_choke_point(&self, pos: Position) -> Position {
        let width = self.config.grid_width as i32;
        let height = self.config.grid_height as i32;
        let inset = self.config.choke_point_inset;

        let home_on_right = self.home_spawn.map(|s| s.pos.x > width / 2).unwrap_or(true);

        let x = if home_on_right { inset } else { width - inset };

        [Position::new(x, inset), Position::new(x, height - inset)]
            .into_iter()
            .find_nearest_linear(pos)
            .unwrap_or_else(|| Position::new(x, inset))
    }
}
