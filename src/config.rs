use crate::features::Features;
use crate::military::valuation::DEFAULT_ENGAGEMENT_RATIO;
use crate::military::DEFAULT_LINK_RANGE;
use crate::model::*;
use crate::spawnsystem::SpawnEntry;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GRID_SIZE: u32 = 100;
/// Largest accepted grid side. Keeps cell counts and coordinates well inside
/// their integer types.
pub const MAX_GRID_SIZE: u32 = 1000;

/// Where a tow convoys the agents it pulls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowDestination {
    ChokePoint,
    HostileBase,
}

/// Tunables for the tactics core. Every field has a default, so a partial JSON
/// document is a valid configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TacticsConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    /// Agents within this range of each other belong to the same mob.
    pub link_range: u32,
    /// Combat roles hold at the staging position up to and including this tick.
    pub engage_after_tick: u32,
    /// Our mob must be worth more than this multiple of the target's mob.
    pub engagement_ratio: f64,
    /// Fighters only weigh mobs against targets closer than this.
    pub engagement_gate_range: u32,
    /// Raiders try to hold exactly this range to their target.
    pub raider_kite_range: u32,
    pub flee_range: u32,
    /// Healers flee when a hostile agent is within this range.
    pub healer_flee_range: u32,
    /// Distance of the choke point anchors from the grid edges.
    pub choke_point_inset: i32,
    pub tow_destination: TowDestination,
    /// Where combat roles wait before engaging. Defaults to the home spawn.
    pub staging_position: Option<Position>,
    /// Roles that route with the flanker cost matrix. Agents with these roles
    /// are left out of the friendly mob the matrix is built around.
    pub flanking_roles: Vec<Role>,
    /// Spawn requests in priority order.
    pub spawn: Vec<SpawnEntry>,
    pub features: Features,
}

impl Default for TacticsConfig {
    fn default() -> TacticsConfig {
        TacticsConfig {
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,
            link_range: DEFAULT_LINK_RANGE,
            engage_after_tick: 100,
            engagement_ratio: DEFAULT_ENGAGEMENT_RATIO,
            engagement_gate_range: 15,
            raider_kite_range: 3,
            flee_range: 8,
            healer_flee_range: 5,
            choke_point_inset: 10,
            tow_destination: TowDestination::ChokePoint,
            staging_position: None,
            flanking_roles: vec![Role::Raider],
            spawn: SpawnEntry::default_plan(),
            features: Features::default(),
        }
    }
}

impl TacticsConfig {
    pub fn from_json(data: &str) -> Result<TacticsConfig, String> {
        let config: TacticsConfig = serde_json::from_str(data).map_err(|e| e.to_string())?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        let valid = 1..=MAX_GRID_SIZE;

        if !valid.contains(&self.grid_width) || !valid.contains(&self.grid_height) {
            return Err(format!(
                "Grid size {}x{} outside 1..={}",
                self.grid_width, self.grid_height, MAX_GRID_SIZE
            ));
        }

        Ok(())
    }

    pub fn is_flanker(&self, role: Role) -> bool {
        self.flanking_roles.contains(&role)
    }

    pub fn spawn_quota(&self, role: Role) -> u32 {
        self.spawn.iter().filter(|e| e.role == role).map(|e| e.quota).sum()
    }
}
