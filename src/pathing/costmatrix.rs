use crate::military::mob::*;
use crate::military::valuation::*;
use crate::model::*;
use lerp::*;
use log::*;
use serde::{Deserialize, Serialize};

/// Cost of a cell the hostile mob reaches before the friendly mob does.
pub const THREAT_ZONE_COST: u8 = 100;
/// Cost of a cell adjacent to a hostile combat agent.
pub const CONTACT_COST: u8 = 200;
/// Cost at the outer edge of the hostile proximity gradient.
pub const GRADIENT_EDGE_COST: u8 = 50;
/// Contact band radius. Cells this close to a hostile always carry
/// `CONTACT_COST`, even inside the flank corridor.
pub const CONTACT_RANGE: u32 = 1;
/// Outer radius of the hostile proximity gradient.
pub const GRADIENT_RANGE: u32 = 4;
/// Perpendicular distance from the centroid line that still counts as the
/// flank corridor.
pub const FLANK_CORRIDOR_HALF_WIDTH: f64 = 1.5;

/// Dense per-cell path costs, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostMatrix {
    width: u32,
    height: u32,
    bits: Vec<u8>,
}

impl CostMatrix {
    pub fn new(width: u32, height: u32) -> CostMatrix {
        CostMatrix {
            width,
            height,
            bits: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, pos: Position) -> Option<u8> {
        self.index(pos).map(|i| self.bits[i])
    }

    pub fn set(&mut self, pos: Position, val: u8) {
        if let Some(i) = self.index(pos) {
            self.bits[i] = val;
        }
    }

    /// Every cell position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width as i32;
        let height = self.height as i32;

        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.bits.chunks(self.width.max(1) as usize)
    }
}

/// Proximity cost contributed by a hostile combat agent at `range`.
pub fn hostile_gradient_cost(range: u32) -> u8 {
    if range <= CONTACT_RANGE {
        CONTACT_COST
    } else if range <= GRADIENT_RANGE {
        let t = (range - CONTACT_RANGE) as f32 / (GRADIENT_RANGE - CONTACT_RANGE) as f32;

        (CONTACT_COST as f32).lerp_bounded(GRADIENT_EDGE_COST as f32, t).round() as u8
    } else {
        0
    }
}

/// Whether `cell` lies within `FLANK_CORRIDOR_HALF_WIDTH` of the infinite line
/// through both centroids. Coincident centroids define no line.
pub fn in_flank_corridor(cell: Position, hostile: Centroid, friendly: Centroid) -> bool {
    let dx = friendly.x - hostile.x;
    let dy = friendly.y - hostile.y;
    let length = dx.hypot(dy);

    if length < f64::EPSILON {
        return false;
    }

    let cross = dx * (cell.y as f64 - hostile.y) - dy * (cell.x as f64 - hostile.x);

    cross.abs() / length <= FLANK_CORRIDOR_HALF_WIDTH
}

/// Mobs and cost matrix computed for flanking agents this tick.
#[derive(Clone, Debug)]
pub struct FlankerPlan<'a> {
    pub friendly_mob: Option<Mob<'a>>,
    pub hostile_mob: Option<Mob<'a>>,
    pub cost_matrix: CostMatrix,
}

impl<'a> FlankerPlan<'a> {
    pub fn friendly_valuation(&self) -> MobValuation {
        self.friendly_mob.as_ref().map(|m| m.valuation()).unwrap_or_default()
    }

    pub fn hostile_valuation(&self) -> MobValuation {
        self.hostile_mob.as_ref().map(|m| m.valuation()).unwrap_or_default()
    }
}

/// Builds the flanker cost matrix from scratch.
///
/// 1. Cells the most valuable hostile mob reaches strictly before the most
///    valuable friendly mob cost `THREAT_ZONE_COST`.
/// 2. Cells on the corridor between the hostile and friendly centroids are
///    cleared to 0.
/// 3. Every hostile combat agent raises nearby cells along a gradient from
///    `CONTACT_COST` down to `GRADIENT_EDGE_COST`. Inside the corridor only
///    the contact band is raised.
pub fn plan_flank<'a>(friendly: &[&'a Agent], hostile: &[&'a Agent], link_range: u32, width: u32, height: u32) -> FlankerPlan<'a> {
    let friendly_mob = most_valuable_mob(friendly, link_range);
    let hostile_mob = most_valuable_mob(hostile, link_range);
    let hostile_combatants = combat_agents(hostile.iter().copied());

    let corridor = match (&hostile_mob, &friendly_mob) {
        (Some(h), Some(f)) => h.valuation().centroid().zip(f.valuation().centroid()),
        _ => None,
    };

    if corridor.is_none() {
        debug!("No flank corridor this tick, missing a friendly or hostile mob centroid");
    }

    let mut cost_matrix = CostMatrix::new(width, height);

    if let Some(hostile_mob) = &hostile_mob {
        for cell in cost_matrix.positions().collect::<Vec<_>>() {
            let hostile_range = hostile_mob.range_to_nearest(cell).unwrap_or(u32::MAX);
            let friendly_range = friendly_mob.as_ref().and_then(|m| m.range_to_nearest(cell)).unwrap_or(u32::MAX);

            let mut cost = if hostile_range < friendly_range { THREAT_ZONE_COST } else { 0 };

            let in_corridor = corridor
                .map(|(hostile_centroid, friendly_centroid)| in_flank_corridor(cell, hostile_centroid, friendly_centroid))
                .unwrap_or(false);

            if in_corridor {
                cost = 0;
            }

            for enemy in hostile_combatants.iter() {
                let range = cell.get_range_to(enemy.pos);

                if in_corridor && range > CONTACT_RANGE {
                    continue;
                }

                cost = cost.max(hostile_gradient_cost(range));
            }

            cost_matrix.set(cell, cost);
        }
    }

    FlankerPlan {
        friendly_mob,
        hostile_mob,
        cost_matrix,
    }
}

/// Flanker cost matrix for the given sides, without the mob breakdown.
pub fn generate_flanker_cost_matrix(friendly: &[&Agent], hostile: &[&Agent], link_range: u32, width: u32, height: u32) -> CostMatrix {
    plan_flank(friendly, hostile, link_range, width, height).cost_matrix
}
