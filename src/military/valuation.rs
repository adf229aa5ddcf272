use super::mob::*;
use crate::model::*;
use serde::{Deserialize, Serialize};

/// Margin a mob must exceed the opposing mob by before committing to a fight.
pub const DEFAULT_ENGAGEMENT_RATIO: f64 = 1.1;

/// Cost-weighted mean position of a mob.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

impl Centroid {
    /// Stand-in for a mob with no cost. Not a real position.
    pub const ORIGIN: Centroid = Centroid { x: 0.0, y: 0.0 };
}

impl<'a> Mob<'a> {
    /// Total nominal body cost of the members. Damage does not reduce it, the
    /// value measures investment rather than remaining combat power.
    pub fn cost(&self) -> u32 {
        self.iter().map(|a| a.body_cost()).sum()
    }

    /// Cost-weighted centroid, `Centroid::ORIGIN` when the mob has no cost.
    pub fn centroid(&self) -> Centroid {
        let total = self.cost();

        if total == 0 {
            return Centroid::ORIGIN;
        }

        let (sum_x, sum_y) = self.iter().fold((0.0, 0.0), |(sx, sy), agent| {
            let weight = agent.body_cost() as f64;

            (sx + weight * agent.pos.x as f64, sy + weight * agent.pos.y as f64)
        });

        Centroid {
            x: sum_x / total as f64,
            y: sum_y / total as f64,
        }
    }

    pub fn valuation(&self) -> MobValuation {
        MobValuation {
            cost: self.cost(),
            centroid: self.centroid(),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MobValuation {
    pub cost: u32,
    pub centroid: Centroid,
}

impl MobValuation {
    /// The centroid, unless the mob is worthless and the centroid is the
    /// origin sentinel.
    pub fn centroid(&self) -> Option<Centroid> {
        if self.cost > 0 {
            Some(self.centroid)
        } else {
            None
        }
    }
}

/// Agents that can take part in a combat mob.
pub fn combat_agents<'a, I>(agents: I) -> Vec<&'a Agent>
where
    I: IntoIterator<Item = &'a Agent>,
{
    agents.into_iter().filter(|a| a.is_combat_capable()).collect()
}

/// Partitions the combat capable agents into mobs and returns the one with the
/// strictly greatest cost. On equal cost the mob found first wins.
pub fn most_valuable_mob<'a>(agents: &[&'a Agent], link_range: u32) -> Option<Mob<'a>> {
    let combatants = combat_agents(agents.iter().copied());

    let mut best: Option<(u32, Mob<'a>)> = None;

    for mob in partition_mobs(&combatants, link_range) {
        let cost = mob.cost();

        match &best {
            Some((best_cost, _)) if cost <= *best_cost => {}
            _ => best = Some((cost, mob)),
        }
    }

    best.map(|(_, mob)| mob)
}

/// Engagement gate. A worthless opposing mob is no threat and is always
/// engaged, otherwise our mob must be worth more than `ratio` times theirs.
pub fn should_engage(own_cost: u32, target_cost: u32, ratio: f64) -> bool {
    target_cost == 0 || own_cost as f64 > target_cost as f64 * ratio
}
