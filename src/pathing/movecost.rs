use crate::model::*;
use serde::{Deserialize, Serialize};

/// If an agent has no working move parts left, this many ticks are needed per
/// step.
pub const MAX_TICKS_PER_MOVE: u32 = 1000;

const PLAIN_FATIGUE_PER_PART: u32 = 2;
const SWAMP_FATIGUE_PER_PART: u32 = 10;
const FATIGUE_RECOVERY_PER_MOVE: u32 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicksPerMove {
    pub plain: u32,
    pub swamp: u32,
}

/// Ticks needed for one grid step on each terrain class. When `hits` is given
/// the parts disabled by damage are left out of the calculation.
pub fn ticks_per_move(body: &[Part], hits: Option<u32>) -> TicksPerMove {
    let living = living_body(body, hits);

    let move_parts = living.iter().filter(|p| **p == Part::Move).count() as u32;
    let other_parts = living.len() as u32 - move_parts;

    TicksPerMove {
        plain: ticks_for_terrain(other_parts, move_parts, PLAIN_FATIGUE_PER_PART),
        swamp: ticks_for_terrain(other_parts, move_parts, SWAMP_FATIGUE_PER_PART),
    }
}

fn ticks_for_terrain(other_parts: u32, move_parts: u32, fatigue_per_part: u32) -> u32 {
    if move_parts == 0 {
        return MAX_TICKS_PER_MOVE;
    }

    let fatigue = other_parts * fatigue_per_part;
    let recovery = move_parts * FATIGUE_RECOVERY_PER_MOVE;

    fatigue.div_ceil(recovery).clamp(1, MAX_TICKS_PER_MOVE)
}

impl Agent {
    pub fn ticks_per_move(&self) -> TicksPerMove {
        ticks_per_move(&self.body, Some(self.hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_body_moves_every_tick() {
        let cost = ticks_per_move(&[Part::Move, Part::Carry], None);

        assert_eq!(cost, TicksPerMove { plain: 1, swamp: 5 });
    }

    #[test]
    fn no_move_parts_is_immobile() {
        let cost = ticks_per_move(&[Part::Carry, Part::Carry], None);

        assert_eq!(cost.plain, MAX_TICKS_PER_MOVE);
        assert_eq!(cost.swamp, MAX_TICKS_PER_MOVE);
    }

    #[test]
    fn move_only_body_is_clamped_to_one() {
        assert_eq!(ticks_per_move(&[Part::Move, Part::Move], None), TicksPerMove { plain: 1, swamp: 1 });
    }

    #[test]
    fn heavy_bodies_round_up() {
        let body = [Part::Move, Part::Attack, Part::Attack, Part::Attack];

        assert_eq!(ticks_per_move(&body, None), TicksPerMove { plain: 3, swamp: 15 });

        let body = [Part::Move, Part::Move, Part::Work, Part::Work, Part::Work];

        assert_eq!(ticks_per_move(&body, None), TicksPerMove { plain: 2, swamp: 8 });
    }

    #[test]
    fn cost_grows_with_other_parts() {
        let mut body = vec![Part::Move, Part::Move];
        let mut previous = ticks_per_move(&body, None);

        for _ in 0..12 {
            body.push(Part::Tough);
            let next = ticks_per_move(&body, None);
            assert!(next.plain >= previous.plain);
            assert!(next.swamp >= previous.swamp);
            previous = next;
        }
    }

    #[test]
    fn cost_shrinks_with_move_parts() {
        let mut body = vec![Part::Move, Part::Work, Part::Work, Part::Work, Part::Work];
        let mut previous = ticks_per_move(&body, None);

        for _ in 0..6 {
            body.insert(0, Part::Move);
            let next = ticks_per_move(&body, None);
            assert!(next.plain <= previous.plain);
            assert!(next.swamp <= previous.swamp);
            previous = next;
        }
    }

    #[test]
    fn damage_removes_trailing_move_parts() {
        let body = [Part::Carry, Part::Carry, Part::Move, Part::Move];

        assert_eq!(ticks_per_move(&body, Some(400)).plain, 1);
        assert_eq!(ticks_per_move(&body, Some(300)).plain, 2);
        assert_eq!(ticks_per_move(&body, Some(200)).plain, MAX_TICKS_PER_MOVE);
    }

    #[test]
    fn agent_uses_current_hits() {
        let agent = Agent::new(1, Owner::Mine, Position::new(0, 0), &[Part::Attack, Part::Move]).with_hits(100);

        assert_eq!(agent.ticks_per_move().plain, MAX_TICKS_PER_MOVE);
    }
}
