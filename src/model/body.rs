use serde::{Deserialize, Serialize};

/// Hit points carried by every body part.
pub const BODYPART_HITS: u32 = 100;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Move,
    Work,
    Carry,
    Attack,
    RangedAttack,
    Heal,
    Tough,
}

impl Part {
    /// Fixed resource cost paid when the part is produced.
    pub fn cost(self) -> u32 {
        match self {
            Part::Move => 50,
            Part::Work => 100,
            Part::Carry => 50,
            Part::Attack => 80,
            Part::RangedAttack => 150,
            Part::Heal => 250,
            Part::Tough => 10,
        }
    }

    /// Parts that make an agent count toward a combat mob.
    pub fn is_combat(self) -> bool {
        matches!(self, Part::Attack | Part::RangedAttack | Part::Heal)
    }

    pub fn is_weapon(self) -> bool {
        matches!(self, Part::Attack | Part::RangedAttack)
    }
}

/// Nominal production cost of a body, ignoring damage.
pub fn body_cost(body: &[Part]) -> u32 {
    body.iter().map(|p| p.cost()).sum()
}

/// Number of parts disabled by damage. Every full `BODYPART_HITS` of missing
/// health disables one part.
pub fn disabled_part_count(body_len: usize, hits: u32) -> usize {
    let full_hits = body_len as u32 * BODYPART_HITS;
    let missing = full_hits.saturating_sub(hits);

    ((missing / BODYPART_HITS) as usize).min(body_len)
}

/// The still functioning prefix of a body. Damage disables parts starting
/// from the tail of the sequence.
pub fn living_body(body: &[Part], hits: Option<u32>) -> &[Part] {
    match hits {
        Some(hits) => {
            let disabled = disabled_part_count(body.len(), hits);

            &body[..body.len() - disabled]
        }
        None => body,
    }
}
