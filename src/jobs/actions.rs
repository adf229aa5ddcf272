use bitflags::*;

// Action pipelines. Actions sharing a bit are mutually exclusive within a
// tick, actions on different bits can be issued together.
//
//   melee:    attack
//   ranged:   ranged attack, ranged heal
//   heal:     heal
//   logistic: withdraw, transfer
//   pull:     pull
//
// So a healer may heal and ranged attack in one tick, but never heal and
// ranged heal.

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct SimultaneousActionFlags: u8 {
        const UNSET = 0;

        const MOVE = 1;

        const ATTACK = 1 << 1;

        const RANGED_ATTACK = 1 << 2;
        const RANGED_HEAL   = 1 << 2;

        const HEAL = 1 << 3;

        const WITHDRAW = 1 << 4;
        const TRANSFER = 1 << 4;

        const PULL = 1 << 5;
    }
}

impl SimultaneousActionFlags {
    /// Claims the pipelines in `flags`. Fails without claiming anything if any
    /// of them is already taken.
    pub fn consume(&mut self, flags: SimultaneousActionFlags) -> bool {
        if !self.intersects(flags) {
            self.insert(flags);

            true
        } else {
            false
        }
    }
}
