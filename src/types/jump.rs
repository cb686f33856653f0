use crate::types::types::Seed;

/// `seed -> multiplier * seed + increment (mod 2^bits)`, the closed form
/// of `n` generator steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub multiplier: u64,
    pub increment: u64,
}

impl Jump {
    pub const IDENTITY: Jump = Jump {
        multiplier: 1,
        increment: 0,
    };

    pub fn apply(&self, seed: Seed, mask: u64) -> Seed {
        return self.multiplier.wrapping_mul(seed).wrapping_add(self.increment) & mask;
    }

    /// `self` first, then `then`.
    pub fn then(&self, then: &Jump, mask: u64) -> Jump {
        return Jump {
            multiplier: then.multiplier.wrapping_mul(self.multiplier) & mask,
            increment: then
                .multiplier
                .wrapping_mul(self.increment)
                .wrapping_add(then.increment)
                & mask,
        };
    }
}
