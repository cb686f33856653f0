use std::ops::RangeInclusive;

use super::rng_lc::RngLC;
use crate::types::types::*;

/// A roll the game printed, as `[roll/modulus]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollCheck {
    pub roll: Roll,
    pub modulus: Modulus,
}

/// Walks the generator from an already solved seed.
pub struct SeedFinder {
    rng_lc: RngLC,
}

impl SeedFinder {
    pub fn new(rng_lc: RngLC) -> Self {
        Self { rng_lc }
    }

    /// Calls needed to go from `from` to `to`, if it happens within `limit` calls.
    pub fn count_hops(&self, from: Seed, to: Seed, limit: Steps) -> Option<Steps> {
        let mut seed = from;

        for hops in 1..=limit {
            seed = self.rng_lc.next(seed);
            if seed == to {
                return Some(hops);
            }
        }

        return None;
    }

    /// State `count` calls after `origin`; negative counts run the generator backwards.
    pub fn position(&self, origin: Seed, count: i64) -> Seed {
        if count >= 0 {
            return self.rng_lc.advance(origin, count as Steps);
        }
        return self.rng_lc.rewind(origin, count.unsigned_abs());
    }

    /*
        Once one battle is pinned down, the neighbouring battles sit roughly a known number of
        calls away. This scans every count in `window` (relative to `origin`) for an
        attacker/defender pair: `first` rolled at count x and `second` at x + 1.
        Returns (x, state at x) in ascending x.
    */
    pub fn find_roll_pair(
        &self,
        origin: Seed,
        window: RangeInclusive<i64>,
        first: RollCheck,
        second: RollCheck,
    ) -> Vec<(i64, Seed)> {
        let mut result: Vec<(i64, Seed)> = Vec::new();
        if window.is_empty() {
            return result;
        }

        let mut state = self.position(origin, *window.start());
        for count in window {
            let following = self.rng_lc.next(state);

            if self.rng_lc.roll(state, first.modulus) == first.roll
                && self.rng_lc.roll(following, second.modulus) == second.roll
            {
                result.push((count, state));
            }

            state = following;
        }

        return result;
    }
}
