use std::collections::BTreeMap;

use crate::modules::rng_lc::RngLC;
use crate::types::jump::Jump;
use crate::types::types::*;

/*
    n -> (a^n mod m, c * (a^(n-1) + ... + a + 1) mod m), memoized.
    A miss extends from the largest cached n' below n, so queries arriving in increasing order
    (the way the filter stages ask) only pay for the gap since the last one.
    One cache per pipeline; nothing here is shared between workers.
*/
pub struct PowerCache {
    rng_lc: RngLC,
    entries: BTreeMap<Steps, Jump>,
}

impl PowerCache {
    pub fn new(rng_lc: RngLC) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(0, Jump::IDENTITY);
        Self { rng_lc, entries }
    }

    pub fn power_and_residue(&mut self, n: Steps) -> (u64, u64) {
        let jump = self.jump(n);
        return (jump.multiplier, jump.increment);
    }

    pub fn jump(&mut self, n: Steps) -> Jump {
        if let Some(jump) = self.entries.get(&n) {
            return *jump;
        }

        let (cached_n, cached) = self
            .entries
            .range(..n)
            .next_back()
            .map(|(&k, &v)| (k, v))
            .unwrap_or((0, Jump::IDENTITY));

        let gap = self.rng_lc.jump(n - cached_n);
        let jump = cached.then(&gap, self.rng_lc.mask());
        self.entries.insert(n, jump);
        return jump;
    }

    pub fn apply(&mut self, seed: Seed, n: Steps) -> Seed {
        let mask = self.rng_lc.mask();
        return self.jump(n).apply(seed, mask);
    }

    pub fn mask(&self) -> u64 {
        return self.rng_lc.mask();
    }

    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }
}
