use crate::constants::rand48::EPSILON_MARGIN;
use crate::modules::rng_lc::RngLC;
use crate::types::error::SolveError;
use crate::types::interval::Interval;
use crate::types::observation::{Observation, Relation};
use crate::types::types::*;

/// Turns observed rolls into intervals of generator states.
pub struct RandAnalyzer {
    rng_lc: RngLC,
}

impl RandAnalyzer {
    pub fn new(rng_lc: RngLC) -> Self {
        Self { rng_lc }
    }

    pub fn extract_roll(&self, seed: Seed, modulus: Modulus) -> Roll {
        return self.rng_lc.roll(seed, modulus);
    }

    /*
        Every state s with floor(s * modulus / m) == roll, plus a few states of slack on both ends.
        The bounds are computed in float64 and rounded outward, so the result may hold a stray
        neighbour but never misses a real one; exact replay discards the strays later.
    */
    pub fn interval_for_roll(&self, roll: Roll, modulus: Modulus) -> Option<Interval> {
        if modulus == 0 || roll >= modulus {
            return None;
        }

        let m = self.rng_lc.modulus() as f64;
        let step = m / modulus as f64;
        let lo = (roll as f64 * step * (1.0 - EPSILON_MARGIN)).ceil();
        let hi = ((roll + 1) as f64 * step * (1.0 + EPSILON_MARGIN)).floor();

        return Some(Interval::new(lo as Seed, (hi as Seed).min(self.rng_lc.mask())));
    }

    /// Every state whose roll against `modulus` is below `roll`.
    pub fn interval_below(&self, roll: Roll, modulus: Modulus) -> Option<Interval> {
        if modulus == 0 || roll == 0 || roll > modulus {
            return None;
        }

        let top = self.interval_for_roll(roll - 1, modulus)?;
        return Some(Interval::new(0, top.hi));
    }

    /// Interval a state must fall in to satisfy the observation at `index` of a chain.
    pub fn target_interval(&self, index: usize, observation: &Observation) -> Result<Interval, SolveError> {
        if observation.modulus == 0 {
            return Err(SolveError::ZeroModulus { index });
        }

        let interval = match observation.relation {
            Relation::Equal => self.interval_for_roll(observation.roll, observation.modulus),
            Relation::LessThan => self.interval_below(observation.roll, observation.modulus),
        };

        return interval.ok_or(SolveError::RollOutOfRange {
            index,
            roll: observation.roll,
            modulus: observation.modulus,
        });
    }
}
