use crate::modules::rng_lc::RngLC;
use crate::types::error::SolveError;
use crate::types::interval::Interval;
use crate::types::types::*;

/*
    Yields every s in `prior` whose next state lands in `target`.

    s -> a*s + c (mod m) climbs by a per unit of s and wraps rarely, so a run of misses below the
    target is crossed in one jump of ceil((target.lo - s') / a), and a run above it by jumping far
    enough to wrap past m back to target.lo. Work is proportional to the matches plus one jump per
    run of them, not to the width of `prior`.

    The target must be wider than 2a so that every jump lands inside it.
*/
pub struct IntervalNarrower {
    rng_lc: RngLC,
    target: Interval,
    end: Seed,
    seed: Seed,
    mapped: Seed,
    exhausted: bool,
}

impl IntervalNarrower {
    pub fn new(rng_lc: RngLC, prior: Interval, target: Interval) -> Result<Self, SolveError> {
        let required = rng_lc.multiplier().saturating_mul(2);
        if target.width() <= required {
            return Err(SolveError::NarrowingTooSelective {
                width: target.width(),
                required,
            });
        }

        return Ok(Self {
            rng_lc,
            target,
            end: prior.hi,
            seed: prior.lo,
            mapped: rng_lc.next(prior.lo),
            exhausted: prior.is_empty(),
        });
    }

    fn skip(&mut self, distance: u64) {
        let a = self.rng_lc.multiplier();
        self.seed = self.seed.saturating_add(distance.div_ceil(a));
        self.mapped = self.rng_lc.next(self.seed);

        assert!(
            self.seed > self.end || self.mapped.wrapping_sub(self.target.lo) < a,
            "jump from {} overshot target [{}, {}]",
            self.seed,
            self.target.lo,
            self.target.hi
        );
    }
}

impl Iterator for IntervalNarrower {
    type Item = Seed;

    fn next(&mut self) -> Option<Seed> {
        loop {
            if self.exhausted || self.seed > self.end {
                self.exhausted = true;
                return None;
            }

            if self.mapped < self.target.lo {
                self.skip(self.target.lo - self.mapped);
                continue;
            }

            if self.mapped > self.target.hi {
                self.skip(self.target.lo + self.rng_lc.modulus() - self.mapped);
                continue;
            }

            let found = self.seed;
            self.seed += 1;
            self.mapped += self.rng_lc.multiplier();
            if self.mapped >= self.rng_lc.modulus() {
                self.mapped -= self.rng_lc.modulus();
            }

            return Some(found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::rand_analyzer::RandAnalyzer;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn small_rng() -> RngLC {
        return RngLC::with_params(69069, 1, 20).unwrap();
    }

    fn brute_force(rng: &RngLC, prior: Interval, target: Interval) -> Vec<Seed> {
        return (prior.lo..=prior.hi)
            .filter(|&s| target.contains(rng.next(s)))
            .collect();
    }

    #[test]
    fn whole_space_matches_brute_force() {
        let rng = small_rng();
        let analyzer = RandAnalyzer::new(rng);
        let prior = Interval::new(0, rng.mask());
        let target = analyzer.interval_for_roll(6, 7).unwrap();

        let narrowed: Vec<Seed> = IntervalNarrower::new(rng, prior, target).unwrap().collect();
        assert_eq!(narrowed, brute_force(&rng, prior, target));
    }

    #[test]
    fn finds_fixture_state_in_48_bit_space() {
        let rng = RngLC::new();
        let analyzer = RandAnalyzer::new(rng);
        let anchor = rng.advance(224491502306380, 3);
        let prior = Interval::new(anchor - 5_000_000, anchor + 5_000_000);
        let target = analyzer.interval_for_roll(367, 439).unwrap();

        let narrowed: Vec<Seed> = IntervalNarrower::new(rng, prior, target).unwrap().collect();
        assert!(narrowed.contains(&anchor));
        assert!(narrowed.iter().all(|&s| target.contains(rng.next(s))));
        assert!(narrowed.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn refuses_targets_narrower_than_twice_the_multiplier() {
        let rng = RngLC::new();
        let analyzer = RandAnalyzer::new(rng);
        let target = analyzer.interval_for_roll(0, 10_000).unwrap();
        let result = IntervalNarrower::new(rng, Interval::new(0, 100), target);

        assert!(matches!(result, Err(SolveError::NarrowingTooSelective { .. })));
    }

    #[test]
    fn empty_prior_yields_nothing() {
        let rng = small_rng();
        let analyzer = RandAnalyzer::new(rng);
        let target = analyzer.interval_for_roll(0, 3).unwrap();
        let mut narrower = IntervalNarrower::new(rng, Interval::new(10, 9), target).unwrap();
        assert_eq!(narrower.next(), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn matches_brute_force(
            modulus in 2u64..=7,
            roll_seed in any::<u64>(),
            lo in 0u64..(1u64 << 20),
            len in 0u64..50_000,
        ) {
            let rng = small_rng();
            let analyzer = RandAnalyzer::new(rng);
            let target = analyzer.interval_for_roll(roll_seed % modulus, modulus).unwrap();
            let prior = Interval::new(lo, (lo + len).min(rng.mask()));

            let narrowed: Vec<Seed> = IntervalNarrower::new(rng, prior, target).unwrap().collect();
            prop_assert_eq!(narrowed, brute_force(&rng, prior, target));
        }
    }
}
