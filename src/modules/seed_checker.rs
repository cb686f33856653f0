use crate::modules::rng_lc::RngLC;
use crate::types::observation::Observation;
use crate::types::types::*;

/// Exact replay of a seed against an observation chain, one generator call at a time.
pub struct SeedChecker {
    rng_lc: RngLC,
}

impl SeedChecker {
    pub fn new(rng_lc: RngLC) -> Self {
        Self { rng_lc }
    }

    /*
        True when some choice of offsets inside every observation's window reproduces the chain
        from `seed`. Windows are explored depth first, like a player walking the log by hand.
        Nothing is memoized: the worst case walks every combination of offsets, i.e. the product
        of all `extra_steps` times the calls in the chain. Prefer `replay` once a trail is known.
    */
    pub fn verify(&self, seed: OriginSeed, observations: &[Observation]) -> bool {
        if seed == 0 || seed > self.rng_lc.mask() || observations.is_empty() {
            return false;
        }

        return self.verify_from(seed, observations);
    }

    fn verify_from(&self, state: Seed, observations: &[Observation]) -> bool {
        let Some((observation, rest)) = observations.split_first() else {
            return true;
        };

        let mut state = self.step(state, observation.step_offset);
        for extra in 0..observation.extra_steps {
            if extra > 0 {
                state = self.rng_lc.next(state);
            }
            if self.matches(state, observation) && self.verify_from(state, rest) {
                return true;
            }
        }

        return false;
    }

    /*
        Replays one recorded path: `trail[i]` is the cumulative call count since the anchor at
        which observation i matched (trail[0] == 0). Each gap must sit inside that observation's
        window.
    */
    pub fn replay(&self, seed: OriginSeed, observations: &[Observation], trail: &[Steps]) -> bool {
        if seed == 0 || seed > self.rng_lc.mask() || observations.is_empty() || observations.len() != trail.len() {
            return false;
        }

        let mut state = self.step(seed, observations[0].step_offset);
        if trail[0] != 0 || !self.matches(state, &observations[0]) {
            return false;
        }

        for (i, observation) in observations.iter().enumerate().skip(1) {
            let Some(gap) = trail[i].checked_sub(trail[i - 1]) else {
                return false;
            };

            let Some(last) = observation
                .extra_steps
                .checked_sub(1)
                .and_then(|extra| observation.step_offset.checked_add(extra))
            else {
                return false;
            };
            if !(observation.step_offset..=last).contains(&gap) {
                return false;
            }

            state = self.step(state, gap);
            if !self.matches(state, observation) {
                return false;
            }
        }

        return true;
    }

    fn matches(&self, state: Seed, observation: &Observation) -> bool {
        return observation.accepts(self.rng_lc.roll(state, observation.modulus));
    }

    fn step(&self, seed: Seed, n: Steps) -> Seed {
        let mut state = seed;
        for _ in 0..n {
            state = self.rng_lc.next(state);
        }
        return state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_chain() -> Vec<Observation> {
        return vec![
            Observation::equal(81, 353, 3),
            Observation::equal(367, 439, 1),
            Observation::equal(312, 439, 21606 - 1),
            Observation::equal(254, 440, 1),
            Observation::equal(104, 353, 21608 - 1),
            Observation::equal(386, 440, 1),
            Observation::equal(303, 353, 21606 - 1),
            Observation::equal(176, 439, 1),
        ];
    }

    #[test]
    fn logged_seed_replays_whole_chain() {
        let checker = SeedChecker::new(RngLC::new());
        let chain = fixture_chain();
        let trail = [0, 1, 21606, 21607, 43214, 43215, 64820, 64821];

        assert!(checker.verify(224491502306380, &chain));
        assert!(checker.replay(224491502306380, &chain, &trail));
        assert!(!checker.verify(224491502306381, &chain));
    }

    #[test]
    fn shifted_offset_breaks_replay_but_window_recovers_it() {
        let checker = SeedChecker::new(RngLC::new());
        let mut chain = fixture_chain();
        chain[4].step_offset -= 2;
        assert!(!checker.verify(224491502306380, &chain));

        chain[4].extra_steps = 3;
        assert!(checker.verify(224491502306380, &chain));
    }

    #[test]
    fn replay_rejects_gaps_outside_window() {
        let checker = SeedChecker::new(RngLC::new());
        let chain = fixture_chain();
        let trail = [0, 1, 21607, 21608, 43215, 43216, 64821, 64822];
        assert!(!checker.replay(224491502306380, &chain, &trail));
        assert!(!checker.replay(224491502306380, &chain, &trail[..3]));
    }

    #[test]
    fn rejects_states_outside_generator() {
        let checker = SeedChecker::new(RngLC::new());
        assert!(!checker.verify(1 << 48, &fixture_chain()));
        assert!(!checker.verify(224491502306380, &[]));
    }

    #[test]
    fn zero_is_not_a_seed() {
        let checker = SeedChecker::new(RngLC::new());
        // roll < 1 out of 1 holds for every state
        let chain = [Observation::less_than(1, 1, 0)];

        assert!(checker.verify(1, &chain));
        assert!(!checker.verify(0, &chain));
        assert!(checker.replay(1, &chain, &[0]));
        assert!(!checker.replay(0, &chain, &[0]));
    }

    #[test]
    fn window_ending_past_u64_is_rejected_not_overflowed() {
        let checker = SeedChecker::new(RngLC::new());
        let chain = [
            Observation::less_than(1, 1, 0),
            Observation::less_than(1, 1, u64::MAX).with_extra_steps(2),
        ];
        assert!(!checker.replay(1, &chain, &[0, 3]));
    }

    #[test]
    fn verify_agrees_with_replay_on_windowed_chain() {
        let checker = SeedChecker::new(RngLC::new());
        let mut chain = fixture_chain();
        chain[2] = Observation::equal(312, 439, 21603).with_extra_steps(4);
        chain[4] = Observation::equal(104, 353, 21605).with_extra_steps(3);

        assert!(checker.verify(224491502306380, &chain));
        assert!(checker.replay(224491502306380, &chain, &[0, 1, 21606, 21607, 43214, 43215, 64820, 64821]));
    }
}
