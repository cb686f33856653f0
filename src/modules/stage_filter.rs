use itertools::Itertools;

use crate::modules::power_cache::PowerCache;
use crate::modules::rand_analyzer::RandAnalyzer;
use crate::types::error::SolveError;
use crate::types::interval::Interval;
use crate::types::observation::Observation;
use crate::types::types::*;

/// A state still consistent with every observation tested so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub anchor_seed: AnchorSeed,
    pub trail: Vec<Steps>,
}

impl Lead {
    pub fn narrowed(anchor_seed: AnchorSeed) -> Self {
        Self {
            anchor_seed,
            trail: vec![0, 1],
        }
    }

    pub fn steps(&self) -> Steps {
        return self.trail.last().copied().unwrap_or(0);
    }
}

/// "`step_offset` (+ up to `extra_steps - 1`) calls later, the roll satisfies the observation."
#[derive(Debug, Clone, Copy)]
pub struct StageFilter {
    pub target: Interval,
    pub step_offset: Steps,
    pub extra_steps: Steps,
}

impl StageFilter {
    pub fn compile(analyzer: &RandAnalyzer, index: usize, observation: &Observation) -> Result<Self, SolveError> {
        if observation.extra_steps == 0 {
            return Err(SolveError::EmptyWindow { index });
        }

        return Ok(Self {
            target: analyzer.target_interval(index, observation)?,
            step_offset: observation.step_offset,
            extra_steps: observation.extra_steps,
        });
    }

    /*
        Leads sharing a step count share every a^n/residue lookup, so the batch is grouped by
        step count first. A lead matching at several offsets of the window branches into one
        lead per offset.
    */
    pub fn apply(&self, cache: &mut PowerCache, mut leads: Vec<Lead>) -> Vec<Lead> {
        let mut survivors: Vec<Lead> = Vec::new();
        leads.sort_by_key(|lead| lead.steps());

        for (prev_steps, group) in &leads.iter().chunk_by(|lead| lead.steps()) {
            let group: Vec<&Lead> = group.collect();

            for extra in 0..self.extra_steps {
                // past u64::MAX calls nothing can match
                let Some(n) = prev_steps
                    .checked_add(self.step_offset)
                    .and_then(|n| n.checked_add(extra))
                else {
                    break;
                };
                let jump = cache.jump(n);
                let mask = cache.mask();

                for lead in &group {
                    if self.target.contains(jump.apply(lead.anchor_seed, mask)) {
                        let mut trail = lead.trail.clone();
                        trail.push(n);
                        survivors.push(Lead {
                            anchor_seed: lead.anchor_seed,
                            trail,
                        });
                    }
                }
            }
        }

        return survivors;
    }
}
