use std::collections::VecDeque;
use std::ops::RangeInclusive;
use std::sync::mpsc;
use std::thread;

use serde::{Deserialize, Serialize};

use super::interval_narrower::IntervalNarrower;
use super::power_cache::PowerCache;
use super::rand_analyzer::RandAnalyzer;
use super::rng_lc::RngLC;
use super::seed_checker::SeedChecker;
use super::stage_filter::{Lead, StageFilter};
use crate::types::candidate::{normalize, Candidate};
use crate::types::error::SolveError;
use crate::types::interval::Interval;
use crate::types::observation::{Observation, Relation};
use crate::types::types::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    pub observations: Vec<Observation>,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub hidden_calls: Option<HiddenCalls>,
}

/// Unlogged generator calls to try in front of one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenCalls {
    pub observation: usize,
    pub min: Steps,
    pub max: Steps,
}

fn default_workers() -> usize {
    return 1;
}

fn default_batch_size() -> usize {
    return 512;
}

impl SearchParams {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self {
            observations,
            workers: default_workers(),
            batch_size: default_batch_size(),
            hidden_calls: None,
        }
    }
}

/*
    Lazily produces verified candidates for one anchor interval.
    Leads are pulled from the narrowing stage `batch_size` at a time and pushed through every
    remaining stage before the next batch is pulled, so memory stays bounded by the batch.
*/
pub struct CandidateStream {
    narrower: IntervalNarrower,
    stages: Vec<StageFilter>,
    cache: PowerCache,
    checker: SeedChecker,
    rng_lc: RngLC,
    observations: Vec<Observation>,
    batch_size: usize,
    ready: VecDeque<Candidate>,
    stage_counts: Vec<u64>,
}

impl CandidateStream {
    /// Survivors per stage so far: anchor interval width, narrowed leads, each later stage, verified.
    pub fn stage_counts(&self) -> &[u64] {
        return &self.stage_counts;
    }

    fn process(&mut self, batch: Vec<Lead>) {
        let stage_total = self.stages.len() + 2;
        self.stage_counts[1] += batch.len() as u64;

        let mut leads = batch;
        for (i, stage) in self.stages.iter().enumerate() {
            leads = stage.apply(&mut self.cache, leads);
            self.stage_counts[i + 2] += leads.len() as u64;
            if leads.is_empty() {
                return;
            }
        }

        let origin_offset = self.observations[0].step_offset;
        for lead in leads {
            let seed = self.rng_lc.rewind(lead.anchor_seed, origin_offset);
            if !self.checker.replay(seed, &self.observations, &lead.trail) {
                continue;
            }

            self.stage_counts[stage_total] += 1;
            let Some(total_steps) = origin_offset.checked_add(lead.steps()) else {
                continue;
            };
            self.ready.push_back(Candidate {
                seed,
                anchor_seed: lead.anchor_seed,
                total_steps,
                trail: lead.trail,
            });
        }
    }
}

impl Iterator for CandidateStream {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            if let Some(candidate) = self.ready.pop_front() {
                return Some(candidate);
            }

            let batch: Vec<Lead> = self
                .narrower
                .by_ref()
                .take(self.batch_size)
                .map(Lead::narrowed)
                .collect();

            if batch.is_empty() {
                return None;
            }

            self.process(batch);
        }
    }
}

pub struct SeedSearcher {
    rng_lc: RngLC,
    rand_analyzer: RandAnalyzer,
}

impl SeedSearcher {
    pub fn new() -> Self {
        Self::with_rng(RngLC::new())
    }

    pub fn with_rng(rng_lc: RngLC) -> Self {
        Self {
            rng_lc,
            rand_analyzer: RandAnalyzer::new(rng_lc),
        }
    }

    /*
        Observation 0 fixes the anchor interval. Observation 1 must be the very next call, and is
        applied by walking the anchor interval with the narrowing jumps. Every later observation
        is a filter over the surviving leads.
    */
    pub fn anchor_interval(&self, observations: &[Observation]) -> Result<Interval, SolveError> {
        if observations.len() < 2 {
            return Err(SolveError::ChainTooShort {
                len: observations.len(),
            });
        }

        let anchor = &observations[0];
        if anchor.relation != Relation::Equal {
            return Err(SolveError::InvalidAnchor {
                reason: "relation must be equal",
            });
        }
        if anchor.extra_steps != 1 {
            return Err(SolveError::InvalidAnchor {
                reason: "extra_steps must be 1",
            });
        }

        return self.rand_analyzer.target_interval(0, anchor);
    }

    /// Total calls from the origin seed to the last offset any window allows.
    pub fn chain_length(observations: &[Observation]) -> Result<Steps, SolveError> {
        let mut total: Steps = 0;
        for (index, observation) in observations.iter().enumerate() {
            total = observation
                .extra_steps
                .saturating_sub(1)
                .checked_add(observation.step_offset)
                .and_then(|span| total.checked_add(span))
                .ok_or(SolveError::StepsOverflow { index })?;
        }
        return Ok(total);
    }

    /// The lazy form of `solve`, restricted to anchor states inside `partition`.
    pub fn candidates(
        &self,
        params: &SearchParams,
        partition: Option<Interval>,
    ) -> Result<CandidateStream, SolveError> {
        if params.batch_size == 0 {
            return Err(SolveError::InvalidBatchSize);
        }
        if params.hidden_calls.is_some() {
            return Err(SolveError::SweepNotStreamed);
        }

        let observations = &params.observations;
        let anchor_interval = self.anchor_interval(observations)?;
        Self::chain_length(observations)?;
        let prior = match partition {
            Some(part) => Interval::new(part.lo.max(anchor_interval.lo), part.hi.min(anchor_interval.hi)),
            None => anchor_interval,
        };

        let second = &observations[1];
        if second.relation != Relation::Equal {
            return Err(SolveError::InvalidNarrowing {
                reason: "relation must be equal",
            });
        }
        if second.step_offset != 1 || second.extra_steps != 1 {
            return Err(SolveError::InvalidNarrowing {
                reason: "must be the very next call (step_offset 1, extra_steps 1)",
            });
        }

        let target = self.rand_analyzer.target_interval(1, second)?;
        let narrower = IntervalNarrower::new(self.rng_lc, prior, target)?;

        let stages = observations
            .iter()
            .enumerate()
            .skip(2)
            .map(|(index, observation)| StageFilter::compile(&self.rand_analyzer, index, observation))
            .collect::<Result<Vec<StageFilter>, SolveError>>()?;

        let mut stage_counts = vec![0u64; stages.len() + 3];
        stage_counts[0] = prior.width();

        return Ok(CandidateStream {
            narrower,
            stages,
            cache: PowerCache::new(self.rng_lc),
            checker: SeedChecker::new(self.rng_lc),
            rng_lc: self.rng_lc,
            observations: observations.clone(),
            batch_size: params.batch_size,
            ready: VecDeque::new(),
            stage_counts,
        });
    }

    /*
        Every origin seed consistent with the chain, sorted and deduplicated. With `hidden_calls`
        set, this is the union over every swept count; each candidate's trail shows which count
        it came from.
    */
    pub fn solve(&self, params: &SearchParams) -> Result<Vec<Candidate>, SolveError> {
        if params.hidden_calls.is_some() {
            let mut result: Vec<Candidate> = self
                .solve_with_sweep(params)?
                .into_iter()
                .flat_map(|(_, candidates)| candidates)
                .collect();
            normalize(&mut result);
            return Ok(result);
        }

        if params.workers > 1 {
            return self.solve_partitioned(params);
        }

        let mut result: Vec<Candidate> = self.candidates(params, None)?.collect();
        normalize(&mut result);
        return Ok(result);
    }

    /*
        Splits the anchor interval into `workers` disjoint pieces and runs one pipeline per piece,
        each with its own power cache. Workers stream candidates into one channel; it closes once
        every sender is dropped.
    */
    pub fn solve_partitioned(&self, params: &SearchParams) -> Result<Vec<Candidate>, SolveError> {
        let anchor_interval = self.anchor_interval(&params.observations)?;
        let partitions = anchor_interval.split(worker_count(params.workers));

        // surface chain errors once, before any thread starts
        self.candidates(params, partitions.first().copied())?;

        let (sender, receiver) = mpsc::channel::<Candidate>();

        let outcome = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(partitions.len());
            let mut spawn_error: Option<SolveError> = None;

            for (i, &partition) in partitions.iter().enumerate() {
                let sender = sender.clone();
                let spawned = thread::Builder::new()
                    .name(format!("idleseed-worker-{}", i))
                    .spawn_scoped(scope, move || -> Result<(), SolveError> {
                        for candidate in self.candidates(params, Some(partition))? {
                            if sender.send(candidate).is_err() {
                                break;
                            }
                        }
                        Ok(())
                    });

                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        spawn_error = Some(SolveError::WorkerSpawn { reason: e.to_string() });
                        break;
                    }
                }
            }

            drop(sender);
            let mut result: Vec<Candidate> = receiver.iter().collect();

            for handle in handles {
                match handle.join() {
                    Ok(worker) => worker?,
                    Err(_) => return Err(SolveError::WorkerPanicked),
                }
            }

            if let Some(e) = spawn_error {
                return Err(e);
            }

            normalize(&mut result);
            Ok(result)
        });

        return outcome;
    }

    /// One `(hidden calls, candidates)` entry per swept count, or a single `(0, ..)` without a sweep.
    pub fn solve_with_sweep(&self, params: &SearchParams) -> Result<Vec<(Steps, Vec<Candidate>)>, SolveError> {
        return match params.hidden_calls {
            Some(hidden) => self.sweep_hidden_calls(params, hidden.observation, hidden.min..=hidden.max),
            None => Ok(vec![(0, self.solve(params)?)]),
        };
    }

    /*
        Hidden rand calls: the game sometimes burns calls nobody logged, which shifts every later
        observation. Each count in `calls` is added to `observations[at].step_offset` and solved on
        its own; the counts that yield candidates point at the real number of hidden calls.
    */
    pub fn sweep_hidden_calls(
        &self,
        params: &SearchParams,
        at: usize,
        calls: RangeInclusive<Steps>,
    ) -> Result<Vec<(Steps, Vec<Candidate>)>, SolveError> {
        if at < 2 || at >= params.observations.len() {
            return Err(SolveError::InvalidSweep { index: at });
        }

        let mut result: Vec<(Steps, Vec<Candidate>)> = Vec::new();

        for hidden in calls {
            let mut shifted = params.clone();
            shifted.hidden_calls = None;
            let offset = &mut shifted.observations[at].step_offset;
            *offset = offset
                .checked_add(hidden)
                .ok_or(SolveError::StepsOverflow { index: at })?;
            result.push((hidden, self.solve(&shifted)?));
        }

        return Ok(result);
    }
}

/// Threads for a partitioned search: at least one, at most what the machine runs in parallel.
fn worker_count(requested: usize) -> usize {
    let available = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    return requested.clamp(1, available);
}

impl Default for SeedSearcher {
    fn default() -> Self {
        Self::new()
    }
}
