use serde::{Deserialize, Serialize};

use crate::types::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub seed: OriginSeed,
    pub anchor_seed: AnchorSeed,
    pub total_steps: Steps, // origin -> last observation
    pub trail: Vec<Steps>,  // cumulative offset since the anchor, one per observation
}

impl Candidate {
    pub fn sort_key(&self) -> (Seed, Steps) {
        return (self.seed, self.total_steps);
    }
}

/// Sorts by `(seed, total_steps)` and drops entries that repeat a key.
pub fn normalize(candidates: &mut Vec<Candidate>) {
    candidates.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()).then_with(|| a.trail.cmp(&b.trail)));
    candidates.dedup_by_key(|c| c.sort_key());
}
