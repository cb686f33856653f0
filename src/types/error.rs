use std::fmt;

use crate::types::types::*;

/// Malformed input. An inconsistent chain is not an error: it solves to no candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    InvalidGenerator { reason: &'static str },
    ChainTooShort { len: usize },
    InvalidAnchor { reason: &'static str },
    InvalidNarrowing { reason: &'static str },
    NarrowingTooSelective { width: u64, required: u64 },
    ZeroModulus { index: usize },
    RollOutOfRange { index: usize, roll: Roll, modulus: Modulus },
    EmptyWindow { index: usize },
    StepsOverflow { index: usize },
    InvalidSweep { index: usize },
    InvalidBatchSize,
    SweepNotStreamed,
    WorkerSpawn { reason: String },
    WorkerPanicked,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidGenerator { reason } => write!(f, "invalid generator: {}", reason),
            SolveError::ChainTooShort { len } => {
                write!(f, "need at least 2 observations, got {}", len)
            }
            SolveError::InvalidAnchor { reason } => write!(f, "observation 0: {}", reason),
            SolveError::InvalidNarrowing { reason } => write!(f, "observation 1: {}", reason),
            SolveError::NarrowingTooSelective { width, required } => write!(
                f,
                "observation 1 interval is {} wide, needs more than {}; use a smaller modulus there",
                width, required
            ),
            SolveError::ZeroModulus { index } => write!(f, "observation {}: modulus is 0", index),
            SolveError::RollOutOfRange { index, roll, modulus } => write!(
                f,
                "observation {}: roll {} is impossible for modulus {}",
                index, roll, modulus
            ),
            SolveError::EmptyWindow { index } => {
                write!(f, "observation {}: extra_steps must be at least 1", index)
            }
            SolveError::StepsOverflow { index } => write!(
                f,
                "observation {}: cumulative step count does not fit in 64 bits",
                index
            ),
            SolveError::InvalidSweep { index } => write!(
                f,
                "hidden calls can only be added to observation 2 or later (got {})",
                index
            ),
            SolveError::InvalidBatchSize => write!(f, "batch_size must be at least 1"),
            SolveError::SweepNotStreamed => {
                write!(f, "hidden_calls is set; run the sweep through solve instead of a single stream")
            }
            SolveError::WorkerSpawn { reason } => write!(f, "cannot start a search worker: {}", reason),
            SolveError::WorkerPanicked => write!(f, "a search worker panicked"),
        }
    }
}

impl std::error::Error for SolveError {}
