pub mod constants;
pub mod modules;
pub mod types;

use wasm_bindgen::prelude::*;

use crate::modules::rng_lc::RngLC;
use crate::modules::seed_checker::SeedChecker;
use crate::modules::seed_searcher::{SearchParams, SeedSearcher};
use crate::types::observation::Observation;

pub use crate::types::candidate::Candidate;
pub use crate::types::error::SolveError;

/// `SearchParams` in, `Candidate[]` out. Runs on the calling thread; `workers` is ignored.
/// With `hidden_calls` set, the candidates of every swept count are returned together.
#[wasm_bindgen]
pub fn guess_seed(params: JsValue) -> Result<JsValue, JsValue> {
    let mut params: SearchParams = serde_wasm_bindgen::from_value(params)?;
    params.workers = 1;

    let candidates = SeedSearcher::new()
        .solve(&params)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    return Ok(serde_wasm_bindgen::to_value(&candidates)?);
}

#[wasm_bindgen]
pub fn verify_seed(seed: u64, observations: JsValue) -> Result<bool, JsValue> {
    let observations: Vec<Observation> = serde_wasm_bindgen::from_value(observations)?;
    return Ok(SeedChecker::new(RngLC::new()).verify(seed, &observations));
}
