pub mod interval_narrower;
pub mod power_cache;
pub mod rand_analyzer;
pub mod rng_lc;
pub mod seed_checker;
pub mod seed_finder;
pub mod seed_searcher;
pub mod stage_filter;
