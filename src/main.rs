use std::env;
use std::fs;
use std::process::ExitCode;

use idleseed::modules::seed_searcher::{SearchParams, SeedSearcher};
use idleseed::types::candidate::{normalize, Candidate};

/*
    idleseed <params.json>

    params.json:
    {
      "observations": [
        { "relation": "equal", "roll": 81,  "modulus": 353, "step_offset": 3 },
        { "relation": "equal", "roll": 367, "modulus": 439, "step_offset": 1 },
        { "relation": "equal", "roll": 312, "modulus": 439, "step_offset": 21605, "extra_steps": 2 }
      ],
      "workers": 4,
      "hidden_calls": { "observation": 2, "min": 0, "max": 15 }
    }
*/
fn main() -> ExitCode {
    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: idleseed <params.json>");
        return ExitCode::from(2);
    };

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("cannot read {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let params: SearchParams = match serde_json::from_str(&content) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("cannot parse {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let searcher = SeedSearcher::new();

    let outcome = match params.hidden_calls {
        Some(hidden) => searcher.solve_with_sweep(&params).map(|sweep| {
            for (calls, candidates) in sweep {
                println!("--- hidden calls before observation {}: {}", hidden.observation, calls);
                print_candidates(&candidates);
            }
        }),
        None => run(&searcher, &params),
    };

    if let Err(e) = outcome {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    return ExitCode::SUCCESS;
}

fn run(searcher: &SeedSearcher, params: &SearchParams) -> Result<(), idleseed::SolveError> {
    if params.workers > 1 {
        let candidates = searcher.solve_partitioned(params)?;
        print_candidates(&candidates);
        return Ok(());
    }

    let mut stream = searcher.candidates(params, None)?;
    let mut candidates: Vec<Candidate> = stream.by_ref().collect();
    normalize(&mut candidates);

    for (stage, count) in stream.stage_counts().iter().enumerate() {
        println!("stage {:>2} : {:>16} survivors", stage, count);
    }
    print_candidates(&candidates);
    return Ok(());
}

fn print_candidates(candidates: &[Candidate]) {
    if candidates.is_empty() {
        println!("no seed fits; check the step offsets for hidden calls");
        return;
    }

    println!("{:>15} {:>15} {:>10}  trail", "seed", "anchor", "steps");
    for candidate in candidates {
        println!(
            "{:>15} {:>15} {:>10}  {:?}",
            candidate.seed, candidate.anchor_seed, candidate.total_steps, candidate.trail
        );
    }

    if candidates.len() > 1 {
        println!("{} candidates; add another observation to tell them apart", candidates.len());
    }
}
