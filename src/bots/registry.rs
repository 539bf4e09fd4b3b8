use std::error::Error;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bots::{CommandOracle, HeuristicOracle, RandomOracle};
use crate::oracle::Oracle;

/// Returns a normalized label for an oracle spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Create an oracle from a CLI-style spec.
/// Supported specs:
/// - heuristic[:think_ms]
/// - random[:seed]
/// - cmd:<program> [args...]
pub fn create_oracle_from_spec(
    spec: &str,
    index: usize,
    seed: u64,
) -> Result<Box<dyn Oracle>, Box<dyn Error>> {
    let argument = spec.split_once(':').map(|(_, rest)| rest.trim());
    match label_for_spec(spec).as_str() {
        "heuristic" => {
            let think_ms = match argument {
                Some(raw) => raw
                    .parse::<u64>()
                    .map_err(|_| format!("invalid think time: {raw}"))?,
                None => 0,
            };
            Ok(Box::new(
                HeuristicOracle::new().with_think_time(Duration::from_millis(think_ms)),
            ))
        }
        "random" => {
            let custom_seed = argument
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(seed ^ ((index as u64 + 1) * 0x9E37_79B9));
            Ok(Box::new(RandomOracle::new(StdRng::seed_from_u64(custom_seed))))
        }
        "cmd" => {
            let line = argument.ok_or("cmd oracle requires a program, e.g. cmd:./my-oracle")?;
            let oracle = CommandOracle::from_command_line(line)
                .ok_or("cmd oracle requires a program, e.g. cmd:./my-oracle")?;
            Ok(Box::new(oracle))
        }
        _ => Err(format!("unrecognized oracle spec: {spec}").into()),
    }
}
