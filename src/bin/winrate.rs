use std::error::Error;
use std::process;
use std::time::{Duration, Instant};

use clap::Parser;

use unobot::{
    AdapterConfig, DecisionSource, GameBuilder, MoveAdapter, PlayerConfig, Session,
    create_oracle_from_spec, label_for_spec,
};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xC0FFEE_u64 << 32 | 0x5EED_u64;

#[derive(Parser, Debug)]
#[command(
    name = "winrate",
    about = "Run many headless games between two oracles and report win rates."
)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 200)]
    games: usize,

    /// Base RNG seed (deck and oracle RNGs are derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Safety cap on turns per game; games exceeding this count as unfinished
    #[arg(long = "max-turns", default_value_t = 2000)]
    max_turns: usize,

    /// Milliseconds each oracle may take before the local fallback decides
    #[arg(long = "oracle-timeout-ms", default_value_t = 5_000)]
    oracle_timeout_ms: u64,

    /// The two oracle specs, e.g. `heuristic random`
    oracles: Vec<String>,
}

#[derive(Default)]
struct Tally {
    wins: usize,
    decisions: usize,
    fallbacks: usize,
    sanitized: usize,
    decision_time: Duration,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    if let Err(err) = run(args).await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args.oracles.len() != 2 {
        return Err(format!(
            "expected exactly 2 oracle specs, received {}",
            args.oracles.len()
        )
        .into());
    }
    let config = AdapterConfig {
        timeout: Duration::from_millis(args.oracle_timeout_ms),
        ..AdapterConfig::default()
    };

    let mut tallies: [Tally; 2] = Default::default();
    let mut unfinished = 0usize;

    for game_idx in 0..args.games {
        // Alternate seating so neither spec always moves first.
        let seating = if game_idx % 2 == 0 { [0, 1] } else { [1, 0] };
        let players = seating
            .iter()
            .map(|&spec| {
                let label = label_for_spec(&args.oracles[spec]);
                PlayerConfig::automated(format!("{label} #{spec}"))
            })
            .collect();
        let game = GameBuilder::new()
            .with_players(players)
            .with_seed(mix_seed(args.seed, game_idx as u64, 0x5EED_15))
            .build()?;

        let mut session = Session::new(game);
        for (seat, &spec) in seating.iter().enumerate() {
            let oracle_seed = mix_seed(args.seed, game_idx as u64, seat as u64);
            let oracle = create_oracle_from_spec(&args.oracles[spec], seat, oracle_seed)?;
            session = session.with_adapter(seat, MoveAdapter::with_config(oracle, config))?;
        }
        session.start()?;

        let mut turns = 0usize;
        while session.awaiting_automated() && turns < args.max_turns {
            let seat = session.game().current_player();
            let tally = &mut tallies[seating[seat]];
            let t0 = Instant::now();
            let decision = session.run_automated_turn().await?;
            tally.decision_time += t0.elapsed();
            tally.decisions += 1;
            match decision.source {
                DecisionSource::Oracle => {}
                DecisionSource::Sanitized => tally.sanitized += 1,
                DecisionSource::Fallback => tally.fallbacks += 1,
            }
            turns += 1;
        }

        match session.game().winner() {
            Some(winner) => tallies[seating[winner]].wins += 1,
            None => unfinished += 1,
        }
    }

    println!("Win rates over {} game(s):", args.games);
    for (spec, tally) in args.oracles.iter().zip(&tallies) {
        let rate = if args.games > 0 {
            tally.wins as f64 / args.games as f64
        } else {
            0.0
        };
        let avg_ms = if tally.decisions > 0 {
            tally.decision_time.as_secs_f64() * 1.0e3 / tally.decisions as f64
        } else {
            0.0
        };
        println!(
            "  {spec:<16}  {}/{}  ({:.2}%)   decisions: {:<7}  fallback: {:<5}  sanitized: {:<5}  avg: {avg_ms:.3} ms",
            tally.wins,
            args.games,
            rate * 100.0,
            tally.decisions,
            tally.fallbacks,
            tally.sanitized,
        );
    }
    if unfinished > 0 {
        println!("\nNote: {unfinished} game(s) hit the turn cap without a winner.");
    }
    Ok(())
}

fn mix_seed(base: u64, a: u64, b: u64) -> u64 {
    let mut z =
        base ^ (a.wrapping_mul(0x9E37_79B97F4A7C15)) ^ (b.wrapping_mul(0xBF58_476D1CE4E5B9));
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}
