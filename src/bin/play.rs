use std::error::Error;
use std::process;
use std::time::Duration;

use clap::{ArgAction, Parser};

use unobot::{
    AdapterConfig, DecisionSource, GameBuilder, GameStatus, HumanCommand, HumanMove, HumanPrompt,
    MoveAdapter, PlayerConfig, PlayerKind, Session, create_oracle_from_spec, describe_move,
    render_state,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(name = "play", about = "Play heads-up UNO against an automated opponent.")]
struct Args {
    /// Seed for shuffling and seeded oracles
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Display name of the human seat
    #[arg(short = 'n', long = "name", default_value = "You")]
    name: String,

    /// Opponent oracle: heuristic[:think_ms], random[:seed] or cmd:<program> [args]
    #[arg(short = 'o', long = "opponent", default_value = "heuristic:800")]
    opponent: String,

    /// Milliseconds the oracle may take before the local fallback decides
    #[arg(long = "oracle-timeout-ms", default_value_t = 5_000)]
    oracle_timeout_ms: u64,

    /// Let a second heuristic oracle play the human seat
    #[arg(long = "autoplay", action = ArgAction::SetTrue)]
    autoplay: bool,

    /// Stop after the specified number of turns
    #[arg(long = "max-turns")]
    max_turns: Option<usize>,
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
    let first_seat = if args.autoplay {
        PlayerConfig::automated(args.name.clone())
    } else {
        PlayerConfig::human(args.name.clone())
    };
    let opponent_name = format!("Bot ({})", unobot::label_for_spec(&args.opponent));
    let game = GameBuilder::new()
        .with_players(vec![first_seat, PlayerConfig::automated(opponent_name)])
        .with_seed(args.seed)
        .build()?;

    let config = AdapterConfig {
        timeout: Duration::from_millis(args.oracle_timeout_ms),
        ..AdapterConfig::default()
    };
    let opponent = create_oracle_from_spec(&args.opponent, 1, args.seed)?;
    let mut session =
        Session::new(game).with_adapter(1, MoveAdapter::with_config(opponent, config))?;
    if args.autoplay {
        let stand_in = create_oracle_from_spec("heuristic", 0, args.seed)?;
        session = session.with_adapter(0, MoveAdapter::with_config(stand_in, config))?;
    }

    session.start()?;
    println!("{}", session.game().message());
    let prompt = HumanPrompt::new(args.name.clone());

    let mut turns = 0usize;
    while !session.game().is_finished() {
        if let Some(limit) = args.max_turns {
            if turns >= limit {
                println!("Max turn limit {limit} reached. Stopping.");
                break;
            }
        }
        let current = session.game().current_player();
        match session.game().player_kind(current)? {
            PlayerKind::Automated => {
                let name = session.game().player_name(current)?.to_string();
                println!("{name} is thinking...");
                let view = session.game().state_view(current)?;
                let decision = session.run_automated_turn().await?;
                if let Some(adapter) = session.adapter_mut(current) {
                    if let Some(failure) = adapter.take_failure() {
                        eprintln!(
                            "oracle {} failed, using fallback: {failure}",
                            adapter.oracle_name()
                        );
                    }
                }
                if decision.source == DecisionSource::Sanitized {
                    eprintln!("oracle proposed an unplayable move; drawing instead");
                }
                if args.autoplay {
                    println!("{name}: {}", describe_move(&view, &decision.mv));
                }
                println!("{}", session.game().message());
                turns += 1;
            }
            PlayerKind::Human => {
                let view = session.game().state_view(current)?;
                let mv = match prompt.read_command(&view) {
                    HumanCommand::Play { hand_index, color } => {
                        let needs_color = view
                            .hand
                            .get(hand_index)
                            .is_some_and(|card| card.is_wild());
                        if needs_color && color.is_none() {
                            println!("Wild cards need a color, e.g. `{hand_index} blue`.");
                            continue;
                        }
                        HumanMove::Play { hand_index, color }
                    }
                    HumanCommand::Draw => HumanMove::Draw,
                    HumanCommand::Pass => HumanMove::Pass,
                    HumanCommand::Help => continue,
                    HumanCommand::Quit => {
                        println!("Exiting game at user's request.");
                        return Ok(());
                    }
                };
                let ends_turn = !matches!(mv, HumanMove::Draw);
                match session.submit_human(current, mv) {
                    Ok(_) => {
                        if ends_turn {
                            turns += 1;
                        }
                    }
                    Err(err) => println!("{err}"),
                }
                println!("{}", session.game().message());
            }
        }
    }

    let snapshot = session.snapshot();
    if let GameStatus::Finished { .. } = snapshot.status {
        let final_view = session.game().state_view(0)?;
        println!("\n{}", render_state(&final_view));
        if let Some(name) = snapshot.winner_name() {
            println!("Game finished. Winner: {name}.");
        }
    } else {
        println!("Game stopped before completion.");
    }
    Ok(())
}
