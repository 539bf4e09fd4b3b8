use std::io::{self, BufRead, Write};

use crate::card::Color;
use crate::state::GameStateView;
use crate::visualize::render_state;

/// A line of input from the human seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HumanCommand {
    Play { hand_index: usize, color: Option<Color> },
    Draw,
    Pass,
    Help,
    Quit,
}

/// Parses `<index> [color]`, `d`/`draw`, `p`/`pass`, `h`/`help` or `q`/`quit`.
pub fn parse_command(input: &str) -> Result<HumanCommand, String> {
    let mut parts = input.split_whitespace();
    let Some(head) = parts.next() else {
        return Err(String::from("Please enter a command."));
    };
    let command = match head.to_ascii_lowercase().as_str() {
        "d" | "draw" => HumanCommand::Draw,
        "p" | "pass" => HumanCommand::Pass,
        "h" | "help" | "?" => HumanCommand::Help,
        "q" | "quit" | "exit" => HumanCommand::Quit,
        other => {
            let Ok(hand_index) = other.parse::<usize>() else {
                return Err(format!("Invalid input: '{other}'. Type 'help' for commands."));
            };
            let color = match parts.next() {
                Some(raw) => match Color::parse(raw) {
                    Some(color) if color.is_chromatic() => Some(color),
                    _ => {
                        return Err(format!(
                            "Unknown color '{raw}'. Use red, green, blue or yellow."
                        ));
                    }
                },
                None => None,
            };
            return Ok(HumanCommand::Play { hand_index, color });
        }
    };
    Ok(command)
}

pub fn print_help() {
    println!("Commands:");
    println!("  <index>           Play the card at that hand position");
    println!("  <index> <color>   Play a wild card and name the new color (red/green/blue/yellow)");
    println!("  d, draw           Draw a card (you keep the turn and may play it)");
    println!("  p, pass           End your turn");
    println!("  q, quit           Leave the game");
}

/// Interactive prompt for the human seat on standard input.
pub struct HumanPrompt {
    name: String,
}

impl HumanPrompt {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Shows the table and reads commands until one parses. End of input
    /// counts as quitting.
    pub fn read_command(&self, state: &GameStateView) -> HumanCommand {
        println!("\n=== {}'s turn ===", self.name);
        println!("{}", render_state(state));
        let stdin = io::stdin();
        loop {
            print!("Selection: ");
            if io::stdout().flush().is_err() {
                eprintln!("failed to flush stdout");
            }
            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => return HumanCommand::Quit,
                Ok(_) => {}
                Err(_) => {
                    eprintln!("failed to read input");
                    continue;
                }
            }
            match parse_command(&input) {
                Ok(HumanCommand::Help) => print_help(),
                Ok(command) => return command,
                Err(message) => println!("{message}"),
            }
        }
    }
}

impl Default for HumanPrompt {
    fn default() -> Self {
        Self::new("You")
    }
}
