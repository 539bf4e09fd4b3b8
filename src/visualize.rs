use std::fmt::Write;

use crate::action::Move;
use crate::card::{Card, Color, Value};
use crate::rules::{Direction, is_valid_move};
use crate::state::{GameStateView, GameStatus};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    /// Mark legal cards in the viewer's hand with `*`.
    pub show_playable: bool,
    pub show_pile_counts: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_playable: true,
            show_pile_counts: true,
        }
    }
}

pub fn render_state(state: &GameStateView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameStateView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match state.status {
        GameStatus::Lobby => String::from("Lobby"),
        GameStatus::Playing => String::from("Playing"),
        GameStatus::Finished { winner } => {
            let name = state
                .players
                .get(winner)
                .map(|player| player.name.as_str())
                .unwrap_or("?");
            format!("Finished (winner: {name})")
        }
    };
    let _ = writeln!(out, "Game status: {status}");
    let top = state
        .top_card
        .as_ref()
        .map(card_label)
        .unwrap_or_else(|| String::from("--"));
    let direction = match state.direction {
        Direction::Clockwise => "clockwise",
        Direction::CounterClockwise => "counter-clockwise",
    };
    let _ = writeln!(
        out,
        "Top card: {top}  |  Active color: {}  |  Direction: {direction}",
        state.active_color
    );
    if options.show_pile_counts {
        let _ = writeln!(
            out,
            "Draw pile: {}  |  Discard pile: {}",
            state.draw_pile_count, state.discard_pile_count
        );
    }
    let _ = writeln!(out, "Players:");
    for player in &state.players {
        let label_you = if player.id == state.self_player {
            " (You)"
        } else {
            ""
        };
        let current_tag = if player.is_current {
            if state.thinking {
                " <- thinking..."
            } else {
                " <- current"
            }
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "  {}{} - {} cards{}",
            player.name, label_you, player.hand_size, current_tag
        );
    }
    if state.hand.is_empty() {
        let _ = writeln!(out, "Hand: (empty)");
    } else {
        let entries: Vec<String> = state
            .hand
            .iter()
            .enumerate()
            .map(|(idx, card)| {
                let playable = options.show_playable
                    && state
                        .top_card
                        .as_ref()
                        .is_some_and(|top| is_valid_move(card, top, state.active_color));
                let marker = if playable { "*" } else { "" };
                format!("{idx}:{}{marker}", card_label(card))
            })
            .collect();
        let _ = writeln!(out, "Hand: {}", entries.join("  "));
    }
    if !state.message.is_empty() {
        let _ = writeln!(out, "> {}", state.message);
    }
    out
}

pub fn describe_move(state: &GameStateView, mv: &Move) -> String {
    match mv {
        Move::Play { hand_index, color } => {
            let card = state
                .hand
                .get(*hand_index)
                .map(card_label)
                .unwrap_or_else(|| String::from("--"));
            match color {
                Some(color) if state.hand.get(*hand_index).is_some_and(Card::is_wild) => {
                    format!("Play hand[{hand_index}] {card} as {color}")
                }
                _ => format!("Play hand[{hand_index}] {card}"),
            }
        }
        Move::Draw => String::from("Draw a card"),
        Move::Pass => String::from("Pass"),
    }
}

/// Short label such as `R5`, `GSkip`, `B+2`, `W` or `W+4`.
pub fn card_label(card: &Card) -> String {
    let color = match card.color() {
        Color::Red => "R",
        Color::Green => "G",
        Color::Blue => "B",
        Color::Yellow => "Y",
        Color::Wild => "W",
    };
    let value = match card.value() {
        Value::Number(n) => n.to_string(),
        Value::Skip => String::from("Skip"),
        Value::Reverse => String::from("Rev"),
        Value::DrawTwo => String::from("+2"),
        Value::Wild => String::new(),
        Value::WildDrawFour => String::from("+4"),
    };
    format!("{color}{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameBuilder;

    #[test]
    fn render_and_describe_include_expected_phrases() {
        let mut game = GameBuilder::new().build().expect("game");
        game.start().expect("start");
        let view = game.state_view(0).expect("state view");
        let text = render_state(&view);
        assert!(text.contains("You (You)"));
        assert!(text.contains("Hand:"));
        assert!(text.contains("Active color:"));
        assert!(text.contains("> Game started! Turn: You."));
        let desc = describe_move(&view, &Move::play(0));
        assert!(desc.starts_with("Play hand[0]"));
        assert_eq!(describe_move(&view, &Move::Draw), "Draw a card");
    }

    #[test]
    fn labels_are_compact() {
        assert_eq!(card_label(&Card::new(Color::Red, Value::Number(5))), "R5");
        assert_eq!(card_label(&Card::new(Color::Blue, Value::DrawTwo)), "B+2");
        assert_eq!(card_label(&Card::wild(Value::Wild)), "W");
        assert_eq!(card_label(&Card::wild(Value::WildDrawFour)), "W+4");
    }
}
