use std::time::Duration;

use futures::future::BoxFuture;

use crate::card::{CHROMATIC_COLORS, Color, DEFAULT_WILD_COLOR, Value};
use crate::error::OracleError;
use crate::oracle::{Oracle, OracleCard, OracleRequest, OracleResponse};
use crate::rules::face_matches;

/// Rule-based oracle that plays "sensible" moves without search or learning.
///
/// In plain English:
/// - Play something whenever possible; drawing only happens with no legal card.
/// - Hold wild cards back while a colored card can be played, since they are
///   legal at any time.
/// - When the opponent is close to going out, prefer cards that hurt them
///   (Wild Draw Four, Draw Two, Skip, Reverse).
/// - Otherwise get rid of high numbers first and keep cards in the color we
///   hold most of.
/// - For wilds, name the color that is most common in the rest of the hand.
pub struct HeuristicOracle {
    think_time: Duration,
    pressure_threshold: usize,
}

impl HeuristicOracle {
    pub fn new() -> Self {
        Self {
            think_time: Duration::ZERO,
            pressure_threshold: 2,
        }
    }

    /// Waits `think_time` before answering, so callers can show the pending state.
    pub fn with_think_time(mut self, think_time: Duration) -> Self {
        self.think_time = think_time;
        self
    }

    /// Chooses a response for `request` without any delay.
    pub fn choose(&self, request: &OracleRequest) -> OracleResponse {
        let top = request.top_face();
        let best = request
            .hand
            .iter()
            .filter(|card| face_matches(card.face(), top, request.active_color))
            .max_by_key(|card| self.score(request, card));
        match best {
            Some(card) if card.color.is_chromatic() => OracleResponse::play(card.index, None),
            Some(card) => {
                OracleResponse::play(card.index, Some(preferred_color(request, card.index)))
            }
            None => OracleResponse::draw(),
        }
    }

    fn score(&self, request: &OracleRequest, card: &OracleCard) -> i32 {
        let under_pressure = request.opponent_card_count <= self.pressure_threshold;
        let value_score = match card.value {
            Value::Number(n) => n as i32 * 10,
            Value::Skip | Value::Reverse => 120,
            Value::DrawTwo => 140,
            // Wilds stay in hand unless nothing else fits.
            Value::Wild => -500,
            Value::WildDrawFour => -400,
        };
        let attack_bonus = if under_pressure && card.value.is_action() {
            1_000
        } else {
            0
        };
        let color_bonus = if card.color.is_chromatic() {
            color_count(request, card.color, Some(card.index)) as i32 * 15
        } else {
            0
        };
        // Stable tie-break toward lower hand indices.
        value_score + attack_bonus + color_bonus - card.index as i32
    }
}

impl Default for HeuristicOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl Oracle for HeuristicOracle {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn decide(&mut self, request: OracleRequest) -> BoxFuture<'_, Result<String, OracleError>> {
        Box::pin(async move {
            if !self.think_time.is_zero() {
                tokio::time::sleep(self.think_time).await;
            }
            self.choose(&request).to_json()
        })
    }
}

fn color_count(request: &OracleRequest, color: Color, exclude: Option<usize>) -> usize {
    request
        .hand
        .iter()
        .filter(|card| Some(card.index) != exclude && card.color == color)
        .count()
}

/// Most common chromatic color among the other cards in hand.
fn preferred_color(request: &OracleRequest, played: usize) -> Color {
    CHROMATIC_COLORS
        .iter()
        .copied()
        .max_by_key(|color| {
            let count = color_count(request, *color, Some(played));
            // Ties resolve to the earliest color in deck order.
            let order = CHROMATIC_COLORS.iter().position(|c| c == color).unwrap_or(0);
            (count, usize::MAX - order)
        })
        .unwrap_or(DEFAULT_WILD_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;

    #[test]
    fn keeps_wild_when_colored_card_fits() {
        let hand = vec![
            Card::wild(Value::Wild),
            Card::new(Color::Red, Value::Number(2)),
            Card::new(Color::Red, Value::Number(8)),
        ];
        let top = Card::new(Color::Red, Value::Number(5));
        let request = OracleRequest::new(&hand, &top, Color::Red, 6);
        let response = HeuristicOracle::new().choose(&request);
        assert_eq!(response, OracleResponse::play(2, None));
    }

    #[test]
    fn attacks_when_opponent_is_low() {
        let hand = vec![
            Card::new(Color::Blue, Value::Number(9)),
            Card::new(Color::Blue, Value::DrawTwo),
        ];
        let top = Card::new(Color::Blue, Value::Number(1));
        let request = OracleRequest::new(&hand, &top, Color::Blue, 1);
        let response = HeuristicOracle::new().choose(&request);
        assert_eq!(response.card_index, Some(1));
    }

    #[test]
    fn names_majority_color_for_wild() {
        let hand = vec![
            Card::new(Color::Green, Value::Number(3)),
            Card::wild(Value::WildDrawFour),
            Card::new(Color::Green, Value::Number(4)),
            Card::new(Color::Yellow, Value::Number(4)),
        ];
        let top = Card::new(Color::Red, Value::Number(7));
        let request = OracleRequest::new(&hand, &top, Color::Red, 5);
        let response = HeuristicOracle::new().choose(&request);
        assert_eq!(response, OracleResponse::play(1, Some(Color::Green)));
    }

    #[test]
    fn draws_without_legal_card() {
        let hand = vec![Card::new(Color::Green, Value::Number(3))];
        let top = Card::new(Color::Red, Value::Number(7));
        let request = OracleRequest::new(&hand, &top, Color::Red, 5);
        assert_eq!(HeuristicOracle::new().choose(&request), OracleResponse::draw());
    }
}
