use std::time::Duration;

use crate::action::Move;
use crate::card::{Color, DEFAULT_WILD_COLOR};
use crate::error::OracleError;
use crate::oracle::{Oracle, OracleRequest, OracleResponse};
use crate::rules::face_matches;

pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug)]
pub struct AdapterConfig {
    /// How long the oracle may take before the local fallback decides.
    pub timeout: Duration,
    /// Color named for wild cards when the fallback plays one.
    pub default_color: Color,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_ORACLE_TIMEOUT,
            default_color: DEFAULT_WILD_COLOR,
        }
    }
}

/// Where a decision came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionSource {
    /// The oracle's answer was legal and used as-is.
    Oracle,
    /// The oracle answered with an unplayable move, replaced by a draw.
    Sanitized,
    /// The oracle failed; the local first-legal-card policy decided.
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub mv: Move,
    pub source: DecisionSource,
}

/// Turns an untrusted [`Oracle`] into a source of moves that are always safe
/// to hand to the engine.
pub struct MoveAdapter {
    oracle: Box<dyn Oracle>,
    config: AdapterConfig,
    last_failure: Option<OracleError>,
}

impl MoveAdapter {
    pub fn new(oracle: Box<dyn Oracle>) -> Self {
        Self::with_config(oracle, AdapterConfig::default())
    }

    pub fn with_config(oracle: Box<dyn Oracle>, config: AdapterConfig) -> Self {
        Self {
            oracle,
            config,
            last_failure: None,
        }
    }

    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }

    pub fn config(&self) -> AdapterConfig {
        self.config
    }

    /// Takes the error behind the most recent fallback decision, if any.
    pub fn take_failure(&mut self) -> Option<OracleError> {
        self.last_failure.take()
    }

    /// Asks the oracle for a move. Never fails: transport errors, timeouts and
    /// undecodable payloads fall back to [`fallback_move`], and decoded answers
    /// are passed through [`sanitize_response`].
    pub async fn decide(&mut self, request: &OracleRequest) -> Decision {
        let timeout = self.config.timeout;
        let pending = self.oracle.decide(request.clone());
        let outcome = match tokio::time::timeout(timeout, pending).await {
            Ok(Ok(payload)) => {
                serde_json::from_str::<OracleResponse>(payload.trim()).map_err(OracleError::from)
            }
            Ok(Err(err)) => Err(err),
            Err(_) => Err(OracleError::Timeout(timeout)),
        };
        match outcome {
            Ok(response) => match sanitize_response(request, &response) {
                Some(mv) => Decision {
                    mv,
                    source: DecisionSource::Oracle,
                },
                None => Decision {
                    mv: Move::Draw,
                    source: DecisionSource::Sanitized,
                },
            },
            Err(err) => {
                self.last_failure = Some(err);
                Decision {
                    mv: fallback_move(request, self.config.default_color),
                    source: DecisionSource::Fallback,
                }
            }
        }
    }
}

/// Converts a decoded oracle answer into a move, or `None` when the answer
/// names a card that cannot be played: negative or out-of-range index, a card
/// failing the legality check, or a wild card without a chromatic color.
pub fn sanitize_response(request: &OracleRequest, response: &OracleResponse) -> Option<Move> {
    let Some(raw_index) = response.card_index else {
        return Some(Move::Draw);
    };
    let index = usize::try_from(raw_index).ok()?;
    let card = request.hand.get(index)?;
    if !face_matches(card.face(), request.top_face(), request.active_color) {
        return None;
    }
    if !card.color.is_chromatic() {
        let color = response.chosen_color.filter(Color::is_chromatic)?;
        return Some(Move::play_wild(index, color));
    }
    Some(Move::play(index))
}

/// Deterministic local policy: the first legal card in hand, naming
/// `default_color` for wilds, otherwise draw.
pub fn fallback_move(request: &OracleRequest, default_color: Color) -> Move {
    let top = request.top_face();
    request
        .hand
        .iter()
        .position(|card| face_matches(card.face(), top, request.active_color))
        .map(|index| {
            if request.hand[index].color.is_chromatic() {
                Move::play(index)
            } else {
                Move::play_wild(index, default_color)
            }
        })
        .unwrap_or(Move::Draw)
}
