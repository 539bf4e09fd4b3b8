use std::time::Duration;

use thiserror::Error;

use crate::action::PlayerId;
use crate::card::Face;

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not the specified player's turn")]
    NotPlayersTurn,
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("game has not been started")]
    NotStarted,
    #[error("game is already in progress")]
    AlreadyStarted,
    #[error("game is already over")]
    GameOver,
    #[error("a move decision is pending")]
    DecisionPending,
    #[error("no move decision is pending")]
    NoDecisionPending,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Details of rejected moves.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("hand index {0} is out of range")]
    HandIndex(usize),
    #[error("{card} does not match the active color or the top card")]
    IllegalCard { card: Face },
    #[error("a wild card needs a chosen color")]
    MissingColor,
}

/// Failures of an external move source. These never reach the engine; the
/// adapter replaces them with its local fallback decision.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle transport failed: {0}")]
    Transport(String),
    #[error("oracle did not answer within {0:?}")]
    Timeout(Duration),
    #[error("malformed oracle response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("oracle i/o error: {0}")]
    Io(#[from] std::io::Error),
}
