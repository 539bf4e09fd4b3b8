//! Heads-up UNO engine with a pluggable, untrusted move oracle for the automated seat.

pub mod action;
pub mod adapter;
pub mod bots;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod oracle;
pub mod rules;
pub mod session;
pub mod state;
pub mod visualize;

pub use crate::action::{Move, PlayerId};
pub use crate::adapter::{
    AdapterConfig, Decision, DecisionSource, MoveAdapter, fallback_move, sanitize_response,
};
pub use crate::bots::registry::{create_oracle_from_spec, label_for_spec};
pub use crate::bots::{
    CommandOracle, HeuristicOracle, HumanCommand, HumanPrompt, RandomOracle, ScriptedOracle,
    ScriptedReply,
};
pub use crate::card::{Card, CardId, Color, Face, Value, standard_deck};
pub use crate::deck::{Deck, shuffle};
pub use crate::error::{GameError, InvalidAction, OracleError};
pub use crate::game::{Game, GameBuilder, GameConfig};
pub use crate::oracle::{Oracle, OracleCard, OracleRequest, OracleResponse, OracleTopCard};
pub use crate::rules::{
    Direction, PlayEffect, can_play_any, is_valid_move, next_player_index, playable_indices,
};
pub use crate::session::{HumanMove, Session};
pub use crate::state::{
    GameSettings, GameSnapshot, GameStateView, GameStatus, PlayerConfig, PlayerKind,
    PlayerPublicState, PlayerSnapshot,
};
pub use crate::visualize::{VisualOptions, card_label, describe_move, render_state};
