use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, Color, HAND_SIZE, MAX_PLAYERS};
use crate::error::GameError;
use crate::rules::Direction;

/// Who chooses a seat's moves.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Automated,
}

/// Seat definition supplied when a game is built.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerConfig {
    pub name: String,
    pub kind: PlayerKind,
}

impl PlayerConfig {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Human,
        }
    }

    pub fn automated(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Automated,
        }
    }
}

/// Table-wide constants for a game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub num_players: usize,
    pub hand_size: usize,
}

impl GameSettings {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        if !(2..=MAX_PLAYERS).contains(&num_players) {
            return Err(GameError::InvalidConfiguration("players must be between 2 and 6"));
        }
        Ok(Self {
            num_players,
            hand_size: HAND_SIZE,
        })
    }
}

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Lobby,
    Playing,
    Finished { winner: PlayerId },
}

/// Public portion of a player's state that all opponents may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    pub hand_size: usize,
    pub is_current: bool,
}

/// What one seat is allowed to see: its own hand plus public information.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub status: GameStatus,
    pub self_player: PlayerId,
    pub current_player: PlayerId,
    pub direction: Direction,
    pub active_color: Color,
    pub top_card: Option<Card>,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub players: Vec<PlayerPublicState>,
    pub hand: Vec<Card>,
    pub thinking: bool,
    pub message: String,
}

impl GameStateView {
    pub fn self_state(&self) -> Option<&PlayerPublicState> {
        self.players.iter().find(|player| player.id == self.self_player)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    pub hand: Vec<Card>,
}

/// Full authoritative state, emitted after every mutation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSnapshot {
    pub status: GameStatus,
    pub players: Vec<PlayerSnapshot>,
    pub draw_pile: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub current_player: PlayerId,
    pub direction: Direction,
    pub active_color: Color,
    pub winner: Option<PlayerId>,
    pub message: String,
    pub thinking: bool,
}

impl GameSnapshot {
    pub fn top_card(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    pub fn winner_name(&self) -> Option<&str> {
        self.winner
            .and_then(|id| self.players.get(id))
            .map(|player| player.name.as_str())
    }

    /// Cards across draw pile, discard pile and every hand.
    pub fn card_count(&self) -> usize {
        self.draw_pile.len()
            + self.discard_pile.len()
            + self
                .players
                .iter()
                .map(|player| player.hand.len())
                .sum::<usize>()
    }
}
