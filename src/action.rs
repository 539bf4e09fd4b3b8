use serde::{Deserialize, Serialize};

use crate::card::Color;

/// Zero-based seat index of a player within the game.
pub type PlayerId = usize;

/// Move a player can submit on their turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Move {
    /// Play the card at `hand_index`. `color` is the replacement active color
    /// and only matters for wild cards.
    Play {
        hand_index: usize,
        color: Option<Color>,
    },
    /// Draw one card instead of playing, ending the turn.
    Draw,
    /// End the turn without playing.
    Pass,
}

impl Move {
    pub fn play(hand_index: usize) -> Self {
        Move::Play {
            hand_index,
            color: None,
        }
    }

    pub fn play_wild(hand_index: usize, color: Color) -> Self {
        Move::Play {
            hand_index,
            color: Some(color),
        }
    }

    /// Returns the hand index if the move is a play.
    pub fn hand_index(&self) -> Option<usize> {
        match self {
            Move::Play { hand_index, .. } => Some(*hand_index),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, Move::Draw)
    }
}
