//! Move legality, turn order and special-card effects.

use serde::{Deserialize, Serialize};

use crate::action::{Move, PlayerId};
use crate::card::{Card, Color, Face, Value};
use crate::error::InvalidAction;

/// Whether `candidate` may be played on `top` while `active_color` is in force.
///
/// Wild cards are always legal, including WILD_DRAW_FOUR.
#[inline]
pub fn is_valid_move(candidate: &Card, top: &Card, active_color: Color) -> bool {
    face_matches(candidate.face(), top.face(), active_color)
}

/// Face-level form of [`is_valid_move`], used where only faces are known
/// (for example when checking an oracle's view of a hand).
pub fn face_matches(candidate: Face, top: Face, active_color: Color) -> bool {
    match candidate.color {
        Color::Wild => true,
        color if color == active_color => true,
        _ => candidate.value == top.value,
    }
}

pub fn can_play_any(hand: &[Card], top: &Card, active_color: Color) -> bool {
    hand.iter().any(|card| is_valid_move(card, top, active_color))
}

/// Indices of every legal card in `hand`, in hand order.
pub fn playable_indices(hand: &[Card], top: &Card, active_color: Color) -> Vec<usize> {
    hand.iter()
        .enumerate()
        .filter(|(_, card)| is_valid_move(card, top, active_color))
        .map(|(index, _)| index)
        .collect()
}

/// Checks a play against a hand. With `require_color`, a wild card must also
/// name a chromatic replacement color.
pub fn check_play<'a>(
    hand: &'a [Card],
    top: &Card,
    active_color: Color,
    mv: &Move,
    require_color: bool,
) -> Result<Option<&'a Card>, InvalidAction> {
    let Move::Play { hand_index, color } = *mv else {
        return Ok(None);
    };
    let card = hand
        .get(hand_index)
        .ok_or(InvalidAction::HandIndex(hand_index))?;
    if !is_valid_move(card, top, active_color) {
        return Err(InvalidAction::IllegalCard { card: card.face() });
    }
    if require_color && card.is_wild() && !color.is_some_and(|c| c.is_chromatic()) {
        return Err(InvalidAction::MissingColor);
    }
    Ok(Some(card))
}

/// Travel direction around the table.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    #[inline]
    pub fn sign(&self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Seat that plays after `current`, moving two seats when `skip` is set.
pub fn next_player_index(
    current: PlayerId,
    direction: Direction,
    player_count: usize,
    skip: bool,
) -> PlayerId {
    debug_assert!(player_count > 0, "a game has at least one player");
    let step = direction.sign() * if skip { 2 } else { 1 };
    (current as isize + step).rem_euclid(player_count as isize) as PlayerId
}

/// Side effects of playing a card.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PlayEffect {
    /// The next player in sequence loses their turn.
    pub skip: bool,
    /// Travel direction flips.
    pub reverse: bool,
    /// Cards the next player must draw.
    pub draw_count: usize,
}

impl PlayEffect {
    pub fn for_value(value: Value, player_count: usize) -> Self {
        match value {
            Value::Number(_) | Value::Wild => Self::default(),
            Value::Skip => Self {
                skip: true,
                ..Self::default()
            },
            // Heads-up, a reverse acts as a skip.
            Value::Reverse if player_count == 2 => Self {
                skip: true,
                ..Self::default()
            },
            Value::Reverse => Self {
                reverse: true,
                ..Self::default()
            },
            Value::DrawTwo => Self {
                skip: true,
                reverse: false,
                draw_count: 2,
            },
            Value::WildDrawFour => Self {
                skip: true,
                reverse: false,
                draw_count: 4,
            },
        }
    }
}
