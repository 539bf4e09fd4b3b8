use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

pub const MAX_NUMBER: u8 = 9;
pub const COPIES_PER_FACE: usize = 2;
pub const WILD_COPIES: usize = 4;
pub const CARDS_PER_COLOR: usize = 25;
pub const DECK_SIZE: usize = 108;
pub const HAND_SIZE: usize = 7;
pub const MAX_PLAYERS: usize = 6;

/// Color applied when a wild card is played without a usable color choice.
pub const DEFAULT_WILD_COLOR: Color = Color::Red;

/// The four colors a card (or the active color) can take, in deck order.
pub const CHROMATIC_COLORS: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

static NEXT_CARD_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of a physical card, independent of its face.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CardId(pub u64);

impl CardId {
    fn fresh() -> Self {
        CardId(NEXT_CARD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    /// Colorless marker carried by WILD and WILD_DRAW_FOUR.
    Wild,
}

impl Color {
    #[inline]
    pub fn is_chromatic(&self) -> bool {
        !matches!(self, Color::Wild)
    }

    pub fn parse(input: &str) -> Option<Color> {
        match input.trim().to_ascii_lowercase().as_str() {
            "r" | "red" => Some(Color::Red),
            "g" | "green" => Some(Color::Green),
            "b" | "blue" => Some(Color::Blue),
            "y" | "yellow" => Some(Color::Yellow),
            "w" | "wild" => Some(Color::Wild),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::Wild => "Wild",
        };
        f.write_str(name)
    }
}

/// Face value of a card. Serialized with the wire names used by the oracle
/// contract (`"0"`..`"9"`, `"SKIP"`, `"REVERSE"`, `"DRAW_TWO"`, `"WILD"`,
/// `"WILD_DRAW_FOUR"`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Value {
    /// Number card between 0 and 9.
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl Value {
    pub const ACTIONS: [Value; 3] = [Value::Skip, Value::Reverse, Value::DrawTwo];

    #[inline]
    pub fn is_wild(&self) -> bool {
        matches!(self, Value::Wild | Value::WildDrawFour)
    }

    /// True for the values that carry a side effect when played.
    #[inline]
    pub fn is_action(&self) -> bool {
        !matches!(self, Value::Number(_) | Value::Wild)
    }

    pub fn wire_name(&self) -> String {
        match self {
            Value::Number(n) => n.to_string(),
            Value::Skip => String::from("SKIP"),
            Value::Reverse => String::from("REVERSE"),
            Value::DrawTwo => String::from("DRAW_TWO"),
            Value::Wild => String::from("WILD"),
            Value::WildDrawFour => String::from("WILD_DRAW_FOUR"),
        }
    }
}

impl TryFrom<String> for Value {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        match raw.as_str() {
            "SKIP" => Ok(Value::Skip),
            "REVERSE" => Ok(Value::Reverse),
            "DRAW_TWO" => Ok(Value::DrawTwo),
            "WILD" => Ok(Value::Wild),
            "WILD_DRAW_FOUR" => Ok(Value::WildDrawFour),
            other => match other.parse::<u8>() {
                Ok(n) if n <= MAX_NUMBER => Ok(Value::Number(n)),
                _ => Err(format!("unknown card value: {other}")),
            },
        }
    }
}

impl From<Value> for String {
    fn from(value: Value) -> Self {
        value.wire_name()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Skip => f.write_str("Skip"),
            Value::Reverse => f.write_str("Reverse"),
            Value::DrawTwo => f.write_str("Draw Two"),
            Value::Wild => f.write_str("Wild"),
            Value::WildDrawFour => f.write_str("Wild Draw Four"),
        }
    }
}

/// The game-relevant meaning of a card: its color and value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Face {
    pub color: Color,
    pub value: Value,
}

impl Face {
    pub fn new(color: Color, value: Value) -> Self {
        Self { color, value }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.color.is_chromatic() {
            write!(f, "{} {}", self.color, self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// A single physical card. Two cards may share a face but never an id.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    color: Color,
    value: Value,
}

impl Card {
    /// Creates a card with a fresh identity.
    pub fn new(color: Color, value: Value) -> Self {
        debug_assert!(
            !matches!(value, Value::Number(n) if n > MAX_NUMBER),
            "number cards range from 0 to 9"
        );
        debug_assert_eq!(
            value.is_wild(),
            color == Color::Wild,
            "wild values carry the wild color and nothing else does"
        );
        Self {
            id: CardId::fresh(),
            color,
            value,
        }
    }

    pub fn wild(value: Value) -> Self {
        Self::new(Color::Wild, value)
    }

    #[inline]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn value(&self) -> Value {
        self.value
    }

    #[inline]
    pub fn face(&self) -> Face {
        Face::new(self.color, self.value)
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        self.color == Color::Wild
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.face().fmt(f)
    }
}

/// Builds the 108-card standard deck in deterministic order (unshuffled).
/// Every call mints new card identities.
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in CHROMATIC_COLORS {
        deck.push(Card::new(color, Value::Number(0)));
        for _ in 0..COPIES_PER_FACE {
            for n in 1..=MAX_NUMBER {
                deck.push(Card::new(color, Value::Number(n)));
            }
            for value in Value::ACTIONS {
                deck.push(Card::new(color, value));
            }
        }
    }
    for _ in 0..WILD_COPIES {
        deck.push(Card::wild(Value::Wild));
        deck.push(Card::wild(Value::WildDrawFour));
    }
    debug_assert_eq!(deck.len(), DECK_SIZE);
    deck
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;

    #[test]
    fn standard_deck_has_expected_multiplicities() {
        let deck = standard_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        let mut counts: HashMap<Face, usize> = HashMap::new();
        for card in &deck {
            *counts.entry(card.face()).or_default() += 1;
        }
        for color in CHROMATIC_COLORS {
            assert_eq!(counts[&Face::new(color, Value::Number(0))], 1);
            for n in 1..=MAX_NUMBER {
                assert_eq!(counts[&Face::new(color, Value::Number(n))], 2);
            }
            for value in Value::ACTIONS {
                assert_eq!(counts[&Face::new(color, value)], 2);
            }
            let per_color = deck.iter().filter(|card| card.color() == color).count();
            assert_eq!(per_color, CARDS_PER_COLOR);
        }
        assert_eq!(counts[&Face::new(Color::Wild, Value::Wild)], 4);
        assert_eq!(counts[&Face::new(Color::Wild, Value::WildDrawFour)], 4);
    }

    #[test]
    fn identities_are_unique_across_decks() {
        let first = standard_deck();
        let second = standard_deck();
        let ids: HashSet<CardId> = first.iter().chain(&second).map(Card::id).collect();
        assert_eq!(ids.len(), DECK_SIZE * 2);
        assert_eq!(first[0].face(), second[0].face());
        assert_ne!(first[0], second[0]);
    }

    #[test]
    fn values_use_wire_names() {
        let json = serde_json::to_string(&Value::DrawTwo).expect("serialize");
        assert_eq!(json, "\"DRAW_TWO\"");
        let parsed: Value = serde_json::from_str("\"7\"").expect("number value");
        assert_eq!(parsed, Value::Number(7));
        assert!(serde_json::from_str::<Value>("\"10\"").is_err());
        let color: Color = serde_json::from_str("\"YELLOW\"").expect("color");
        assert_eq!(color, Color::Yellow);
    }
}
