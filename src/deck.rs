use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::Card;

/// Returns a uniformly shuffled copy of `cards`, leaving the input untouched.
pub fn shuffle<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> Vec<Card> {
    let mut shuffled = cards.to_vec();
    // Fisher-Yates from the last index down to 1.
    shuffled.shuffle(rng);
    shuffled
}

/// Draw pile and discard pile of a running game. The draw pile is a stack
/// whose top is the last element; the last discard is the card in play.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
}

impl Deck {
    pub fn new(draw_pile: Vec<Card>) -> Self {
        Self {
            draw_pile,
            discard_pile: Vec::new(),
        }
    }

    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    pub fn draw_count(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_count(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn top(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// Draws the top card, rebuilding the draw pile from the discard pile when
    /// it runs dry. Returns `None` when neither pile can supply a card.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if let Some(card) = self.draw_pile.pop() {
            return Some(card);
        }
        if !self.recycle_discards(rng) {
            return None;
        }
        self.draw_pile.pop()
    }

    /// Moves every discard except the top one into a freshly shuffled draw
    /// pile. Returns false when there was nothing below the top card.
    pub fn recycle_discards<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.discard_pile.len() <= 1 {
            return false;
        }
        let Some(top) = self.discard_pile.pop() else {
            return false;
        };
        let mut recycled = std::mem::take(&mut self.discard_pile);
        recycled.shuffle(rng);
        self.draw_pile.append(&mut recycled);
        self.discard_pile.push(top);
        true
    }

    /// Puts a card back into the draw pile and reshuffles the whole pile.
    pub fn return_and_shuffle<R: Rng + ?Sized>(&mut self, card: Card, rng: &mut R) {
        self.draw_pile.insert(0, card);
        self.draw_pile.shuffle(rng);
    }

    pub fn clear(&mut self) {
        self.draw_pile.clear();
        self.discard_pile.clear();
    }
}
