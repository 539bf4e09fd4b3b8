#![allow(dead_code)]

use unobot::{Card, Color, Value};

pub fn num(color: Color, n: u8) -> Card {
    Card::new(color, Value::Number(n))
}

pub fn action(color: Color, value: Value) -> Card {
    Card::new(color, value)
}

/// Filler card that never matches the usual test tops (RED/BLUE 5, no 9s played).
pub fn filler() -> Card {
    num(Color::Yellow, 9)
}

/// Lays out a deck so that dealing gives each player exactly `hands[p]` (in
/// order), the starting card is `first`, and later draws come from
/// `draw_pile` starting at its last element.
pub fn stacked_deck(hands: &[Vec<Card>], first: Card, draw_pile: Vec<Card>) -> Vec<Card> {
    let hand_size = hands[0].len();
    assert!(hands.iter().all(|hand| hand.len() == hand_size));
    let mut deal_order = Vec::with_capacity(hand_size * hands.len());
    for round in 0..hand_size {
        for hand in hands {
            deal_order.push(hand[round]);
        }
    }
    let mut deck = draw_pile;
    deck.push(first);
    deck.extend(deal_order.into_iter().rev());
    deck
}
