//! Contract between the engine and an external move source.
//!
//! The request describes what the automated seat can see; the response is the
//! raw payload the source produced. Payloads are untrusted and only become a
//! [`Move`](crate::Move) after passing through [`MoveAdapter`](crate::MoveAdapter).

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::card::{Card, Color, Face, Value};
use crate::error::OracleError;

/// One hand entry as shown to the oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleCard {
    pub index: usize,
    pub color: Color,
    pub value: Value,
}

impl OracleCard {
    pub fn face(&self) -> Face {
        Face::new(self.color, self.value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleTopCard {
    pub color: Color,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleRequest {
    pub hand: Vec<OracleCard>,
    pub top_card: OracleTopCard,
    pub active_color: Color,
    pub opponent_card_count: usize,
}

impl OracleRequest {
    pub fn new(hand: &[Card], top: &Card, active_color: Color, opponent_card_count: usize) -> Self {
        Self {
            hand: hand
                .iter()
                .enumerate()
                .map(|(index, card)| OracleCard {
                    index,
                    color: card.color(),
                    value: card.value(),
                })
                .collect(),
            top_card: OracleTopCard {
                color: top.color(),
                value: top.value(),
            },
            active_color,
            opponent_card_count,
        }
    }

    pub fn top_face(&self) -> Face {
        Face::new(self.top_card.color, self.top_card.value)
    }

    pub fn to_json(&self) -> Result<String, OracleError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Decoded oracle answer. `card_index: None` means "draw instead of playing".
/// The index is signed so that negative answers decode and can be rejected
/// as out of range instead of as malformed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleResponse {
    pub card_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen_color: Option<Color>,
}

impl OracleResponse {
    pub fn draw() -> Self {
        Self {
            card_index: None,
            chosen_color: None,
        }
    }

    pub fn play(index: usize, chosen_color: Option<Color>) -> Self {
        Self {
            card_index: Some(index as i64),
            chosen_color,
        }
    }

    pub fn to_json(&self) -> Result<String, OracleError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// External decision source for an automated seat.
///
/// Implementations return the raw response payload (JSON following
/// [`OracleResponse`]); decoding and validation happen in the adapter, so a
/// source may be a remote model, a local heuristic or a scripted stub.
pub trait Oracle: Send {
    fn name(&self) -> &str;

    fn decide(&mut self, request: OracleRequest) -> BoxFuture<'_, Result<String, OracleError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_wire_names() {
        let hand = vec![
            Card::new(Color::Red, Value::Number(4)),
            Card::wild(Value::WildDrawFour),
        ];
        let top = Card::new(Color::Blue, Value::Skip);
        let request = OracleRequest::new(&hand, &top, Color::Blue, 5);
        let json = request.to_json().expect("serialize request");
        assert!(json.contains("\"topCard\":{\"color\":\"BLUE\",\"value\":\"SKIP\"}"));
        assert!(json.contains("\"activeColor\":\"BLUE\""));
        assert!(json.contains("\"opponentCardCount\":5"));
        assert!(json.contains("{\"index\":1,\"color\":\"WILD\",\"value\":\"WILD_DRAW_FOUR\"}"));
    }

    #[test]
    fn response_decodes_null_index_as_draw() {
        let response: OracleResponse =
            serde_json::from_str(r#"{"cardIndex": null}"#).expect("decode");
        assert_eq!(response, OracleResponse::draw());
        let response: OracleResponse =
            serde_json::from_str(r#"{"cardIndex": 2, "chosenColor": "GREEN"}"#).expect("decode");
        assert_eq!(response, OracleResponse::play(2, Some(Color::Green)));
    }
}
