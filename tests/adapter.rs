use std::time::Duration;

use unobot::{
    AdapterConfig, Card, Color, Decision, DecisionSource, Move, MoveAdapter, OracleError,
    OracleRequest, ScriptedOracle, ScriptedReply, Value, fallback_move,
};

fn request(hand: &[Card]) -> OracleRequest {
    let top = Card::new(Color::Red, Value::Number(5));
    OracleRequest::new(hand, &top, Color::Red, 4)
}

fn three_card_hand() -> Vec<Card> {
    vec![
        Card::new(Color::Blue, Value::Number(1)),
        Card::new(Color::Red, Value::Number(9)),
        Card::wild(Value::Wild),
    ]
}

fn adapter(replies: Vec<ScriptedReply>) -> MoveAdapter {
    MoveAdapter::with_config(
        Box::new(ScriptedOracle::new(replies)),
        AdapterConfig {
            timeout: Duration::from_millis(50),
            default_color: Color::Yellow,
        },
    )
}

fn payload(json: &str) -> ScriptedReply {
    ScriptedReply::Payload(json.to_string())
}

#[tokio::test]
async fn out_of_range_index_degrades_to_draw() {
    let request = request(&three_card_hand());
    let mut adapter = adapter(vec![payload(r#"{"cardIndex": 7}"#)]);
    let decision = adapter.decide(&request).await;
    assert_eq!(
        decision,
        Decision {
            mv: Move::Draw,
            source: DecisionSource::Sanitized
        }
    );
    assert!(adapter.take_failure().is_none());
}

#[tokio::test]
async fn negative_and_illegal_indices_degrade_to_draw() {
    let request = request(&three_card_hand());
    let mut adapter = adapter(vec![
        payload(r#"{"cardIndex": -1}"#),
        payload(r#"{"cardIndex": 0}"#),
    ]);
    assert_eq!(adapter.decide(&request).await.mv, Move::Draw);
    let illegal = adapter.decide(&request).await;
    assert_eq!(illegal.mv, Move::Draw);
    assert_eq!(illegal.source, DecisionSource::Sanitized);
}

#[tokio::test]
async fn wild_needs_a_chromatic_color() {
    let request = request(&three_card_hand());
    let mut adapter = adapter(vec![
        payload(r#"{"cardIndex": 2}"#),
        payload(r#"{"cardIndex": 2, "chosenColor": "WILD"}"#),
        payload(r#"{"cardIndex": 2, "chosenColor": "BLUE"}"#),
    ]);
    assert_eq!(adapter.decide(&request).await.mv, Move::Draw);
    assert_eq!(adapter.decide(&request).await.mv, Move::Draw);
    let accepted = adapter.decide(&request).await;
    assert_eq!(accepted.mv, Move::play_wild(2, Color::Blue));
    assert_eq!(accepted.source, DecisionSource::Oracle);
}

#[tokio::test]
async fn legal_answers_are_trusted() {
    let request = request(&three_card_hand());
    let mut adapter = adapter(vec![
        payload(r#"{"cardIndex": 1}"#),
        payload(r#"  {"cardIndex": null}  "#),
    ]);
    let play = adapter.decide(&request).await;
    assert_eq!(play.mv, Move::play(1));
    assert_eq!(play.source, DecisionSource::Oracle);
    let draw = adapter.decide(&request).await;
    assert_eq!(draw.mv, Move::Draw);
    assert_eq!(draw.source, DecisionSource::Oracle);
}

#[tokio::test]
async fn malformed_payload_uses_first_legal_card() {
    let request = request(&three_card_hand());
    let mut adapter = adapter(vec![payload("play the red nine please")]);
    let decision = adapter.decide(&request).await;
    assert_eq!(decision.mv, Move::play(1));
    assert_eq!(decision.source, DecisionSource::Fallback);
    assert!(matches!(adapter.take_failure(), Some(OracleError::Malformed(_))));
    assert!(adapter.take_failure().is_none());
}

#[tokio::test]
async fn transport_failure_plays_wild_with_default_color() {
    let hand = vec![
        Card::new(Color::Blue, Value::Number(1)),
        Card::wild(Value::WildDrawFour),
    ];
    let request = request(&hand);
    let mut adapter = adapter(vec![ScriptedReply::Fail(String::from("connection reset"))]);
    let decision = adapter.decide(&request).await;
    assert_eq!(decision.mv, Move::play_wild(1, Color::Yellow));
    assert_eq!(decision.source, DecisionSource::Fallback);
    assert!(matches!(adapter.take_failure(), Some(OracleError::Transport(_))));
}

#[tokio::test]
async fn hanging_oracle_times_out_into_fallback() {
    let hand = vec![Card::new(Color::Green, Value::Number(2))];
    let request = request(&hand);
    let mut adapter = adapter(vec![ScriptedReply::Hang]);
    let decision = adapter.decide(&request).await;
    assert_eq!(decision.mv, Move::Draw);
    assert_eq!(decision.source, DecisionSource::Fallback);
    assert!(matches!(adapter.take_failure(), Some(OracleError::Timeout(_))));
}

#[tokio::test]
async fn exhausted_script_still_decides() {
    let request = request(&three_card_hand());
    let mut adapter = adapter(Vec::new());
    let decision = adapter.decide(&request).await;
    assert_eq!(decision.source, DecisionSource::Fallback);
    assert_eq!(decision.mv, Move::play(1));
}

#[test]
fn fallback_draws_without_legal_card() {
    let hand = vec![
        Card::new(Color::Blue, Value::Number(1)),
        Card::new(Color::Green, Value::Skip),
    ];
    assert_eq!(fallback_move(&request(&hand), Color::Red), Move::Draw);
    assert_eq!(fallback_move(&request(&[]), Color::Red), Move::Draw);
}
