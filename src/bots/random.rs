use futures::future::BoxFuture;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::CHROMATIC_COLORS;
use crate::error::OracleError;
use crate::oracle::{Oracle, OracleRequest, OracleResponse};
use crate::rules::face_matches;

/// Baseline oracle that samples uniformly from the legal cards, drawing only
/// when nothing is playable.
pub struct RandomOracle<R: Rng + Send> {
    rng: R,
}

impl<R: Rng + Send> RandomOracle<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn choose(&mut self, request: &OracleRequest) -> OracleResponse {
        let top = request.top_face();
        let legal: Vec<_> = request
            .hand
            .iter()
            .filter(|card| face_matches(card.face(), top, request.active_color))
            .collect();
        let Some(card) = legal.choose(&mut self.rng) else {
            return OracleResponse::draw();
        };
        let color = if card.color.is_chromatic() {
            None
        } else {
            CHROMATIC_COLORS.choose(&mut self.rng).copied()
        };
        OracleResponse::play(card.index, color)
    }
}

impl<R: Rng + Send> Oracle for RandomOracle<R> {
    fn name(&self) -> &str {
        "random"
    }

    fn decide(&mut self, request: OracleRequest) -> BoxFuture<'_, Result<String, OracleError>> {
        let response = self.choose(&request);
        Box::pin(async move { response.to_json() })
    }
}
