use std::collections::VecDeque;

use futures::future::BoxFuture;

use crate::error::OracleError;
use crate::oracle::{Oracle, OracleRequest};

/// One canned oracle behaviour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptedReply {
    /// Answer with this raw payload.
    Payload(String),
    /// Fail with a transport error carrying this message.
    Fail(String),
    /// Never answer.
    Hang,
}

/// Oracle that replays a fixed list of replies, then fails.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    replies: VecDeque<ScriptedReply>,
}

impl ScriptedOracle {
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
        }
    }

    /// Convenience for a script made only of raw payloads.
    pub fn payloads<S: Into<String>>(payloads: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            payloads
                .into_iter()
                .map(|payload| ScriptedReply::Payload(payload.into())),
        )
    }
}

impl Oracle for ScriptedOracle {
    fn name(&self) -> &str {
        "scripted"
    }

    fn decide(&mut self, _request: OracleRequest) -> BoxFuture<'_, Result<String, OracleError>> {
        let reply = self.replies.pop_front();
        Box::pin(async move {
            match reply {
                Some(ScriptedReply::Payload(payload)) => Ok(payload),
                Some(ScriptedReply::Fail(message)) => Err(OracleError::Transport(message)),
                Some(ScriptedReply::Hang) => std::future::pending().await,
                None => Err(OracleError::Transport(String::from("script exhausted"))),
            }
        })
    }
}
