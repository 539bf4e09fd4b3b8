use crate::action::PlayerId;
use crate::adapter::{Decision, DecisionSource, MoveAdapter};
use crate::card::Color;
use crate::error::GameError;
use crate::game::Game;
use crate::state::{GameSnapshot, PlayerKind};

/// Drives one game: human moves are applied directly, automated seats are
/// asked through their [`MoveAdapter`].
pub struct Session {
    game: Game,
    adapters: Vec<Option<MoveAdapter>>,
}

impl Session {
    pub fn new(game: Game) -> Self {
        let adapters = (0..game.player_count()).map(|_| None).collect();
        Self { game, adapters }
    }

    /// Attaches the move source for an automated seat.
    pub fn with_adapter(
        mut self,
        player: PlayerId,
        adapter: MoveAdapter,
    ) -> Result<Self, GameError> {
        if self.game.player_kind(player)? != PlayerKind::Automated {
            return Err(GameError::InvalidConfiguration(
                "move sources can only drive automated seats",
            ));
        }
        self.adapters[player] = Some(adapter);
        Ok(self)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn adapter_mut(&mut self, player: PlayerId) -> Option<&mut MoveAdapter> {
        self.adapters.get_mut(player).and_then(Option::as_mut)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn start(&mut self) -> Result<GameSnapshot, GameError> {
        self.game.start()?;
        Ok(self.snapshot())
    }

    pub fn reset(&mut self) -> Result<GameSnapshot, GameError> {
        self.game.reset()?;
        Ok(self.snapshot())
    }

    /// True when the seat holding the turn is automated and the game is live.
    pub fn awaiting_automated(&self) -> bool {
        !self.game.is_finished()
            && self
                .game
                .player_kind(self.game.current_player())
                .is_ok_and(|kind| kind == PlayerKind::Automated)
    }

    /// Applies a move for a human seat.
    pub fn submit_human(
        &mut self,
        player: PlayerId,
        mv: HumanMove,
    ) -> Result<GameSnapshot, GameError> {
        if self.game.player_kind(player)? != PlayerKind::Human {
            return Err(GameError::NotPlayersTurn);
        }
        match mv {
            HumanMove::Play { hand_index, color } => {
                self.game.play(player, hand_index, color)?;
            }
            HumanMove::Draw => {
                self.game.draw(player)?;
            }
            HumanMove::Pass => self.game.pass(player)?,
        }
        Ok(self.snapshot())
    }

    /// Drops an outstanding automated decision without applying a move.
    pub fn cancel_decision(&mut self) {
        self.game.cancel_decision();
    }

    /// Runs the automated seat that holds the turn. The engine stays locked
    /// while the oracle is consulted; the adapter always produces a move, so
    /// the turn completes even when the oracle fails. Dropping the returned
    /// future before it completes releases the lock without moving.
    pub async fn run_automated_turn(&mut self) -> Result<Decision, GameError> {
        let player = self.game.current_player();
        if self.game.player_kind(player)? != PlayerKind::Automated {
            return Err(GameError::NotPlayersTurn);
        }
        let Some(adapter) = self.adapters.get_mut(player).and_then(Option::as_mut) else {
            return Err(GameError::InvalidConfiguration("automated seat has no move source"));
        };
        let request = self.game.begin_decision(player)?;
        let mut pending = PendingDecision(&mut self.game);
        let mut decision = adapter.decide(&request).await;
        let applied = pending.0.resolve_decision(player, decision.mv)?;
        if applied != decision.mv {
            decision = Decision {
                mv: applied,
                source: DecisionSource::Sanitized,
            };
        }
        Ok(decision)
    }
}

/// Holds the engine while a decision is outstanding and unlocks it when
/// dropped. After a resolved decision the unlock is a no-op.
struct PendingDecision<'a>(&'a mut Game);

impl Drop for PendingDecision<'_> {
    fn drop(&mut self) {
        self.0.cancel_decision();
    }
}

/// Moves a human may submit. Unlike [`Move::Draw`](crate::Move::Draw), drawing keeps the turn
/// so the drawn card can still be played; the human passes explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HumanMove {
    Play {
        hand_index: usize,
        color: Option<Color>,
    },
    Draw,
    Pass,
}
