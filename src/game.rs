use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::{Move, PlayerId};
use crate::card::{Card, Color, DECK_SIZE, DEFAULT_WILD_COLOR, standard_deck};
use crate::deck::{Deck, shuffle};
use crate::error::GameError;
use crate::oracle::OracleRequest;
use crate::rules::{self, Direction, PlayEffect, next_player_index};
use crate::state::{
    GameSettings, GameSnapshot, GameStateView, GameStatus, PlayerConfig, PlayerKind,
    PlayerPublicState, PlayerSnapshot,
};

const DEFAULT_SEED: u64 = 0x5EED_0F_C0_10A5;

/// Upper bound on flips while looking for a non-wild starting card.
pub const MAX_SEED_ATTEMPTS: usize = DECK_SIZE;

pub const WELCOME_MESSAGE: &str = "Welcome to UNO!";
pub const INVALID_MOVE_MESSAGE: &str = "Invalid move! Pick another card.";
pub const EXHAUSTED_MESSAGE: &str = "The deck is exhausted; no card could be drawn.";

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub players: Vec<PlayerConfig>,
    pub seed: u64,
    pub hand_size: usize,
}

impl GameConfig {
    pub fn new(players: Vec<PlayerConfig>, seed: u64) -> Result<Self, GameError> {
        let settings = GameSettings::new(players.len())?;
        Ok(Self {
            players,
            seed,
            hand_size: settings.hand_size,
        })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: vec![PlayerConfig::human("You"), PlayerConfig::automated("Bot")],
            seed: DEFAULT_SEED,
            hand_size: crate::card::HAND_SIZE,
        }
    }
}

/// Builder that enables deterministic deck injection for testing.
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    /// Starts from the default heads-up table: a human ("You") against an
    /// automated opponent ("Bot").
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            deck: None,
        }
    }

    pub fn with_players(mut self, players: Vec<PlayerConfig>) -> Self {
        self.config.players = players;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Use `deck` as the unshuffled draw pile for every deal. Cards are dealt
    /// from the end of the vector.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.config.hand_size = hand_size;
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct PlayerState {
    name: String,
    kind: PlayerKind,
    hand: Vec<Card>,
}

/// Core UNO game engine. All hand and pile mutation goes through its methods.
pub struct Game {
    settings: GameSettings,
    status: GameStatus,
    players: Vec<PlayerState>,
    deck: Deck,
    preset_deck: Option<Vec<Card>>,
    current_player: PlayerId,
    direction: Direction,
    active_color: Color,
    message: String,
    thinking: bool,
    rng: StdRng,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder { config, deck: None }.build()
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, deck } = builder;
        let mut settings = GameSettings::new(config.players.len())?;
        if config.hand_size == 0 {
            return Err(GameError::InvalidConfiguration("hand size must be positive"));
        }
        let dealt = config.hand_size.checked_mul(config.players.len());
        if dealt.is_none_or(|dealt| dealt >= DECK_SIZE) {
            return Err(GameError::InvalidConfiguration(
                "hand size leaves no cards to start the discard pile",
            ));
        }
        settings.hand_size = config.hand_size;
        let players = config
            .players
            .into_iter()
            .map(|player| PlayerState {
                name: player.name,
                kind: player.kind,
                hand: Vec::with_capacity(settings.hand_size),
            })
            .collect();
        Ok(Game {
            settings,
            status: GameStatus::Lobby,
            players,
            deck: Deck::default(),
            preset_deck: deck,
            current_player: 0,
            direction: Direction::Clockwise,
            active_color: DEFAULT_WILD_COLOR,
            message: String::from(WELCOME_MESSAGE),
            thinking: false,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.deck.top()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True while an automated decision is outstanding.
    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player_name(&self, player: PlayerId) -> Result<&str, GameError> {
        Ok(&self.player(player)?.name)
    }

    pub fn player_kind(&self, player: PlayerId) -> Result<PlayerKind, GameError> {
        Ok(self.player(player)?.kind)
    }

    pub fn hand(&self, player: PlayerId) -> Result<&[Card], GameError> {
        Ok(&self.player(player)?.hand)
    }

    pub fn draw_pile_count(&self) -> usize {
        self.deck.draw_count()
    }

    pub fn discard_pile_count(&self) -> usize {
        self.deck.discard_count()
    }

    /// Cards across draw pile, discard pile and every hand.
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self
                .players
                .iter()
                .map(|player| player.hand.len())
                .sum::<usize>()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            status: self.status,
            players: self
                .players
                .iter()
                .enumerate()
                .map(|(id, player)| PlayerSnapshot {
                    id,
                    name: player.name.clone(),
                    kind: player.kind,
                    hand: player.hand.clone(),
                })
                .collect(),
            draw_pile: self.deck.draw_pile().to_vec(),
            discard_pile: self.deck.discard_pile().to_vec(),
            current_player: self.current_player,
            direction: self.direction,
            active_color: self.active_color,
            winner: self.winner(),
            message: self.message.clone(),
            thinking: self.thinking,
        }
    }

    pub fn state_view(&self, perspective: PlayerId) -> Result<GameStateView, GameError> {
        let hand = self.player(perspective)?.hand.clone();
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(id, player)| PlayerPublicState {
                id,
                name: player.name.clone(),
                kind: player.kind,
                hand_size: player.hand.len(),
                is_current: id == self.current_player,
            })
            .collect();
        Ok(GameStateView {
            settings: self.settings,
            status: self.status,
            self_player: perspective,
            current_player: self.current_player,
            direction: self.direction,
            active_color: self.active_color,
            top_card: self.deck.top().copied(),
            draw_pile_count: self.deck.draw_count(),
            discard_pile_count: self.deck.discard_count(),
            players,
            hand,
            thinking: self.thinking,
            message: self.message.clone(),
        })
    }

    /// Deals a fresh game: shuffled deck, `hand_size` cards per player dealt
    /// round-robin, and a non-wild starting card.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.ensure_idle()?;
        if self.status != GameStatus::Lobby {
            return Err(GameError::AlreadyStarted);
        }
        let cards = match &self.preset_deck {
            Some(deck) => deck.clone(),
            None => shuffle(&standard_deck(), &mut self.rng),
        };
        let num_players = self.players.len();
        if cards.len() <= self.settings.hand_size * num_players {
            return Err(GameError::InvalidConfiguration(
                "deck does not contain enough cards to deal and start",
            ));
        }

        let mut deck = Deck::new(cards);
        let mut hands = vec![Vec::with_capacity(self.settings.hand_size); num_players];
        for _ in 0..self.settings.hand_size {
            for hand in &mut hands {
                let card = deck.draw(&mut self.rng).ok_or(GameError::InvalidConfiguration(
                    "deck exhausted while dealing hands",
                ))?;
                hand.push(card);
            }
        }
        let first = Self::flip_starting_card(&mut deck, &mut self.rng)?;
        self.active_color = first.color();
        deck.discard(first);

        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.hand = hand;
        }
        self.deck = deck;
        self.current_player = 0;
        self.direction = Direction::Clockwise;
        self.status = GameStatus::Playing;
        self.message = format!("Game started! Turn: {}.", self.players[0].name);
        Ok(())
    }

    /// Returns the game to the lobby, emptying every hand and pile.
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.ensure_idle()?;
        for player in &mut self.players {
            player.hand.clear();
        }
        self.deck.clear();
        self.status = GameStatus::Lobby;
        self.current_player = 0;
        self.direction = Direction::Clockwise;
        self.active_color = DEFAULT_WILD_COLOR;
        self.message = String::from(WELCOME_MESSAGE);
        Ok(())
    }

    /// Draws one card into the player's hand without ending their turn.
    /// Returns `Ok(None)` when the deck and discard pile are both exhausted.
    pub fn draw(&mut self, player: PlayerId) -> Result<Option<Card>, GameError> {
        self.ensure_turn(player)?;
        let Some(card) = self.deck.draw(&mut self.rng) else {
            self.message = String::from(EXHAUSTED_MESSAGE);
            return Ok(None);
        };
        let state = &mut self.players[player];
        state.hand.push(card);
        self.message = format!("{} drew a card.", state.name);
        Ok(Some(card))
    }

    /// Plays the card at `hand_index`, resolving its effects and advancing the
    /// turn. A wild card without a chromatic `color` falls back to
    /// [`DEFAULT_WILD_COLOR`]. Illegal plays leave the table untouched.
    pub fn play(
        &mut self,
        player: PlayerId,
        hand_index: usize,
        color: Option<Color>,
    ) -> Result<Card, GameError> {
        self.ensure_turn(player)?;
        let mv = Move::Play { hand_index, color };
        if let Err(err) = self.check_move(player, &mv, false) {
            if matches!(err, GameError::InvalidAction(_)) {
                self.message = String::from(INVALID_MOVE_MESSAGE);
            }
            return Err(err);
        }

        let card = self.players[player].hand.remove(hand_index);
        self.deck.discard(card);
        self.active_color = if card.is_wild() {
            color
                .filter(Color::is_chromatic)
                .unwrap_or(DEFAULT_WILD_COLOR)
        } else {
            card.color()
        };
        let name = self.players[player].name.clone();

        if self.players[player].hand.is_empty() {
            self.status = GameStatus::Finished { winner: player };
            self.message = format!("{name} wins!");
            return Ok(card);
        }

        let effect = PlayEffect::for_value(card.value(), self.players.len());
        let target = next_player_index(player, self.direction, self.players.len(), false);
        for _ in 0..effect.draw_count {
            match self.deck.draw(&mut self.rng) {
                Some(drawn) => self.players[target].hand.push(drawn),
                None => break,
            }
        }
        if effect.reverse {
            self.direction = self.direction.reversed();
        }
        self.message = format!("{name} played {} {}.", card.value(), card.color());
        self.advance_turn(effect.skip);
        Ok(card)
    }

    /// Ends the player's turn without a play.
    pub fn pass(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.ensure_turn(player)?;
        self.message = format!("{} passed.", self.players[player].name);
        self.advance_turn(false);
        Ok(())
    }

    /// Single entry point for a complete move. `Move::Draw` draws one card and
    /// ends the turn.
    pub fn apply_move(&mut self, player: PlayerId, mv: Move) -> Result<(), GameError> {
        match mv {
            Move::Play { hand_index, color } => {
                self.play(player, hand_index, color)?;
            }
            Move::Draw => {
                self.draw(player)?;
                self.advance_turn(false);
            }
            Move::Pass => self.pass(player)?,
        }
        Ok(())
    }

    /// Builds the oracle request for `player` from the current table.
    pub fn oracle_request(&self, player: PlayerId) -> Result<OracleRequest, GameError> {
        let state = self.player(player)?;
        let top = self.deck.top().ok_or(GameError::NotStarted)?;
        let opponent = next_player_index(player, self.direction, self.players.len(), false);
        Ok(OracleRequest::new(
            &state.hand,
            top,
            self.active_color,
            self.players[opponent].hand.len(),
        ))
    }

    /// Marks a decision for `player` as pending and returns what the move
    /// source should see. Every mutation is rejected until the decision is
    /// resolved or cancelled.
    pub fn begin_decision(&mut self, player: PlayerId) -> Result<OracleRequest, GameError> {
        self.ensure_turn(player)?;
        let request = self.oracle_request(player)?;
        self.thinking = true;
        self.message = format!("{} is thinking...", self.players[player].name);
        Ok(request)
    }

    /// Applies the externally chosen move for the pending decision. The move
    /// is re-validated first; anything unplayable, including a wild card
    /// without a chosen color, is replaced by a draw.
    pub fn resolve_decision(&mut self, player: PlayerId, mv: Move) -> Result<Move, GameError> {
        if !self.thinking {
            return Err(GameError::NoDecisionPending);
        }
        self.player(player)?;
        if player != self.current_player {
            return Err(GameError::NotPlayersTurn);
        }
        self.thinking = false;
        let mv = match self.check_move(player, &mv, true) {
            Ok(()) => mv,
            Err(_) => Move::Draw,
        };
        self.apply_move(player, mv)?;
        Ok(mv)
    }

    /// Drops a pending decision without applying a move.
    pub fn cancel_decision(&mut self) {
        self.thinking = false;
    }

    fn check_move(
        &self,
        player: PlayerId,
        mv: &Move,
        require_color: bool,
    ) -> Result<(), GameError> {
        let top = self.deck.top().ok_or(GameError::NotStarted)?;
        rules::check_play(
            &self.players[player].hand,
            top,
            self.active_color,
            mv,
            require_color,
        )?;
        Ok(())
    }

    fn flip_starting_card(deck: &mut Deck, rng: &mut StdRng) -> Result<Card, GameError> {
        for _ in 0..MAX_SEED_ATTEMPTS {
            let Some(card) = deck.draw(rng) else {
                break;
            };
            if !card.is_wild() {
                return Ok(card);
            }
            deck.return_and_shuffle(card, rng);
        }
        Err(GameError::InvalidConfiguration("no non-wild card available to start the discard pile"))
    }

    fn advance_turn(&mut self, skip: bool) {
        if self.is_finished() {
            return;
        }
        self.current_player =
            next_player_index(self.current_player, self.direction, self.players.len(), skip);
    }

    fn player(&self, player: PlayerId) -> Result<&PlayerState, GameError> {
        self.players
            .get(player)
            .ok_or(GameError::InvalidPlayer(player))
    }

    fn ensure_idle(&self) -> Result<(), GameError> {
        if self.thinking {
            return Err(GameError::DecisionPending);
        }
        Ok(())
    }

    fn ensure_turn(&self, player: PlayerId) -> Result<(), GameError> {
        self.ensure_idle()?;
        match self.status {
            GameStatus::Lobby => return Err(GameError::NotStarted),
            GameStatus::Finished { .. } => return Err(GameError::GameOver),
            GameStatus::Playing => {}
        }
        self.player(player)?;
        if player != self.current_player {
            return Err(GameError::NotPlayersTurn);
        }
        Ok(())
    }
}
