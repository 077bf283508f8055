//! UNO state and rules.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::card::{create_deck, is_valid_move, Card, CardColor, CardId, DECK_SIZE};
use crate::core::{
    EngineError, EngineResult, GameRng, GameRngState, IllegalAction, PlayerId, PlayerMap,
    UnoOptions, WinPolicy, SEATS,
};
use crate::rules::{GameResult, RulesEngine};

/// Turn order direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Signed seat step: +1 or -1.
    #[must_use]
    pub const fn step(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnoStatus {
    Setup,
    #[default]
    TurnAction,
    Finished,
}

/// Short-lived UI annotation (emoji reaction, shout). Never read by the rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub timestamp_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnoPlayer {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub hand: Vector<Card>,
    #[serde(default)]
    pub reaction: Option<Annotation>,
    #[serde(default)]
    pub shout: Option<Annotation>,
}

impl UnoPlayer {
    fn new(id: PlayerId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            hand: Vector::new(),
            reaction: None,
            shout: None,
        }
    }
}

/// Complete UNO table snapshot.
///
/// Collection fields default to empty when absent so snapshots from stores
/// that drop empty arrays still decode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnoState {
    /// Draw pile, top = back.
    #[serde(default)]
    pub deck: Vector<Card>,
    /// Discard pile, top = back.
    #[serde(default)]
    pub discard_pile: Vector<Card>,
    pub players: PlayerMap<UnoPlayer>,
    pub current_player: PlayerId,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub status: UnoStatus,
    pub active_color: CardColor,
    #[serde(default)]
    pub winner: Option<PlayerId>,
    #[serde(default)]
    pub log: String,
    pub rng: GameRngState,
}

impl UnoState {
    /// Top of the discard pile.
    #[must_use]
    pub fn top_card(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Vector<Card> {
        &self.players[player].hand
    }

    /// Cards across deck, discard pile and both hands.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.discard_pile.len()
            + self.players.iter().map(|(_, p)| p.hand.len()).sum::<usize>()
    }

    /// Seat reached by moving `steps` seats from the current player.
    #[must_use]
    pub fn seat_after(&self, steps: i32) -> PlayerId {
        let seats = SEATS as i32;
        let next = (self.current_player.0 as i32 + self.direction.step() * steps).rem_euclid(seats);
        PlayerId(next as u8)
    }

    /// Draw up to `count` cards into `player`'s hand, reshuffling the
    /// discard pile (minus its top card) into the deck when it runs dry.
    ///
    /// Returns how many cards were actually drawn. A short count means the
    /// deck and discard pile were exhausted.
    fn draw_cards(&mut self, player: PlayerId, count: usize) -> usize {
        let mut rng = GameRng::from_state(&self.rng);
        let mut drawn = 0;

        for _ in 0..count {
            if self.deck.is_empty() {
                if self.discard_pile.len() <= 1 {
                    warn!(%player, wanted = count, drawn, "deck and discard pile exhausted");
                    break;
                }
                let top = self.discard_pile.pop_back();
                let mut reshuffled: Vec<Card> = self.discard_pile.iter().copied().collect();
                rng.shuffle(&mut reshuffled);
                debug!(cards = reshuffled.len(), "reshuffled discard pile into deck");
                self.deck = reshuffled.into_iter().collect();
                self.discard_pile = top.into_iter().collect();
            }
            if let Some(card) = self.deck.pop_back() {
                self.players[player].hand.push_back(card);
                drawn += 1;
            }
        }

        self.rng = rng.state();
        drawn
    }

    fn advance(&mut self, steps: i32) {
        self.current_player = self.seat_after(steps);
        self.status = UnoStatus::TurnAction;
    }

    fn finish(&mut self, winner: PlayerId) {
        self.winner = Some(winner);
        self.status = UnoStatus::Finished;
        self.log = format!("{} won the game!", self.players[winner].name);
        info!(%winner, "uno game finished");
    }

    fn check_can_act(&self, player: PlayerId) -> EngineResult<()> {
        if self.status == UnoStatus::Finished || self.winner.is_some() {
            return Err(IllegalAction::GameOver.into());
        }
        if player != self.current_player {
            return Err(IllegalAction::NotYourTurn.into());
        }
        Ok(())
    }
}

/// A player's UNO action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnoAction {
    /// Play a card from hand. `color` is required for wild cards and
    /// ignored otherwise.
    Play { card: CardId, color: Option<CardColor> },
    /// Draw one card and pass.
    Draw,
}

/// UNO rules engine.
#[derive(Clone, Debug, Default)]
pub struct UnoGame {
    options: UnoOptions,
}

/// Builder for creating an UnoGame.
#[derive(Clone, Debug, Default)]
pub struct UnoGameBuilder {
    options: UnoOptions,
}

impl UnoGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hand_size(mut self, size: usize) -> Self {
        assert!(
            size <= UnoOptions::MAX_HAND_SIZE,
            "Hand size must be at most {}",
            UnoOptions::MAX_HAND_SIZE
        );
        self.options.hand_size = size;
        self
    }

    pub fn names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.options.names = [first.into(), second.into()];
        self
    }

    pub fn win_policy(mut self, policy: WinPolicy) -> Self {
        self.options.win_policy = policy;
        self
    }

    pub fn options(mut self, options: UnoOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the game and initial state.
    pub fn build(self, seed: u64) -> (UnoGame, UnoState) {
        let game = UnoGame::new(self.options);
        let state = game.initial_state(seed);
        (game, state)
    }
}

impl UnoGame {
    /// Game with `options`, capping an oversized hand.
    #[must_use]
    pub fn new(mut options: UnoOptions) -> Self {
        if options.hand_size > UnoOptions::MAX_HAND_SIZE {
            warn!(
                requested = options.hand_size,
                max = UnoOptions::MAX_HAND_SIZE,
                "hand size capped"
            );
            options.hand_size = UnoOptions::MAX_HAND_SIZE;
        }
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &UnoOptions {
        &self.options
    }

    /// Play `card_id` from `player`'s hand.
    pub fn apply_play(
        &self,
        state: &UnoState,
        player: PlayerId,
        card_id: CardId,
        color_choice: Option<CardColor>,
    ) -> EngineResult<UnoState> {
        state.check_can_act(player)?;

        let hand = state.hand(player);
        let pos = hand
            .iter()
            .position(|c| c.id == card_id)
            .ok_or(IllegalAction::CardNotInHand)?;
        let card = hand[pos];

        if let Some(top) = state.top_card() {
            if !is_valid_move(&card, top, state.active_color) {
                return Err(IllegalAction::CardNotPlayable.into());
            }
        }

        let next_color = if card.is_wild() {
            match color_choice {
                None => return Err(IllegalAction::ColorRequired.into()),
                Some(CardColor::Wild) => return Err(IllegalAction::InvalidColor.into()),
                Some(color) => color,
            }
        } else {
            card.color
        };

        let mut next = state.clone();
        next.players[player].hand.remove(pos);
        next.discard_pile.push_back(card);
        next.active_color = next_color;
        next.log = format!("{} played {}", next.players[player].name, card.value);
        debug!(%player, card = %card, color = %next_color, "uno play");

        let penalty = card.value.penalty();
        let victim = next.seat_after(1);

        if next.players[player].hand.is_empty() {
            if penalty > 0 && self.options.win_policy == WinPolicy::PenaltyBeforeWin {
                next.draw_cards(victim, penalty);
            }
            next.finish(player);
            return Ok(next);
        }

        if next.players[player].hand.len() == 1 {
            next.log.push_str(" - UNO!");
        }

        if penalty > 0 {
            let drawn = next.draw_cards(victim, penalty);
            let victim_name = next.players[victim].name.clone();
            next.log.push_str(&format!(" - {victim_name} +{drawn}"));
        }

        next.advance(if card.value.skips_next() { 2 } else { 1 });
        Ok(next)
    }

    /// Draw one card and pass the turn.
    pub fn apply_draw(&self, state: &UnoState, player: PlayerId) -> EngineResult<UnoState> {
        state.check_can_act(player)?;

        let mut next = state.clone();
        let name = next.players[player].name.clone();

        if next.draw_cards(player, 1) == 0 {
            next.log = "Deck empty, cannot draw!".to_string();
        } else {
            let playable = match (next.hand(player).last(), next.top_card()) {
                (Some(drawn), Some(top)) => is_valid_move(drawn, top, next.active_color),
                _ => false,
            };
            next.log = if playable {
                format!("{name} drew a playable card!")
            } else {
                format!("{name} drew a card")
            };
        }
        debug!(%player, "uno draw");

        next.advance(1);
        Ok(next)
    }
}

impl RulesEngine for UnoGame {
    type State = UnoState;
    type Action = UnoAction;

    fn name(&self) -> &'static str {
        "uno"
    }

    fn initial_state(&self, seed: u64) -> UnoState {
        let mut rng = GameRng::new(seed);
        let mut deck = create_deck(&mut rng);

        // Turn up the first colored card before dealing. Wilds above it go
        // back into the deck, which is reshuffled.
        let wilds_on_top = deck.iter().rev().take_while(|card| card.is_wild()).count();
        let buried = deck.split_off(deck.len() - wilds_on_top);
        let Some(first) = deck.pop_back() else {
            unreachable!("a fresh deck holds 100 colored cards");
        };
        if !buried.is_empty() {
            let mut reshuffled: Vec<Card> = buried.into_iter().chain(deck.iter().copied()).collect();
            rng.shuffle(&mut reshuffled);
            deck = reshuffled.into_iter().collect();
        }

        let mut players = PlayerMap::new(|p| UnoPlayer::new(p, &self.options.names[p.index()]));
        for player in PlayerId::all() {
            let split = deck.len().saturating_sub(self.options.hand_size);
            players[player].hand = deck.split_off(split);
        }

        UnoState {
            deck,
            discard_pile: Vector::unit(first),
            players,
            current_player: PlayerId::new(0),
            direction: Direction::Clockwise,
            status: UnoStatus::TurnAction,
            active_color: first.color,
            winner: None,
            log: "New Game Started!".to_string(),
            rng: rng.state(),
        }
    }

    fn active_player(&self, state: &UnoState) -> Option<PlayerId> {
        match state.status {
            UnoStatus::Finished => None,
            _ => Some(state.current_player),
        }
    }

    fn legal_actions(&self, state: &UnoState, player: PlayerId) -> Vec<UnoAction> {
        if state.check_can_act(player).is_err() {
            return vec![];
        }

        let mut actions = Vec::new();
        for card in state.hand(player) {
            let playable = state
                .top_card()
                .map_or(true, |top| is_valid_move(card, top, state.active_color));
            if !playable {
                continue;
            }
            if card.is_wild() {
                for color in super::card::COLORS {
                    actions.push(UnoAction::Play {
                        card: card.id,
                        color: Some(color),
                    });
                }
            } else {
                actions.push(UnoAction::Play {
                    card: card.id,
                    color: None,
                });
            }
        }
        actions.push(UnoAction::Draw);
        actions
    }

    fn apply_action(
        &self,
        state: &UnoState,
        player: PlayerId,
        action: &UnoAction,
    ) -> EngineResult<UnoState> {
        match *action {
            UnoAction::Play { card, color } => self.apply_play(state, player, card, color),
            UnoAction::Draw => self.apply_draw(state, player),
        }
    }

    fn is_terminal(&self, state: &UnoState) -> Option<GameResult> {
        state.winner.map(GameResult::Winner)
    }

    fn validate(&self, state: &UnoState) -> EngineResult<()> {
        if state.players.len() != SEATS {
            return Err(EngineError::malformed(format!(
                "uno table has {} players",
                state.players.len()
            )));
        }
        if !state.current_player.is_seat() {
            return Err(EngineError::malformed("current player is not a seat"));
        }
        if state.discard_pile.is_empty() {
            return Err(EngineError::malformed("discard pile is empty"));
        }
        let total = state.total_cards();
        if total != DECK_SIZE {
            return Err(EngineError::malformed(format!("{total} cards in play, expected {DECK_SIZE}")));
        }
        let mut seen = [false; DECK_SIZE];
        let all = state
            .deck
            .iter()
            .chain(state.discard_pile.iter())
            .chain(state.players.iter().flat_map(|(_, p)| p.hand.iter()));
        for card in all {
            let slot = seen
                .get_mut(card.id.0 as usize)
                .ok_or_else(|| EngineError::malformed(format!("card id {} out of range", card.id)))?;
            if *slot {
                return Err(EngineError::malformed(format!("duplicate card {}", card.id)));
            }
            *slot = true;
        }
        Ok(())
    }
}
