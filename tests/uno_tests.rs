//! UNO table tests: dealing, card effects, win ordering and long playouts.

mod common;

use duel_engines::core::{UnoOptions, WinPolicy};
use duel_engines::games::uno::{
    is_valid_move, ordered_deck, Card, CardColor, CardValue, UnoAction, UnoGame, UnoGameBuilder,
    UnoState, UnoStatus, DECK_SIZE,
};
use duel_engines::{IllegalAction, PlayerId, RulesEngine};
use proptest::prelude::*;

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

/// Pull a card out of the deck or either hand.
fn take(state: &mut UnoState, card: Card) {
    state.deck.retain(|c| c.id != card.id);
    for p in PlayerId::all() {
        state.players[p].hand.retain(|c| c.id != card.id);
    }
}

/// First card outside the discard pile matching `pred`.
fn find(state: &UnoState, pred: impl Fn(&Card) -> bool) -> Card {
    state
        .deck
        .iter()
        .chain(state.hand(P0).iter())
        .chain(state.hand(P1).iter())
        .copied()
        .find(|c| pred(c))
        .expect("card available")
}

/// Replace `player`'s hand with `cards`; the old hand goes under the deck.
/// The opponent keeps their hand size.
fn set_hand(state: &mut UnoState, player: PlayerId, cards: &[Card]) {
    let other = player.opponent();
    let other_size = state.hand(other).len();
    for card in cards {
        take(state, *card);
    }
    while state.hand(other).len() < other_size {
        let refill = state.deck.pop_back().expect("deck not empty");
        state.players[other].hand.push_back(refill);
    }
    let old = std::mem::take(&mut state.players[player].hand);
    for card in old {
        state.deck.push_front(card);
    }
    for card in cards {
        state.players[player].hand.push_back(*card);
    }
}

fn draw_two_finish(policy: WinPolicy) -> UnoState {
    let (game, mut state) = UnoGameBuilder::new().win_policy(policy).build(21);
    let color = state.active_color;
    let draw_two = find(&state, |c| c.color == color && c.value == CardValue::DrawTwo);
    set_hand(&mut state, P0, &[draw_two]);
    game.apply_play(&state, P0, draw_two.id, None).unwrap()
}

#[test]
fn test_deck_composition() {
    let deck = ordered_deck();
    assert_eq!(deck.len(), DECK_SIZE);

    let mut ids: Vec<u8> = deck.iter().map(|c| c.id.0).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), DECK_SIZE);

    let zeros = deck.iter().filter(|c| c.value == CardValue::Number(0)).count();
    let sevens = deck.iter().filter(|c| c.value == CardValue::Number(7)).count();
    let wilds = deck.iter().filter(|c| c.is_wild()).count();
    assert_eq!(zeros, 4);
    assert_eq!(sevens, 8);
    assert_eq!(wilds, 8);
}

#[test]
fn test_deal_is_seeded() {
    let (_, a) = UnoGameBuilder::new().build(99);
    let (_, b) = UnoGameBuilder::new().build(99);
    let (_, c) = UnoGameBuilder::new().build(100);
    assert_eq!(a, b);
    assert_ne!(a.deck, c.deck);
}

#[test]
fn test_custom_names_and_hand_size() {
    let (game, state) = UnoGameBuilder::new().names("Amine", "Hasnae").hand_size(5).build(3);
    assert_eq!(state.players[P0].name, "Amine");
    assert_eq!(state.players[P1].name, "Hasnae");
    assert_eq!(state.hand(P1).len(), 5);
    assert_eq!(state.deck.len(), DECK_SIZE - 11);
    assert!(game.validate(&state).is_ok());
}

#[test]
fn test_largest_hands_still_deal() {
    let max = UnoOptions::MAX_HAND_SIZE;
    for seed in 0..256 {
        let (game, state) = UnoGameBuilder::new().hand_size(max).build(seed);
        assert_eq!(state.hand(P0).len(), max);
        assert_eq!(state.hand(P1).len(), max);
        assert_eq!(state.deck.len(), DECK_SIZE - 1 - 2 * max);
        assert!(!state.top_card().unwrap().is_wild());
        assert!(game.validate(&state).is_ok());
    }
}

#[test]
fn test_oversized_hands_are_capped() {
    for size in [53, 54, 60, usize::MAX] {
        let game = UnoGame::new(UnoOptions::default().with_hand_size(size));
        assert_eq!(game.options().hand_size, UnoOptions::MAX_HAND_SIZE);

        let state = game.initial_state(139);
        assert_eq!(state.hand(P0).len(), UnoOptions::MAX_HAND_SIZE);
        assert!(game.validate(&state).is_ok());
    }
}

#[test]
#[should_panic(expected = "Hand size must be at most")]
fn test_builder_rejects_oversized_hands() {
    let _ = UnoGameBuilder::new().hand_size(UnoOptions::MAX_HAND_SIZE + 1);
}

#[test]
fn test_play_moves_card_to_discard() {
    common::init_logging();
    let (game, mut state) = UnoGameBuilder::new().build(7);
    let color = state.active_color;
    let card = find(&state, |c| c.color == color && matches!(c.value, CardValue::Number(_)));
    let filler = find(&state, |c| c.id != card.id && c.is_wild());
    set_hand(&mut state, P0, &[card, filler]);

    let next = game.apply_play(&state, P0, card.id, None).unwrap();

    assert_eq!(next.hand(P0).len(), 1);
    assert_eq!(next.top_card(), Some(&card));
    assert_eq!(next.active_color, color);
    assert_eq!(next.current_player, P1);
    assert!(next.log.contains("- UNO!"));
    assert_eq!(next.total_cards(), DECK_SIZE);
}

#[test]
fn test_unplayable_card_rejected() {
    let (game, mut state) = UnoGameBuilder::new().build(7);
    let top = *state.top_card().unwrap();
    let color = state.active_color;
    let bad = find(&state, |c| !c.is_wild() && c.color != color && c.value != top.value);
    set_hand(&mut state, P0, &[bad]);

    let err = game.apply_play(&state, P0, bad.id, None).unwrap_err();
    assert_eq!(err.illegal(), Some(IllegalAction::CardNotPlayable));

    let err = game.apply_play(&state, P0, top.id, None).unwrap_err();
    assert_eq!(err.illegal(), Some(IllegalAction::CardNotInHand));
}

#[test]
fn test_draw_two_hits_and_skips() {
    let (game, mut state) = UnoGameBuilder::new().build(13);
    let color = state.active_color;
    let draw_two = find(&state, |c| c.color == color && c.value == CardValue::DrawTwo);
    let keep = find(&state, |c| c.id != draw_two.id && c.is_wild());
    set_hand(&mut state, P0, &[draw_two, keep]);
    let victim_before = state.hand(P1).len();

    let next = game.apply_play(&state, P0, draw_two.id, None).unwrap();

    assert_eq!(next.hand(P1).len(), victim_before + 2);
    assert_eq!(next.current_player, P0);
}

#[test]
fn test_wild_draw_four_with_color() {
    let (game, mut state) = UnoGameBuilder::new().build(17);
    let four = find(&state, |c| c.value == CardValue::WildDrawFour);
    let keep = find(&state, |c| c.id != four.id && c.value == CardValue::Wild);
    set_hand(&mut state, P0, &[four, keep]);

    let next = game
        .apply_play(&state, P0, four.id, Some(CardColor::Yellow))
        .unwrap();

    assert_eq!(next.active_color, CardColor::Yellow);
    assert_eq!(next.hand(P1).len(), 11);
    assert_eq!(next.current_player, P0);
}

#[test]
fn test_win_before_penalty() {
    let state = draw_two_finish(WinPolicy::WinBeforePenalty);
    assert_eq!(state.winner, Some(P0));
    assert_eq!(state.status, UnoStatus::Finished);
    assert_eq!(state.hand(P1).len(), 7);
    assert_eq!(state.total_cards(), DECK_SIZE);
    assert!(state.log.contains("won the game"));
}

#[test]
fn test_penalty_before_win() {
    let state = draw_two_finish(WinPolicy::PenaltyBeforeWin);
    assert_eq!(state.winner, Some(P0));
    assert_eq!(state.hand(P1).len(), 9);
    assert_eq!(state.total_cards(), DECK_SIZE);
}

#[test]
fn test_no_actions_after_win() {
    let game = UnoGame::default();
    let state = draw_two_finish(WinPolicy::WinBeforePenalty);

    assert!(game.active_player(&state).is_none());
    assert!(game.legal_actions(&state, P1).is_empty());
    let err = game.apply_action(&state, P1, &UnoAction::Draw).unwrap_err();
    assert_eq!(err.illegal(), Some(IllegalAction::GameOver));
}

#[test]
fn test_draw_passes_turn_even_when_playable() {
    let (game, state) = UnoGameBuilder::new().build(23);
    let next = game.apply_draw(&state, P0).unwrap();
    assert_eq!(next.hand(P0).len(), 8);
    assert_eq!(next.deck.len(), 92);
    assert_eq!(next.current_player, P1);
}

fn card_strategy() -> impl Strategy<Value = Card> {
    (0..DECK_SIZE).prop_map(|i| ordered_deck()[i])
}

fn color_strategy() -> impl Strategy<Value = CardColor> {
    prop_oneof![
        Just(CardColor::Red),
        Just(CardColor::Blue),
        Just(CardColor::Green),
        Just(CardColor::Yellow),
    ]
}

proptest! {
    #[test]
    fn prop_wild_always_playable(top in card_strategy(), color in color_strategy()) {
        let wild = ordered_deck().into_iter().find(|c| c.value == CardValue::Wild).unwrap();
        prop_assert!(is_valid_move(&wild, &top, color));
    }

    #[test]
    fn prop_matching_color_or_value_playable(card in card_strategy(), top in card_strategy()) {
        prop_assume!(!card.is_wild() && !top.is_wild());
        prop_assert!(is_valid_move(&card, &top, card.color));
        let off_color = if card.color == CardColor::Red { CardColor::Blue } else { CardColor::Red };
        prop_assert_eq!(is_valid_move(&card, &top, off_color), card.value == top.value);
    }

    #[test]
    fn prop_random_playout_keeps_invariants(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<usize>(), 1..150),
    ) {
        let game = UnoGame::default();
        let mut state = game.initial_state(seed);

        for pick in picks {
            let Some(player) = game.active_player(&state) else { break };
            let actions = game.legal_actions(&state, player);
            prop_assert!(!actions.is_empty());
            let action = actions[pick % actions.len()];
            let hand_before = state.hand(player).len();

            let next = game.apply_action(&state, player, &action).unwrap();
            prop_assert!(game.validate(&next).is_ok());
            prop_assert_eq!(next.total_cards(), DECK_SIZE);

            if let UnoAction::Play { card, .. } = action {
                prop_assert_eq!(next.top_card().map(|c| c.id), Some(card));
                if next.winner.is_none() {
                    prop_assert_eq!(next.hand(player).len(), hand_before - 1);
                } else {
                    prop_assert!(next.hand(player).is_empty());
                }
            }
            state = next;
        }
    }
}
