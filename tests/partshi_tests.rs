//! Partshi races with fixed dice and seeded playouts.

mod common;

use duel_engines::core::SixReroll;
use duel_engines::games::partshi::{
    PartshiAction, PartshiGame, PartshiGameBuilder, PartshiState, Position, PIECES,
};
use duel_engines::{GameResult, IllegalAction, PlayerId, RulesEngine};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn roll_and_move(
    game: &PartshiGame,
    state: &PartshiState,
    player: PlayerId,
    value: u8,
    piece: u8,
) -> PartshiState {
    let rolled = game.apply_roll_value(state, player, value).unwrap();
    game.apply_move(&rolled, player, piece).unwrap()
}

#[test]
fn test_base_needs_six() {
    let game = PartshiGame::default();
    let mut state = PartshiState::new(0);
    state.players[P0][0].position = Position::Track(10);

    let rolled = game.apply_roll_value(&state, P0, 5).unwrap();
    let err = game.apply_move(&rolled, P0, 1).unwrap_err();
    assert_eq!(err.illegal(), Some(IllegalAction::NeedSix));

    let moved = game.apply_move(&rolled, P0, 0).unwrap();
    assert_eq!(moved.pieces(P0)[0].position, Position::Track(15));
    assert_eq!(moved.turn, P1);
    assert!(moved.can_roll);
    assert!(moved.dice.is_none());
}

#[test]
fn test_roll_six_keeps_rolling() {
    let game = PartshiGame::default();
    let state = roll_and_move(&game, &PartshiState::new(0), P0, 6, 0);
    assert_eq!(state.turn, P0);
    assert!(state.can_roll);
    assert_eq!(game.legal_actions(&state, P0), vec![PartshiAction::Roll]);
}

#[test]
fn test_capture_sends_all_to_base() {
    common::init_logging();
    let game = PartshiGame::default();
    let mut state = PartshiState::new(0);
    state.players[P0][0].position = Position::Track(3);
    state.players[P1][0].position = Position::Track(5);
    state.players[P1][1].position = Position::Track(5);
    state.players[P1][2].position = Position::Track(40);

    let next = roll_and_move(&game, &state, P0, 2, 0);

    assert_eq!(next.pieces(P0)[0].position, Position::Track(5));
    assert_eq!(next.pieces(P1)[0].position, Position::Base);
    assert_eq!(next.pieces(P1)[1].position, Position::Base);
    assert_eq!(next.pieces(P1)[2].position, Position::Track(40));
    assert!(next.log.contains("Captured!"));
    // A capture earns another roll.
    assert_eq!(next.turn, P0);
    assert!(next.can_roll);
}

#[test]
fn test_safe_spot_blocks_capture() {
    let game = PartshiGame::default();
    let mut state = PartshiState::new(0);
    state.players[P0][0].position = Position::Track(5);
    state.players[P1][0].position = Position::Track(8);

    let next = roll_and_move(&game, &state, P0, 3, 0);

    assert_eq!(next.pieces(P0)[0].position, Position::Track(8));
    assert_eq!(next.pieces(P1)[0].position, Position::Track(8));
    assert_eq!(next.turn, P1);
}

#[test]
fn test_own_pieces_are_never_captured() {
    let game = PartshiGame::default();
    let mut state = PartshiState::new(0);
    state.players[P0][0].position = Position::Track(3);
    state.players[P0][1].position = Position::Track(5);

    let next = roll_and_move(&game, &state, P0, 2, 0);
    assert_eq!(next.pieces(P0)[0].position, Position::Track(5));
    assert_eq!(next.pieces(P0)[1].position, Position::Track(5));
}

#[test]
fn test_home_stretch_for_seat_one() {
    let game = PartshiGame::default();
    let mut state = PartshiState::new(0);
    state.turn = P1;
    state.players[P1][0].position = Position::Track(22);

    let next = roll_and_move(&game, &state, P1, 4, 0);
    assert_eq!(next.pieces(P1)[0].position, Position::HomePath(1));
    assert_eq!(next.turn, P0);
}

#[test]
fn test_win_requires_all_four_home() {
    let game = PartshiGame::default();
    let mut state = PartshiState::new(0);
    for id in 0..PIECES - 1 {
        state.players[P0][id].position = Position::Goal;
    }
    state.players[P0][3].position = Position::HomePath(2);

    let short = roll_and_move(&game, &state, P0, 3, 3);
    assert!(short.winner.is_none());
    assert_eq!(short.pieces(P0)[3].position, Position::HomePath(5));

    let done = roll_and_move(&game, &state, P0, 4, 3);
    assert_eq!(done.winner, Some(P0));
    assert_eq!(game.is_terminal(&done), Some(GameResult::Winner(P0)));
    assert!(game.legal_actions(&done, P0).is_empty());

    let err = game.apply_roll(&done, P0).unwrap_err();
    assert_eq!(err.illegal(), Some(IllegalAction::GameOver));
}

#[test]
fn test_goal_piece_cannot_move() {
    let game = PartshiGame::default();
    let mut state = PartshiState::new(0);
    state.players[P0][0].position = Position::Goal;
    state.players[P0][1].position = Position::Track(30);

    let rolled = game.apply_roll_value(&state, P0, 2).unwrap();
    let err = game.apply_move(&rolled, P0, 0).unwrap_err();
    assert_eq!(err.illegal(), Some(IllegalAction::IllegalMove));
    assert_eq!(game.legal_actions(&rolled, P0), vec![PartshiAction::Move(1)]);
}

#[test]
fn test_unusable_six_under_each_policy() {
    let state = PartshiState::new(0);
    for (policy, keeps_turn) in [(SixReroll::Always, true), (SixReroll::AfterMoveOnly, false)] {
        let (game, _) = PartshiGameBuilder::new().six_reroll(policy).build(0);
        let mut blocked = state.clone();
        for id in 0..PIECES {
            blocked.players[P0][id].position = Position::HomePath(1);
        }
        let next = game.apply_roll_value(&blocked, P0, 6).unwrap();
        assert_eq!(next.turn == P0, keeps_turn, "{policy:?}");
        assert!(next.can_roll);
    }
}

#[test]
fn test_seeded_playout_is_reproducible_and_valid() {
    let game = PartshiGame::default();

    let run = |seed: u64| {
        let mut state = game.initial_state(seed);
        let mut history = Vec::new();
        for _ in 0..400 {
            let Some(player) = game.active_player(&state) else { break };
            let actions = game.legal_actions(&state, player);
            assert!(!actions.is_empty());
            // Always take the last offered action.
            let action = actions[actions.len() - 1];
            state = game.apply_action(&state, player, &action).unwrap();
            assert!(game.validate(&state).is_ok());
            history.push(state.clone());
        }
        history
    };

    assert_eq!(run(77), run(77));
}
