//! Three Men's Morris rules through the engine API.

use duel_engines::games::grid::{CELLS, LINES};
use duel_engines::games::morris::{MorrisAction, MorrisGame, MorrisPhase, MorrisState};
use duel_engines::{GameResult, IllegalAction, PlayerId, PlayerMap, RulesEngine};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn moving_state(p0: [usize; 3], p1: [usize; 3], turn: PlayerId) -> MorrisState {
    let mut state = MorrisState::default();
    for idx in p0 {
        state.board[idx] = Some(P0);
    }
    for idx in p1 {
        state.board[idx] = Some(P1);
    }
    state.pieces_placed = PlayerMap::with_value(3);
    state.phase = MorrisPhase::Moving;
    state.turn = turn;
    state
}

#[test]
fn test_every_line_wins_on_placement() {
    let game = MorrisGame::new();
    for line in LINES {
        let mut state = MorrisState::default();
        state.board[line[0]] = Some(P0);
        state.board[line[1]] = Some(P0);
        let elsewhere: Vec<usize> = (0..CELLS).filter(|i| !line.contains(i)).take(2).collect();
        for &idx in &elsewhere {
            state.board[idx] = Some(P1);
        }
        state.pieces_placed[P0] = 2;
        state.pieces_placed[P1] = 2;

        let next = game.apply_action(&state, P0, &MorrisAction::Place(line[2])).unwrap();
        assert_eq!(next.winner, Some(P0), "line {line:?}");
        assert_eq!(next.turn, P0);
        assert_eq!(game.is_terminal(&next), Some(GameResult::Winner(P0)));
        assert!(next.log.ends_with("Wins!"));
    }
}

#[test]
fn test_fourth_placement_rejected() {
    let game = MorrisGame::new();
    let mut state = MorrisState::default();
    for idx in [0, 1, 5] {
        state.board[idx] = Some(P0);
    }
    for idx in [3, 8] {
        state.board[idx] = Some(P1);
    }
    state.pieces_placed[P0] = 3;
    state.pieces_placed[P1] = 2;

    let err = game.apply_action(&state, P0, &MorrisAction::Place(6)).unwrap_err();
    assert_eq!(err.illegal(), Some(IllegalAction::PieceLimit));
    assert!(game.legal_actions(&state, P0).is_empty());
}

#[test]
fn test_move_rules() {
    let game = MorrisGame::new();
    let state = moving_state([1, 6, 8], [0, 2, 4], P0);

    let err = game
        .apply_action(&state, P0, &MorrisAction::Move { from: 1, to: 3 })
        .unwrap_err();
    assert_eq!(err.illegal(), Some(IllegalAction::NotAdjacent));

    let err = game
        .apply_action(&state, P0, &MorrisAction::Move { from: 0, to: 3 })
        .unwrap_err();
    assert_eq!(err.illegal(), Some(IllegalAction::NotYourPiece));

    let err = game
        .apply_action(&state, P0, &MorrisAction::Move { from: 8, to: 4 })
        .unwrap_err();
    assert_eq!(err.illegal(), Some(IllegalAction::Occupied));

    let err = game.apply_action(&state, P0, &MorrisAction::Place(3)).unwrap_err();
    assert_eq!(err.illegal(), Some(IllegalAction::WrongPhase));

    let next = game
        .apply_action(&state, P0, &MorrisAction::Move { from: 6, to: 3 })
        .unwrap();
    assert_eq!(next.board[3], Some(P0));
    assert!(next.board[6].is_none());
    assert_eq!(next.turn, P1);
}

#[test]
fn test_win_by_moving() {
    let game = MorrisGame::new();
    let state = moving_state([0, 1, 5], [3, 4, 7], P0);

    let next = game
        .apply_action(&state, P0, &MorrisAction::Move { from: 5, to: 2 })
        .unwrap();
    assert_eq!(next.winner, Some(P0));

    let err = game
        .apply_action(&next, P1, &MorrisAction::Move { from: 3, to: 6 })
        .unwrap_err();
    assert_eq!(err.illegal(), Some(IllegalAction::GameOver));
}

#[test]
fn test_full_placement_round() {
    let game = MorrisGame::new();
    let actions = [
        (P0, MorrisAction::Place(4)),
        (P1, MorrisAction::Place(0)),
        (P0, MorrisAction::Place(2)),
        (P1, MorrisAction::Place(6)),
        (P0, MorrisAction::Place(3)),
        (P1, MorrisAction::Place(5)),
    ];
    let state = game.apply_all(&game.initial_state(0), &actions).unwrap();

    assert_eq!(state.phase, MorrisPhase::Moving);
    assert!(state.winner.is_none());
    assert_eq!(state.pieces_placed[P0], 3);
    assert!(game.validate(&state).is_ok());
    assert!(!game.legal_actions(&state, P0).is_empty());
}

#[test]
fn test_out_of_range_points_rejected() {
    let game = MorrisGame::new();
    let placing = game.initial_state(0);
    let err = game.apply_action(&placing, P0, &MorrisAction::Place(CELLS)).unwrap_err();
    assert_eq!(err.illegal(), Some(IllegalAction::OutOfBounds));

    let moving = moving_state([1, 6, 8], [0, 2, 4], P0);
    for action in [
        MorrisAction::Move { from: 9, to: 3 },
        MorrisAction::Move { from: 6, to: 12 },
        MorrisAction::Move { from: usize::MAX, to: 3 },
    ] {
        let err = game.apply_action(&moving, P0, &action).unwrap_err();
        assert_eq!(err.illegal(), Some(IllegalAction::OutOfBounds), "{action:?}");
    }
}
