//! End-to-end minimax behavior

mod common;

use noughts::{
    Action, Board, Cell, Error, Minimax, Outcome, Player, decide, max_value, min_value,
    search::evaluate_actions,
};

use common::reachable_boards;

const E: Cell = Cell::Empty;

#[test]
fn x_completes_the_top_row() {
    let board = Board::from_rows([
        [Cell::X, Cell::X, E],
        [Cell::O, Cell::O, E],
        [E, E, E],
    ]);
    assert_eq!(board.current_player(), Player::X);

    let action = decide(&board).unwrap();
    assert_eq!(action, Action::new(0, 2));

    let after = board.apply(action).unwrap();
    assert!(after.is_terminal());
    assert_eq!(after.winner(), Some(Player::X));
    assert_eq!(after.utility(), 1);
}

#[test]
fn optimal_self_play_is_a_draw() {
    let mut board = Board::initial();
    let mut plies = 0;
    while !board.is_terminal() {
        let action = decide(&board).unwrap();
        board = board.apply(action).unwrap();
        plies += 1;
        assert!(plies <= 9);
    }

    assert_eq!(board.outcome(), Outcome::Draw);
    assert_eq!(board.utility(), 0);
}

#[test]
fn opening_move_is_first_drawing_action() {
    let board = Board::initial();
    assert!(!board.is_terminal());

    let decision = Minimax::new().decide(&board).unwrap();
    assert_eq!(decision.value, 0);
    assert_eq!(decision.action, Action::new(0, 0));
    assert_eq!(min_value(&board.apply(decision.action).unwrap()), 0);

    // Every node of the full game tree below the root, and every finished game.
    assert_eq!(decision.stats.nodes, 549_945);
    assert_eq!(decision.stats.leaves, 255_168);
}

#[test]
fn decide_fails_on_terminal_boards() {
    let won: Board = "XXX/OO./...".parse().unwrap();
    let drawn: Board = "XOX/XOO/OXX".parse().unwrap();
    for board in [won, drawn] {
        assert!(matches!(decide(&board), Err(Error::NoLegalAction)));
    }
}

#[test]
fn decision_value_matches_position_value() {
    // Boards with at most six empty cells keep this exhaustive check quick.
    for board in reachable_boards()
        .into_iter()
        .filter(|b| !b.is_terminal() && b.empty_count() <= 6)
    {
        let decision = Minimax::new().decide(&board).unwrap();
        let after = board.apply(decision.action).unwrap();
        match board.current_player() {
            Player::X => {
                assert_eq!(decision.value, max_value(&board));
                assert_eq!(decision.value, min_value(&after));
            }
            Player::O => {
                assert_eq!(decision.value, min_value(&board));
                assert_eq!(decision.value, max_value(&after));
            }
        }
    }
}

#[test]
fn decision_is_earliest_among_best_actions() {
    for board in reachable_boards()
        .into_iter()
        .filter(|b| !b.is_terminal() && b.empty_count() <= 5)
    {
        let values = evaluate_actions(&board).unwrap();
        let best = match board.current_player() {
            Player::X => values.iter().map(|v| v.value).max(),
            Player::O => values.iter().map(|v| v.value).min(),
        }
        .unwrap();
        let first_best = values.iter().find(|v| v.value == best).unwrap().action;

        assert_eq!(decide(&board).unwrap(), first_best);
    }
}

#[test]
fn o_blocks_a_row_threat() {
    let board: Board = "XX./.O./...".parse().unwrap();
    assert_eq!(board.current_player(), Player::O);
    assert_eq!(decide(&board).unwrap(), Action::new(0, 2));
}

#[test]
fn only_the_centre_saves_o_after_a_corner_opening() {
    let board: Board = "X../.../...".parse().unwrap();
    let values = evaluate_actions(&board).unwrap();

    assert_eq!(values.len(), 8);
    for entry in &values {
        let expected = if entry.action == Action::new(1, 1) { 0 } else { 1 };
        assert_eq!(entry.value, expected, "reply {}", entry.action);
    }
    assert_eq!(decide(&board).unwrap(), Action::new(1, 1));
}
