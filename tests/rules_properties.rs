//! Rule invariants checked over every reachable board

mod common;

use noughts::{Action, Board, Cell, Error, Outcome, Player};

use common::reachable_boards;

#[test]
fn reachable_board_count_matches_known_total() {
    assert_eq!(reachable_boards().len(), 5478);
}

#[test]
fn piece_counts_alternate_on_every_reachable_board() {
    for board in reachable_boards() {
        let x = board.count(Cell::X);
        let o = board.count(Cell::O);
        assert!(x == o || x == o + 1, "bad counts on {}", board.encode());
        assert_eq!(board.cells().len(), 9);
    }
}

#[test]
fn apply_changes_exactly_one_cell_to_current_player() {
    for board in reachable_boards().into_iter().filter(|b| !b.is_terminal()) {
        let mover = board.current_player();
        for action in board.legal_actions() {
            let next = board.apply(action).unwrap();
            let changed: Vec<usize> = (0..9)
                .filter(|&i| board.cells()[i] != next.cells()[i])
                .collect();

            assert_eq!(changed, vec![action.index().unwrap()]);
            assert_eq!(next.get(action), Some(mover.to_cell()));
            assert_eq!(next.current_player(), mover.opponent());
        }
    }
}

#[test]
fn terminal_iff_winner_or_no_actions() {
    for board in reachable_boards() {
        assert_eq!(
            board.is_terminal(),
            board.winner().is_some() || board.legal_actions().is_empty(),
            "terminal mismatch on {}",
            board.encode()
        );
    }
}

#[test]
fn utility_agrees_with_winner() {
    for board in reachable_boards().into_iter().filter(Board::is_terminal) {
        let expected = match board.winner() {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => 0,
        };
        assert_eq!(board.utility(), expected);
        assert!(board.outcome().is_terminal());
    }
}

#[test]
fn outcome_is_never_in_progress_when_terminal() {
    for board in reachable_boards() {
        let outcome = board.outcome();
        assert_eq!(outcome == Outcome::InProgress, !board.is_terminal());
        if let Outcome::Win(player) = outcome {
            assert_eq!(board.winner(), Some(player));
        }
    }
}

#[test]
fn occupied_cells_are_rejected_without_side_effects() {
    let first = Board::initial().apply(Action::new(0, 0)).unwrap();
    assert_eq!(first.get(Action::new(0, 0)), Some(Cell::X));
    assert_eq!(first.empty_count(), 8);

    let copy = first;
    let err = first.apply(Action::new(0, 0)).unwrap_err();
    assert!(matches!(err, Error::InvalidAction { row: 0, col: 0, .. }));
    assert_eq!(first, copy);
}

#[test]
fn full_game_enumeration_matches_known_counts() {
    fn traverse(board: &Board, counts: &mut [usize; 3]) {
        match board.outcome() {
            Outcome::Win(Player::X) => counts[0] += 1,
            Outcome::Win(Player::O) => counts[1] += 1,
            Outcome::Draw => counts[2] += 1,
            Outcome::InProgress => {
                for action in board.legal_actions() {
                    traverse(&board.apply(action).unwrap(), counts);
                }
            }
        }
    }

    let mut counts = [0; 3];
    traverse(&Board::initial(), &mut counts);
    assert_eq!(counts, [131_184, 77_904, 46_080]);
    assert_eq!(counts.iter().sum::<usize>(), 255_168);
}
