//! Common test utilities for the noughts test suite.

use std::collections::HashSet;

use noughts::Board;

/// Every board reachable from the empty board by legal play, including
/// terminal boards.
pub fn reachable_boards() -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut stack = vec![Board::initial()];
    let mut boards = Vec::new();

    while let Some(board) = stack.pop() {
        if !seen.insert(board) {
            continue;
        }
        boards.push(board);
        if board.is_terminal() {
            continue;
        }
        for action in board.legal_actions() {
            stack.push(board.apply(action).expect("legal action must apply"));
        }
    }

    boards
}
