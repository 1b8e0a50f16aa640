//! Exhaustive minimax search.
//!
//! X maximizes [`Board::utility`], O minimizes it. The full game tree below
//! the given board is explored without memoization or pruning; on a 3x3 board
//! that is at most nine plies deep.
//!
//! Ties between equally valued actions keep the earliest action in
//! [`Board::legal_actions`] order, which is row-major. Searching the empty
//! board therefore always answers `(0, 0)`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    tictactoe::{Action, Board, Player},
};

/// Work done by a search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Boards visited below the searched root
    pub nodes: u64,
    /// Terminal boards among them
    pub leaves: u64,
}

impl SearchStats {
    fn since(self, earlier: SearchStats) -> SearchStats {
        SearchStats {
            nodes: self.nodes - earlier.nodes,
            leaves: self.leaves - earlier.leaves,
        }
    }
}

/// Minimax value of playing one action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionValue {
    pub action: Action,
    pub value: i32,
}

/// The action chosen for a board, its value, and what it cost to find
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub value: i32,
    pub stats: SearchStats,
}

/// Minimax searcher that keeps running statistics across calls.
///
/// The statistics are bookkeeping only; results depend on the board alone.
#[derive(Debug, Default)]
pub struct Minimax {
    stats: SearchStats,
}

impl Minimax {
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals over every search run by this instance
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Best value X can force from `board`
    pub fn max_value(&mut self, board: &Board) -> i32 {
        self.value(board, Player::X)
    }

    /// Best value O can force from `board`
    pub fn min_value(&mut self, board: &Board) -> i32 {
        self.value(board, Player::O)
    }

    /// Value of `board` when `chooser` picks the next action.
    fn value(&mut self, board: &Board, chooser: Player) -> i32 {
        self.stats.nodes += 1;
        if board.is_terminal() {
            self.stats.leaves += 1;
            return board.utility();
        }

        let mut best = if chooser.is_maximizer() {
            i32::MIN
        } else {
            i32::MAX
        };
        for action in board.legal_actions() {
            if let Ok(next) = board.apply(action) {
                let value = self.value(&next, chooser.opponent());
                best = if chooser.is_maximizer() {
                    best.max(value)
                } else {
                    best.min(value)
                };
            }
        }
        best
    }

    /// Minimax value of every legal action, in legal-action order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalAction`] if `board` is terminal.
    pub fn evaluate_actions(&mut self, board: &Board) -> Result<Vec<ActionValue>> {
        if board.is_terminal() {
            return Err(Error::NoLegalAction);
        }

        let mover = board.current_player();
        board
            .legal_actions()
            .into_iter()
            .map(|action| -> Result<ActionValue> {
                let next = board.apply(action)?;
                let value = self.value(&next, mover.opponent());
                Ok(ActionValue { action, value })
            })
            .collect()
    }

    /// Pick the optimal action for the player to move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalAction`] if `board` is terminal.
    pub fn decide(&mut self, board: &Board) -> Result<Decision> {
        let start = self.stats;
        let mover = board.current_player();

        let mut best: Option<ActionValue> = None;
        for candidate in self.evaluate_actions(board)? {
            let improves = match best {
                None => true,
                Some(current) if mover.is_maximizer() => candidate.value > current.value,
                Some(current) => candidate.value < current.value,
            };
            if improves {
                best = Some(candidate);
            }
        }
        let best = best.ok_or(Error::NoLegalAction)?;

        let stats = self.stats.since(start);
        debug!(
            board = %board.encode(),
            player = %mover,
            action = %best.action,
            value = best.value,
            nodes = stats.nodes,
            "minimax decision"
        );

        Ok(Decision {
            action: best.action,
            value: best.value,
            stats,
        })
    }
}

/// Optimal action for the player to move on `board`.
///
/// # Errors
///
/// Returns [`Error::NoLegalAction`] if `board` is terminal.
pub fn decide(board: &Board) -> Result<Action> {
    Minimax::new().decide(board).map(|decision| decision.action)
}

/// Best value X can force from `board`
pub fn max_value(board: &Board) -> i32 {
    Minimax::new().max_value(board)
}

/// Best value O can force from `board`
pub fn min_value(board: &Board) -> i32 {
    Minimax::new().min_value(board)
}

/// Minimax value of every legal action on `board`.
///
/// # Errors
///
/// Returns [`Error::NoLegalAction`] if `board` is terminal.
pub fn evaluate_actions(board: &Board) -> Result<Vec<ActionValue>> {
    Minimax::new().evaluate_actions(board)
}
