//! Game rules derived from a board.
//!
//! Nothing here is cached: the player to move, the winner and the outcome are
//! recomputed from the cells every time, so they can never disagree with each
//! other.

use serde::{Deserialize, Serialize};

use super::{Action, Board, Cell, Player, lines::LineAnalyzer};

/// State of a game as read off a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Draw,
    InProgress,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl Board {
    /// The player whose turn it is.
    ///
    /// X moves whenever it has not placed more marks than O. This is total:
    /// terminal boards still report a player.
    pub fn current_player(&self) -> Player {
        if self.count(Cell::X) <= self.count(Cell::O) {
            Player::X
        } else {
            Player::O
        }
    }

    /// Every empty cell, in row-major order.
    pub fn legal_actions(&self) -> Vec<Action> {
        self.cells()
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .filter_map(|(idx, _)| Action::from_index(idx))
            .collect()
    }

    /// Place the current player's mark at `action` and return the new board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidAction`] if the coordinates are off the
    /// board or the cell is occupied. `self` is untouched either way.
    pub fn apply(&self, action: Action) -> crate::Result<Board> {
        let invalid = |reason| crate::Error::InvalidAction {
            row: action.row,
            col: action.col,
            reason,
        };
        let index = action.index().ok_or_else(|| invalid("coordinates out of range"))?;
        if self.cells()[index] != Cell::Empty {
            return Err(invalid("cell is already occupied"));
        }
        Ok(self.with_cell(index, self.current_player().to_cell()))
    }

    /// The owner of a completed line, if any
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::completed_line(self.cells())
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.empty_count() == 0
    }

    /// Check if the position is a draw (all cells filled, no winner)
    pub fn is_draw(&self) -> bool {
        self.empty_count() == 0 && self.winner().is_none()
    }

    /// +1 if X has won, -1 if O has won, 0 otherwise.
    ///
    /// Only meaningful on terminal boards; a game in progress scores 0.
    pub fn utility(&self) -> i32 {
        match self.winner() {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => 0,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self.winner() {
            Some(player) => Outcome::Win(player),
            None if self.empty_count() == 0 => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }

    /// Cells where the current player would complete a line right now
    pub fn immediate_wins(&self) -> Vec<Action> {
        LineAnalyzer::winning_moves(self.cells(), self.current_player())
    }
}
