//! Tic-Tac-Toe board, rules and game records

pub mod board;
pub mod game;
pub mod lines;
pub mod rules;

pub use board::{Action, Board, Cell, Player};
pub use game::{Game, Move};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use rules::Outcome;
