//! Exhaustive minimax engine for 3x3 Tic-Tac-Toe
//!
//! This crate provides:
//! - An immutable board value with rules derived on demand
//! - Full-depth minimax search returning the optimal action
//! - A command-line driver for playing and solving positions
//! - A companion PageRank estimator over a crawled HTML corpus

pub mod cli;
pub mod error;
pub mod pagerank;
pub mod search;
pub mod tictactoe;

pub use error::{Error, Result};
pub use search::{Decision, Minimax, decide, max_value, min_value};
pub use tictactoe::{Action, Board, Cell, Outcome, Player};
