//! Command-line driver for the noughts engine
//!
//! Plays games against the minimax engine, solves single positions, and runs
//! the PageRank estimators over a crawled HTML corpus.

pub mod commands;
pub mod config;
pub mod output;
