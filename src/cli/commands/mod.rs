//! Subcommands of the `noughts` binary

pub mod pagerank;
pub mod play;
pub mod solve;
