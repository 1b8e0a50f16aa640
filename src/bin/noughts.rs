//! noughts CLI - minimax tic-tac-toe engine and PageRank estimator
//!
//! This CLI provides:
//! - Playing against the engine, or watching it play itself
//! - Solving a single position with per-move minimax values
//! - Ranking the pages of an HTML corpus

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Exhaustive minimax tic-tac-toe engine", long_about = None)]
struct Cli {
    /// Log search decisions and other debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game against the engine
    Play(noughts::cli::commands::play::PlayArgs),

    /// Compute the optimal move for a position
    Solve(noughts::cli::commands::solve::SolveArgs),

    /// Rank the pages of an HTML corpus
    Pagerank(noughts::cli::commands::pagerank::PagerankArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Play(args) => noughts::cli::commands::play::execute(args),
        Commands::Solve(args) => noughts::cli::commands::solve::execute(args),
        Commands::Pagerank(args) => noughts::cli::commands::pagerank::execute(args),
    }
}
