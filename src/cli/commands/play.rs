//! Play command - play against the engine, or watch it play itself

use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;

use crate::{
    cli::output,
    search::Minimax,
    tictactoe::{Action, Board, Game, Outcome, Player},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Side {
    X,
    O,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Play tic-tac-toe against the minimax engine")]
pub struct PlayArgs {
    /// Side played by a human on stdin; omit to let the engine play both sides
    #[arg(long, value_enum)]
    pub human: Option<Side>,

    /// Write the finished game to this file as JSON
    #[arg(long)]
    pub transcript: Option<PathBuf>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let game = run_game(args.human.map(Player::from), &mut input, &mut out)?;

    if let Some(path) = args.transcript {
        let json = serde_json::to_string_pretty(&game)?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write transcript to {}", path.display()))?;
        println!("\nTranscript written to: {}", path.display());
    }
    Ok(())
}

/// Run one game to completion.
///
/// `human` moves are read from `input` one per line as `row,col`; every other
/// move comes from the engine.
pub fn run_game(
    human: Option<Player>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Game> {
    let mut game = Game::new();
    let mut board = Board::initial();
    let mut engine = Minimax::new();

    while !board.is_terminal() {
        writeln!(out, "\n{}", output::render_board(&board))?;
        let player = board.current_player();
        let action = if human == Some(player) {
            read_human_action(&board, input, out)?
        } else {
            engine_action(&mut engine, &board, out)?
        };
        board = game.play(action)?;
    }

    writeln!(out, "\n{}", output::render_board(&board))?;
    let outcome = board.outcome();
    match outcome {
        Outcome::Win(player) => writeln!(out, "Game over: {player} wins")?,
        Outcome::Draw => writeln!(out, "Game over: draw")?,
        Outcome::InProgress => {}
    }
    info!(ply = game.ply(), ?outcome, "game finished");

    Ok(game)
}

fn engine_action(engine: &mut Minimax, board: &Board, out: &mut impl Write) -> Result<Action> {
    // Only the opening search is slow enough to deserve a spinner.
    let spinner = (board.occupied_count() == 0).then(|| output::create_spinner("Searching..."));
    let decision = engine.decide(board)?;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    writeln!(
        out,
        "Engine ({}) plays {} after searching {} positions",
        board.current_player(),
        decision.action,
        decision.stats.nodes
    )?;
    Ok(decision.action)
}

fn read_human_action(board: &Board, input: &mut impl BufRead, out: &mut impl Write) -> Result<Action> {
    loop {
        write!(out, "Your move as {} (row,col): ", board.current_player())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before the game finished");
        }

        let action = match line.trim().parse::<Action>() {
            Ok(action) => action,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        match board.apply(action) {
            Ok(_) => return Ok(action),
            Err(err) => writeln!(out, "{err}")?,
        }
    }
}
