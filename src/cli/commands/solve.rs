//! Solve command - minimax analysis of a single position

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::output::{print_kv, print_section, print_subsection, render_board},
    search::{ActionValue, Decision, Minimax},
    tictactoe::{Action, Board, Outcome, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Compute the optimal move for a position")]
pub struct SolveArgs {
    /// Board as 9 cells in row-major order, e.g. "XX./OO./..." ('.' for empty)
    #[arg(default_value = ".........")]
    pub board: String,

    /// Print the analysis as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Everything the solver knows about one position
#[derive(Debug, Serialize)]
pub struct Analysis {
    pub board: String,
    pub to_move: Player,
    pub outcome: Outcome,
    pub immediate_wins: Vec<Action>,
    pub actions: Vec<ActionValue>,
    pub decision: Option<Decision>,
}

pub fn analyze(board: &Board) -> crate::Result<Analysis> {
    let mut analysis = Analysis {
        board: board.encode(),
        to_move: board.current_player(),
        outcome: board.outcome(),
        immediate_wins: Vec::new(),
        actions: Vec::new(),
        decision: None,
    };
    if board.is_terminal() {
        return Ok(analysis);
    }

    let mut search = Minimax::new();
    analysis.immediate_wins = board.immediate_wins();
    analysis.actions = search.evaluate_actions(board)?;
    analysis.decision = Some(search.decide(board)?);
    Ok(analysis)
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let board: Board = args
        .board
        .parse()
        .with_context(|| format!("could not parse board '{}'", args.board))?;
    let analysis = analyze(&board)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    print_section("Position");
    print!("{}", render_board(&board));

    let Some(decision) = analysis.decision else {
        println!("\nThe game is over: {}", describe(analysis.outcome));
        return Ok(());
    };

    print_kv("To move", &analysis.to_move.to_string());
    if !analysis.immediate_wins.is_empty() {
        let wins: Vec<String> = analysis.immediate_wins.iter().map(Action::to_string).collect();
        print_kv("Immediate wins", &wins.join(" "));
    }

    print_subsection("Action values (+1 X wins, -1 O wins)");
    for entry in &analysis.actions {
        println!("  {}  {:+}", entry.action, entry.value);
    }

    print_subsection("Decision");
    print_kv("Best action", &decision.action.to_string());
    print_kv("Value", &format!("{:+}", decision.value));
    print_kv("Positions searched", &decision.stats.nodes.to_string());
    print_kv("Terminal positions", &decision.stats.leaves.to_string());

    Ok(())
}

fn describe(outcome: Outcome) -> String {
    match outcome {
        Outcome::Win(player) => format!("{player} wins"),
        Outcome::Draw => "draw".to_string(),
        Outcome::InProgress => "in progress".to_string(),
    }
}
