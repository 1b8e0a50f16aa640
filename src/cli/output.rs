//! Output formatting and progress spinners for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::tictactoe::Board;

/// Create a spinner for long searches.
///
/// Falls back to the default spinner style if the template is rejected.
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Render a board with row and column numbers, as a human player sees it
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("   0 1 2\n");
    for (r, row) in board.rows().iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|c| c.to_char().to_string()).collect();
        out.push_str(&format!(" {r} {}\n", cells.join(" ")));
    }
    out
}
