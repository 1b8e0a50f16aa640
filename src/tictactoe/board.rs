//! Board state representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player owning this mark, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }
}

/// A player in the game. X always moves first and maximizes utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Whether this player maximizes utility during search
    pub fn is_maximizer(self) -> bool {
        self == Player::X
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// A move target: row and column, each expected in `0..3`.
///
/// Construction does not validate the coordinates; [`Board::apply`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub const fn new(row: usize, col: usize) -> Self {
        Action { row, col }
    }

    /// Build an action from a row-major cell index (0-8)
    pub fn from_index(index: usize) -> Option<Self> {
        (index < Board::CELLS).then(|| Action::new(index / Board::SIDE, index % Board::SIDE))
    }

    /// Row-major cell index, or `None` when either coordinate is off the board
    pub fn index(self) -> Option<usize> {
        self.in_bounds().then_some(self.row * Board::SIDE + self.col)
    }

    pub fn in_bounds(self) -> bool {
        self.row < Board::SIDE && self.col < Board::SIDE
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Parses `"row,col"`, `"row col"` or `"(row, col)"`.
impl FromStr for Action {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::Error::InvalidActionText {
            input: s.to_string(),
        };
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let mut parts = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty());

        let row = parts.next().ok_or_else(invalid)?;
        let col = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        let action = Action::new(
            row.parse().map_err(|_| invalid())?,
            col.parse().map_err(|_| invalid())?,
        );
        if !action.in_bounds() {
            return Err(invalid());
        }
        Ok(action)
    }
}

/// A 3x3 grid of cells in row-major order.
///
/// Boards are small `Copy` values and are never mutated once built: every move
/// produces a fresh board. The player to move and the game outcome are derived
/// from the cells on demand (see the rules module), never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    pub const SIDE: usize = 3;
    pub const CELLS: usize = Self::SIDE * Self::SIDE;

    /// The empty starting board
    pub fn initial() -> Self {
        Board {
            cells: [Cell::Empty; Self::CELLS],
        }
    }

    /// Build a board from three rows without checking piece counts.
    pub fn from_rows(rows: [[Cell; 3]; 3]) -> Self {
        let mut cells = [Cell::Empty; Self::CELLS];
        for (r, row) in rows.iter().enumerate() {
            cells[r * Self::SIDE..(r + 1) * Self::SIDE].copy_from_slice(row);
        }
        Board { cells }
    }

    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// The cell at `action`, or `None` when the coordinates are off the board
    pub fn get(&self, action: Action) -> Option<Cell> {
        action.index().map(|idx| self.cells[idx])
    }

    pub fn rows(&self) -> [[Cell; 3]; 3] {
        let mut rows = [[Cell::Empty; 3]; 3];
        for (idx, &cell) in self.cells.iter().enumerate() {
            rows[idx / Self::SIDE][idx % Self::SIDE] = cell;
        }
        rows
    }

    /// Number of cells holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn occupied_count(&self) -> usize {
        Self::CELLS - self.empty_count()
    }

    pub fn empty_count(&self) -> usize {
        self.count(Cell::Empty)
    }

    /// Compact 9-character row-major encoding, `.` for empty cells
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }

    /// Copy of this board with one cell overwritten.
    ///
    /// Callers must have validated `index`; the rules module is the only writer.
    pub(super) fn with_cell(&self, index: usize, cell: Cell) -> Self {
        let mut next = *self;
        next.cells[index] = cell;
        next
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// Parses 9 cell characters in row-major order.
///
/// Whitespace and `/` row separators are ignored, so `"XX./OO./..."` and
/// `"XX.OO...."` describe the same board. Piece counts must satisfy the
/// alternation rule (X equal to O, or one ahead).
impl FromStr for Board {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if chars.len() != Self::CELLS {
            return Err(crate::Error::InvalidBoardLength {
                expected: Self::CELLS,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; Self::CELLS];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        let board = Board { cells };
        let x_count = board.count(Cell::X);
        let o_count = board.count(Cell::O);
        if x_count != o_count && x_count != o_count + 1 {
            return Err(crate::Error::InvalidPieceCounts { x_count, o_count });
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(Self::SIDE) {
            let line: String = row.iter().map(|c| c.to_char()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
