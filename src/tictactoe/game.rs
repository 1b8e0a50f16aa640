//! High-level game management

use serde::{Deserialize, Serialize};

use super::{Action, Board, Outcome, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub action: Action,
    pub player: Player,
}

/// A game played from the empty board, with its full history.
///
/// Only the move list is stored; the current board is replayed from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Game {
    pub moves: Vec<Move>,
}

impl Game {
    pub fn new() -> Self {
        Game { moves: Vec::new() }
    }

    /// Play a move for whoever is to move.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalAction`] once the game is over, or
    /// [`crate::Error::InvalidAction`] if the action is not legal.
    pub fn play(&mut self, action: Action) -> crate::Result<Board> {
        let current = self.board()?;
        if current.is_terminal() {
            return Err(crate::Error::NoLegalAction);
        }

        let next = current.apply(action)?;
        self.moves.push(Move {
            action,
            player: current.current_player(),
        });
        Ok(next)
    }

    /// Board after every recorded move.
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid for the state it
    /// was played on. This indicates corrupted game data.
    pub fn board(&self) -> crate::Result<Board> {
        self.moves
            .iter()
            .try_fold(Board::initial(), |board, m| board.apply(m.action))
    }

    pub fn outcome(&self) -> crate::Result<Outcome> {
        Ok(self.board()?.outcome())
    }

    /// Every board from the empty start to the current position.
    pub fn boards(&self) -> crate::Result<Vec<Board>> {
        let mut boards = Vec::with_capacity(self.moves.len() + 1);
        let mut board = Board::initial();
        boards.push(board);
        for m in &self.moves {
            board = board.apply(m.action)?;
            boards.push(board);
        }
        Ok(boards)
    }

    pub fn ply(&self) -> usize {
        self.moves.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_records_players() {
        let mut game = Game::new();
        game.play(Action::new(1, 1)).unwrap();
        game.play(Action::new(0, 0)).unwrap();

        assert_eq!(game.ply(), 2);
        assert_eq!(game.moves[0].player, Player::X);
        assert_eq!(game.moves[1].player, Player::O);
        assert_eq!(game.board().unwrap().encode(), "O...X....");
    }

    #[test]
    fn test_play_rejects_after_game_over() {
        let mut game = Game::new();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            game.play(Action::new(row, col)).unwrap();
        }
        assert_eq!(game.outcome().unwrap(), Outcome::Win(Player::X));
        assert!(matches!(
            game.play(Action::new(2, 2)),
            Err(crate::Error::NoLegalAction)
        ));
        assert_eq!(game.ply(), 5);
    }

    #[test]
    fn test_invalid_move_is_not_recorded() {
        let mut game = Game::new();
        game.play(Action::new(0, 0)).unwrap();
        assert!(game.play(Action::new(0, 0)).is_err());
        assert_eq!(game.ply(), 1);
    }

    #[test]
    fn test_boards_sequence() {
        let mut game = Game::new();
        game.play(Action::new(2, 2)).unwrap();
        game.play(Action::new(0, 0)).unwrap();

        let boards = game.boards().unwrap();
        assert_eq!(boards.len(), 3);
        assert_eq!(boards[0], Board::initial());
        assert_eq!(boards[2], game.board().unwrap());
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut game = Game::new();
        game.play(Action::new(1, 1)).unwrap();
        let json = serde_json::to_string(&game).unwrap();
        let parsed: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.board().unwrap(), game.board().unwrap());
    }
}
