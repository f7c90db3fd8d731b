//! Board count invariant: occupied cells match the move counter.

use super::super::Game;
use super::Invariant;

/// Invariant: Exactly `number_of_moves` cells are non-empty.
pub struct BoardCountInvariant;

impl Invariant<Game> for BoardCountInvariant {
    fn holds(game: &Game) -> bool {
        game.board().occupied_count() == usize::from(game.number_of_moves())
            && game.number_of_moves() <= 9
    }

    fn description() -> &'static str {
        "Occupied cells match number of moves"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, GameSnapshot, GameStatus};

    #[test]
    fn test_new_game_holds() {
        let game = Game::start("alice".into(), "bob".into()).unwrap();
        assert!(BoardCountInvariant::holds(&game));
    }

    #[test]
    fn test_extra_symbol_violates() {
        let snapshot = GameSnapshot {
            player_x: "alice".into(),
            player_o: "bob".into(),
            board: Board::decode("X--------").unwrap(),
            number_of_moves: 0,
            next_turn: Some("alice".into()),
            status: GameStatus::Active,
            winner: None,
            history: Vec::new(),
        };
        assert!(!BoardCountInvariant::holds(&snapshot.into_game_unchecked()));
    }
}
