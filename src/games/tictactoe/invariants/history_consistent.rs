//! History consistency invariant: every record matches the board.

use super::super::{Cell, Game};
use super::Invariant;

/// Invariant: One history record per move, each backed by its cell.
///
/// Every move in history corresponds to exactly one occupied cell holding
/// the recorded symbol. No moves are missing, no cells are filled without
/// a move, and no position appears twice.
pub struct HistoryConsistentInvariant;

impl Invariant<Game> for HistoryConsistentInvariant {
    fn holds(game: &Game) -> bool {
        let history = game.history();
        if history.len() != usize::from(game.number_of_moves()) {
            return false;
        }

        let mut seen = 0u16;
        history.iter().all(|record| {
            let bit = 1u16 << record.position().to_index();
            let fresh = seen & bit == 0;
            seen |= bit;
            fresh && game.board().cell_at(record.position()) == Cell::Occupied(record.player())
        })
    }

    fn description() -> &'static str {
        "History length and symbols match the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{
        Board, GameSnapshot, GameStatus, MoveRecord, MoveResult, Position, Symbol,
    };

    fn snapshot(board: &str, history: Vec<MoveRecord>) -> Game {
        GameSnapshot {
            player_x: "alice".into(),
            player_o: "bob".into(),
            board: Board::decode(board).unwrap(),
            number_of_moves: history.len() as u8,
            next_turn: Some(if history.len() % 2 == 0 { "alice" } else { "bob" }.into()),
            status: GameStatus::Active,
            winner: None,
            history,
        }
        .into_game_unchecked()
    }

    #[test]
    fn test_single_move_holds() {
        let game = Game::start("alice".into(), "bob".into()).unwrap();
        let (game, _) = game.apply_move(&"alice".into(), 5).unwrap();
        assert!(HistoryConsistentInvariant::holds(&game));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_wrong_symbol_violates() {
        let record = MoveRecord::new(Symbol::O, Position::TopLeft, MoveResult::None);
        assert!(!HistoryConsistentInvariant::holds(&snapshot("X--------", vec![record])));
    }

    #[test]
    fn test_duplicate_position_violates() {
        let first = MoveRecord::new(Symbol::X, Position::TopLeft, MoveResult::None);
        let second = MoveRecord::new(Symbol::O, Position::TopLeft, MoveResult::None);
        assert!(!HistoryConsistentInvariant::holds(&snapshot(
            "XO-------",
            vec![first, second]
        )));
    }
}
