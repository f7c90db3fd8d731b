//! Move result invariant: recorded results agree with the game status.

use super::super::{Game, GameStatus, MoveResult};
use super::Invariant;

/// Invariant: Only the final move may end the game, and it ended it the way
/// the status says.
///
/// Every record but the last is `None`. The last one is `Win` for a won
/// game, `Tie` for a tied game and `None` otherwise.
pub struct MoveResultInvariant;

impl Invariant<Game> for MoveResultInvariant {
    fn holds(game: &Game) -> bool {
        let Some((last, earlier)) = game.history().split_last() else {
            return !matches!(game.status(), GameStatus::Won | GameStatus::Tied);
        };

        let expected = match game.status() {
            GameStatus::Won => MoveResult::Win,
            GameStatus::Tied => MoveResult::Tie,
            GameStatus::Active | GameStatus::Cancelled => MoveResult::None,
        };

        last.result() == expected && earlier.iter().all(|r| r.result() == MoveResult::None)
    }

    fn description() -> &'static str {
        "Move results match the game status"
    }
}
