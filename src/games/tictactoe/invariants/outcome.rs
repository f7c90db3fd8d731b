//! Outcome invariant: status, winner and next turn agree.

use super::super::rules::winning_line;
use super::super::{Game, GameStatus};
use super::Invariant;

/// Invariant: Terminal bookkeeping is consistent.
///
/// - participants are distinct
/// - `winner` is set iff the status is `Won`, and names a participant who
///   holds a complete line
/// - `next_turn` is set iff the status is `Active`
/// - a `Tied` game has a full board
pub struct OutcomeInvariant;

impl Invariant<Game> for OutcomeInvariant {
    fn holds(game: &Game) -> bool {
        if game.player_x() == game.player_o() {
            return false;
        }

        let winner_ok = match (game.status(), game.winner()) {
            (GameStatus::Won, Some(winner)) => game
                .symbol_of(winner)
                .is_some_and(|symbol| winning_line(game.board(), symbol).is_some()),
            (GameStatus::Won, None) => false,
            (_, Some(_)) => false,
            (_, None) => true,
        };

        let turn_ok = (game.status() == GameStatus::Active) == game.next_turn().is_some();
        let tie_ok = game.status() != GameStatus::Tied || game.number_of_moves() == 9;

        winner_ok && turn_ok && tie_ok
    }

    fn description() -> &'static str {
        "Status, winner and next turn are consistent"
    }
}
