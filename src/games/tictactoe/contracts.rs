//! Move validation for tic-tac-toe.
//!
//! Each precondition is its own small check. [`LegalMove`] runs them in a
//! fixed order and stops at the first failure, so a caller always sees the
//! most fundamental problem with a request.

use super::error::GameError;
use super::game::Game;
use super::invariants::{GameInvariants, InvariantSet};
use super::{GameStatus, PlayerName, Position, Symbol};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: The requested position must be one of 1-9.
pub struct PositionInRange;

impl PositionInRange {
    /// Parses the raw position or rejects it.
    #[instrument]
    pub fn check(raw: i64) -> Result<Position, GameError> {
        Position::from_number(raw).ok_or(GameError::OutOfRange(raw))
    }
}

/// Precondition: The game must still be active.
pub struct GameIsActive;

impl GameIsActive {
    /// Rejects games in a terminal state.
    #[instrument(skip(game))]
    pub fn check(game: &Game) -> Result<(), GameError> {
        match game.status() {
            GameStatus::Active => Ok(()),
            status => Err(GameError::GameNotActive(status)),
        }
    }
}

/// Precondition: The mover must be one of the two participants.
pub struct IsParticipant;

impl IsParticipant {
    /// Returns the mover's symbol.
    #[instrument(skip(game))]
    pub fn check(game: &Game, player: &PlayerName) -> Result<Symbol, GameError> {
        game.symbol_of(player)
            .ok_or_else(|| GameError::NotAParticipant(player.clone()))
    }
}

/// Precondition: It must be the mover's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects a participant moving out of turn.
    #[instrument(skip(game))]
    pub fn check(game: &Game, player: &PlayerName) -> Result<(), GameError> {
        if game.next_turn() == Some(player) {
            Ok(())
        } else {
            Err(GameError::OutOfTurn(player.clone()))
        }
    }
}

/// Precondition: The target cell must be empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects moves onto an occupied cell.
    #[instrument(skip(game))]
    pub fn check(game: &Game, position: Position) -> Result<(), GameError> {
        if game.board().is_empty(position) {
            Ok(())
        } else {
            Err(GameError::CellOccupied(position))
        }
    }
}

/// A move that passed every precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedMove {
    /// Where the symbol goes.
    pub position: Position,
    /// The mover's symbol.
    pub symbol: Symbol,
}

/// Composite precondition: all checks, in order.
///
/// 1. position in range
/// 2. game active
/// 3. mover participates
/// 4. mover's turn
/// 5. cell empty
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(
        game: &Game,
        player: &PlayerName,
        raw_position: i64,
    ) -> Result<ValidatedMove, GameError> {
        let result = Self::check_in_order(game, player, raw_position);
        if let Err(ref err) = result {
            warn!(error = %err, "Move rejected");
        }
        result
    }

    fn check_in_order(
        game: &Game,
        player: &PlayerName,
        raw_position: i64,
    ) -> Result<ValidatedMove, GameError> {
        let position = PositionInRange::check(raw_position)?;
        GameIsActive::check(game)?;
        let symbol = IsParticipant::check(game, player)?;
        PlayersTurn::check(game, player)?;
        CellIsEmpty::check(game, position)?;
        Ok(ValidatedMove { position, symbol })
    }
}

/// Asserts that all game invariants hold (panic on violation in debug builds).
#[instrument(skip(game))]
pub fn assert_invariants(game: &Game) {
    let checked = GameInvariants::check_all(game);
    debug_assert!(checked.is_ok(), "Game invariants violated: {:?}", checked);
    if let Err(violations) = checked {
        warn!(?violations, "Game invariants violated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::start("alice".into(), "bob".into()).expect("distinct players")
    }

    #[test]
    fn test_legal_first_move() {
        let checked = LegalMove::check(&game(), &"alice".into(), 5).expect("legal");
        assert_eq!(checked.position, Position::Center);
        assert_eq!(checked.symbol, Symbol::X);
    }

    #[test]
    fn test_out_of_range_checked_first() {
        // Wrong player and wrong turn too, but range comes first.
        let err = LegalMove::check(&game(), &"mallory".into(), 0).unwrap_err();
        assert_eq!(err, GameError::OutOfRange(0));
        let err = LegalMove::check(&game(), &"alice".into(), 10).unwrap_err();
        assert_eq!(err, GameError::OutOfRange(10));
    }

    #[test]
    fn test_inactive_before_participant() {
        let cancelled = game().cancel().expect("active game");
        let err = LegalMove::check(&cancelled, &"mallory".into(), 1).unwrap_err();
        assert_eq!(err, GameError::GameNotActive(GameStatus::Cancelled));
    }

    #[test]
    fn test_participant_before_turn() {
        let err = LegalMove::check(&game(), &"mallory".into(), 1).unwrap_err();
        assert_eq!(err, GameError::NotAParticipant("mallory".into()));
    }

    #[test]
    fn test_turn_before_cell() {
        let (game, _) = game().apply_move(&"alice".into(), 1).expect("legal");
        let err = LegalMove::check(&game, &"alice".into(), 1).unwrap_err();
        assert_eq!(err, GameError::OutOfTurn("alice".into()));
    }

    #[test]
    fn test_occupied_cell() {
        let (game, _) = game().apply_move(&"alice".into(), 1).expect("legal");
        let err = LegalMove::check(&game, &"bob".into(), 1).unwrap_err();
        assert_eq!(err, GameError::CellOccupied(Position::TopLeft));
    }

    #[test]
    fn test_second_player_gets_o() {
        let (game, _) = game().apply_move(&"alice".into(), 1).expect("legal");
        let checked = LegalMove::check(&game, &"bob".into(), 2).expect("legal");
        assert_eq!(checked.symbol, Symbol::O);
    }
}
