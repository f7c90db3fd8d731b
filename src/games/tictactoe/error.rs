//! Errors raised by the tic-tac-toe core.
//!
//! Every variant is a local validation failure. None of them are transient,
//! so retrying the same request never helps.

use super::position::Position;
use super::types::{GameStatus, PlayerName};

/// Error that can occur when creating a game, applying a move or cancelling.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// Move position outside 1-9.
    #[display("Position {} is out of range (must be 1-9)", _0)]
    OutOfRange(i64),

    /// Move attempted on a game that is no longer active.
    #[display("Game is not active (status: {})", _0)]
    GameNotActive(GameStatus),

    /// Mover is neither player X nor player O.
    #[display("{} is not a participant in this game", _0)]
    NotAParticipant(PlayerName),

    /// Mover is a participant but it is not their turn.
    #[display("It is not {}'s turn", _0)]
    OutOfTurn(PlayerName),

    /// Target cell already holds a symbol.
    #[display("Position {} is already occupied", _0)]
    CellOccupied(Position),

    /// Both participants are the same player.
    #[display("A game needs two different players, got {} twice", _0)]
    SameParticipant(PlayerName),

    /// Player is not registered.
    #[display("A player named {} does not exist", _0)]
    UnknownPlayer(PlayerName),

    /// Cancel attempted on a game that is no longer active.
    #[display("Cannot cancel a game that is {}", _0)]
    InvalidCancellation(GameStatus),
}

impl std::error::Error for GameError {}
