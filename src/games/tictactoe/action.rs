//! Move records: the append-only audit trail of a game.

use super::position::Position;
use super::types::{MoveResult, Symbol};
use serde::{Deserialize, Serialize};

/// One accepted move: who placed which symbol where, and what it led to.
///
/// Records are created by the state machine and never edited afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct MoveRecord {
    player: Symbol,
    position: Position,
    result: MoveResult,
}

impl MoveRecord {
    /// Returns the symbol that was placed.
    pub fn player(&self) -> Symbol {
        self.player
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the outcome of this move.
    pub fn result(&self) -> MoveResult {
        self.result
    }
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}: {}", self.player, self.position, self.result)
    }
}
