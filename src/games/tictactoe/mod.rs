//! Tic-tac-toe game engine: board, move validation, win/tie detection,
//! lifecycle state machine and score ledger.

mod action;
mod contracts;
mod error;
mod game;
mod invariants;
mod ledger;
mod position;
mod rules;
mod types;

pub use action::MoveRecord;
pub use contracts::{
    CellIsEmpty, GameIsActive, IsParticipant, LegalMove, PlayersTurn, PositionInRange,
    ValidatedMove,
};
pub use error::GameError;
pub use game::{Game, GameSnapshot};
pub use invariants::{
    AlternatingTurnInvariant, BoardCountInvariant, GameInvariants, HistoryConsistentInvariant,
    Invariant, InvariantSet, InvariantViolation, MoveResultInvariant, OutcomeInvariant,
};
pub use ledger::{POINTS_PER_WIN, ScoreAward};
pub use position::Position;
pub use rules::{
    BOARD_CELLS, MIN_MOVES_FOR_WIN, WIN_LINES, check_win, evaluate, is_tie, winning_line,
};
pub use types::{Board, Cell, GameStatus, MoveResult, PlayerName, Symbol};
