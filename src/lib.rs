//! Tic-tac-toe ledger library - game rules, move history and scores
//!
//! This library provides a tic-tac-toe core that validates moves, detects
//! wins and ties, and records every accepted move, plus the stores that
//! persist games and player scores.
//!
//! # Architecture
//!
//! - **Games**: Pure state machine (`Active → Won | Tied | Cancelled`)
//! - **Store**: Player and game persistence traits with versioned writes
//! - **Db**: SQLite implementation via diesel
//! - **Memory**: In-process implementation for tests and embedding
//! - **Service**: Sequences core decisions with persistence
//!
//! # Example
//!
//! ```
//! use tictactoe_ledger::{GameService, GameStatus, MemoryStore, PlayerName};
//!
//! # fn example() -> Result<(), tictactoe_ledger::ServiceError> {
//! let service = GameService::new(MemoryStore::new());
//! service.register_player(PlayerName::from("ann"), None)?;
//! service.register_player(PlayerName::from("ben"), None)?;
//!
//! let game = service.start_game(PlayerName::from("ann"), PlayerName::from("ben"))?;
//! let (stored, _) = service.apply_move(*game.key(), &PlayerName::from("ann"), 5)?;
//! assert_eq!(stored.game().status(), GameStatus::Active);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod games;
mod memory;
mod service;
mod store;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Database
pub use db::{
    DbError, GameChanges, GameRepository, GameRow, MIGRATIONS, MoveRow, NewGameRow, NewMoveRow,
    NewPlayer, Player,
};

// Crate-level exports - Stores
pub use memory::MemoryStore;
pub use store::{GameKey, GameStore, PlayerProfile, PlayerStore, StoreError, StoredGame};

// Crate-level exports - Service
pub use service::{GameService, ServiceError};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    AlternatingTurnInvariant, BOARD_CELLS, Board, BoardCountInvariant, Cell, CellIsEmpty, Game,
    GameError, GameInvariants, GameIsActive, GameSnapshot, GameStatus, HistoryConsistentInvariant,
    Invariant, InvariantSet, InvariantViolation, IsParticipant, LegalMove, MIN_MOVES_FOR_WIN,
    MoveRecord, MoveResult, MoveResultInvariant, OutcomeInvariant, POINTS_PER_WIN, PlayerName,
    PlayersTurn, Position, PositionInRange, ScoreAward, Symbol, ValidatedMove, WIN_LINES,
    check_win, evaluate, is_tie, winning_line,
};
