//! SQLite persistence for players, games and move history.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{GameChanges, GameRow, MoveRow, NewGameRow, NewMoveRow, NewPlayer, Player};
pub use repository::{GameRepository, MIGRATIONS};
