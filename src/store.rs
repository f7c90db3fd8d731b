//! Storage collaborator interfaces.
//!
//! The game core decides; stores remember. A [`GameStore`] holds games
//! under versioned keys and must apply a move, its history record and any
//! score award as one atomic unit. Writes against a stale version fail with
//! [`StoreError::Conflict`], which gives callers single-writer semantics per
//! game without any locking in the core.

use crate::db::DbError;
use crate::games::tictactoe::{Game, MoveRecord, PlayerName, ScoreAward};
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Persistence key of a game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(transparent)]
pub struct GameKey(i32);

impl GameKey {
    /// Wraps a raw key.
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw key.
    pub fn get(self) -> i32 {
        self.0
    }
}

/// A registered player as seen by the game core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct PlayerProfile {
    name: PlayerName,
    email: Option<String>,
    score: i32,
}

/// A game together with its key and write version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct StoredGame {
    key: GameKey,
    version: i32,
    game: Game,
}

impl StoredGame {
    /// Consumes the stored game, returning the game.
    pub fn into_game(self) -> Game {
        self.game
    }
}

/// Errors raised by a store.
#[derive(Debug, Clone, Display)]
pub enum StoreError {
    /// The game changed since it was loaded.
    #[display("Game {} was modified concurrently (expected version {})", key, expected)]
    Conflict {
        /// Game that was written.
        key: GameKey,
        /// Version the write was based on.
        expected: i32,
    },

    /// A player with this name already exists.
    #[display("A player named {} already exists", _0)]
    DuplicatePlayer(PlayerName),

    /// No player with this name exists.
    #[display("A player named {} does not exist", _0)]
    MissingPlayer(PlayerName),

    /// The persisted game is not one the state machine could produce.
    #[display("Game {} is corrupt: {}", _0, _1)]
    Corrupt(GameKey, String),

    /// Underlying storage failure.
    #[display("{}", _0)]
    Db(DbError),
}

impl std::error::Error for StoreError {}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        Self::Db(err)
    }
}

/// Player registry consumed by the game service.
pub trait PlayerStore {
    /// Registers a new player with a score of zero.
    fn create_player(
        &self,
        name: &PlayerName,
        email: Option<&str>,
    ) -> Result<PlayerProfile, StoreError>;

    /// Looks up a player by name.
    fn find_by_name(&self, name: &PlayerName) -> Result<Option<PlayerProfile>, StoreError>;

    /// Adds one win's worth of points to a player's score.
    fn increment_score(&self, name: &PlayerName) -> Result<(), StoreError>;

    /// All players, highest score first, ties broken by name.
    fn leaderboard(&self) -> Result<Vec<PlayerProfile>, StoreError>;
}

/// Game persistence consumed by the game service.
pub trait GameStore {
    /// Stores a freshly started game at version 0.
    fn insert_game(&self, game: &Game) -> Result<StoredGame, StoreError>;

    /// Loads a game by key.
    fn load_game(&self, key: GameKey) -> Result<Option<StoredGame>, StoreError>;

    /// Overwrites a game if its version is still `expected_version`.
    fn save_game(
        &self,
        key: GameKey,
        expected_version: i32,
        game: &Game,
    ) -> Result<StoredGame, StoreError>;

    /// Atomically saves the game after a move, appends `record` to the
    /// persisted history and applies `award`, if any.
    fn apply_move_and_persist(
        &self,
        key: GameKey,
        expected_version: i32,
        game: &Game,
        record: &MoveRecord,
        award: Option<&ScoreAward>,
    ) -> Result<StoredGame, StoreError>;

    /// Active games in which `name` participates, oldest first.
    fn active_games_for(&self, name: &PlayerName) -> Result<Vec<StoredGame>, StoreError>;

    /// Mean move count over active games, `None` when there are none.
    fn average_moves_of_active_games(&self) -> Result<Option<f64>, StoreError>;
}
