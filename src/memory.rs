//! In-memory store for tests and embedded use.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, instrument, warn};

use crate::db::DbError;
use crate::games::tictactoe::{Game, GameStatus, MoveRecord, PlayerName, ScoreAward};
use crate::store::{GameKey, GameStore, PlayerProfile, PlayerStore, StoreError, StoredGame};

#[derive(Debug, Default)]
struct MemoryState {
    players: BTreeMap<PlayerName, PlayerProfile>,
    games: BTreeMap<GameKey, StoredGame>,
    next_key: i32,
}

/// Store that keeps players and games in process memory.
///
/// Clones share the same state. Each operation holds one lock for its
/// whole duration, which makes every write atomic.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating MemoryStore");
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Db(DbError::new("In-memory store lock poisoned")))
    }
}

impl MemoryState {
    fn check_version(&self, key: GameKey, expected_version: i32) -> Result<(), StoreError> {
        match self.games.get(&key) {
            Some(stored) if *stored.version() == expected_version => Ok(()),
            _ => {
                warn!(%key, expected_version, "Stale game write rejected");
                Err(StoreError::Conflict {
                    key,
                    expected: expected_version,
                })
            }
        }
    }

    fn add_points(&mut self, name: &PlayerName, points: i32) -> Result<(), StoreError> {
        let profile = self
            .players
            .get_mut(name)
            .ok_or_else(|| StoreError::MissingPlayer(name.clone()))?;
        *profile = PlayerProfile::new(
            profile.name().clone(),
            profile.email().clone(),
            profile.score() + points,
        );
        debug!(%name, points, "Score incremented");
        Ok(())
    }

    fn write(&mut self, key: GameKey, expected_version: i32, game: &Game) -> StoredGame {
        let stored = StoredGame::new(key, expected_version + 1, game.clone());
        self.games.insert(key, stored.clone());
        stored
    }
}

impl PlayerStore for MemoryStore {
    #[instrument(skip(self))]
    fn create_player(
        &self,
        name: &PlayerName,
        email: Option<&str>,
    ) -> Result<PlayerProfile, StoreError> {
        let mut state = self.state()?;
        if state.players.contains_key(name) {
            warn!(%name, "Player name already taken");
            return Err(StoreError::DuplicatePlayer(name.clone()));
        }
        let profile = PlayerProfile::new(name.clone(), email.map(str::to_string), 0);
        state.players.insert(name.clone(), profile.clone());
        info!(%name, "Player registered");
        Ok(profile)
    }

    #[instrument(skip(self))]
    fn find_by_name(&self, name: &PlayerName) -> Result<Option<PlayerProfile>, StoreError> {
        Ok(self.state()?.players.get(name).cloned())
    }

    #[instrument(skip(self))]
    fn increment_score(&self, name: &PlayerName) -> Result<(), StoreError> {
        let award = ScoreAward::new(name.clone());
        self.state()?.add_points(award.player(), award.points())
    }

    #[instrument(skip(self))]
    fn leaderboard(&self) -> Result<Vec<PlayerProfile>, StoreError> {
        let mut players: Vec<_> = self.state()?.players.values().cloned().collect();
        players.sort_by(|a, b| b.score().cmp(a.score()).then_with(|| a.name().cmp(b.name())));
        Ok(players)
    }
}

impl GameStore for MemoryStore {
    #[instrument(skip(self, game))]
    fn insert_game(&self, game: &Game) -> Result<StoredGame, StoreError> {
        let mut state = self.state()?;
        state.next_key += 1;
        let key = GameKey::new(state.next_key);
        let stored = StoredGame::new(key, 0, game.clone());
        state.games.insert(key, stored.clone());
        info!(%key, "Game stored");
        Ok(stored)
    }

    #[instrument(skip(self))]
    fn load_game(&self, key: GameKey) -> Result<Option<StoredGame>, StoreError> {
        Ok(self.state()?.games.get(&key).cloned())
    }

    #[instrument(skip(self, game))]
    fn save_game(
        &self,
        key: GameKey,
        expected_version: i32,
        game: &Game,
    ) -> Result<StoredGame, StoreError> {
        let mut state = self.state()?;
        state.check_version(key, expected_version)?;
        Ok(state.write(key, expected_version, game))
    }

    #[instrument(skip(self, game, record), fields(record = %record))]
    fn apply_move_and_persist(
        &self,
        key: GameKey,
        expected_version: i32,
        game: &Game,
        record: &MoveRecord,
        award: Option<&ScoreAward>,
    ) -> Result<StoredGame, StoreError> {
        let mut state = self.state()?;
        state.check_version(key, expected_version)?;
        // Award first: a missing winner must leave the game untouched.
        if let Some(award) = award {
            state.add_points(award.player(), award.points())?;
        }
        Ok(state.write(key, expected_version, game))
    }

    #[instrument(skip(self))]
    fn active_games_for(&self, name: &PlayerName) -> Result<Vec<StoredGame>, StoreError> {
        Ok(self
            .state()?
            .games
            .values()
            .filter(|stored| stored.game().status() == GameStatus::Active)
            .filter(|stored| stored.game().symbol_of(name).is_some())
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    fn average_moves_of_active_games(&self) -> Result<Option<f64>, StoreError> {
        let state = self.state()?;
        let counts: Vec<u8> = state
            .games
            .values()
            .filter(|stored| stored.game().status() == GameStatus::Active)
            .map(|stored| stored.game().number_of_moves())
            .collect();
        if counts.is_empty() {
            return Ok(None);
        }
        let total: u32 = counts.iter().copied().map(u32::from).sum();
        Ok(Some(f64::from(total) / counts.len() as f64))
    }
}
