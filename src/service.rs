//! Game service: sequences core decisions with persistence.
//!
//! Every operation loads what it needs, lets the pure state machine decide,
//! then hands the result to the store in one write. The service holds no
//! game state of its own.

use derive_more::{Display, From};
use tracing::{debug, info, instrument, warn};

use crate::games::tictactoe::{Game, GameError, MoveRecord, PlayerName, ScoreAward};
use crate::store::{GameKey, GameStore, PlayerProfile, PlayerStore, StoreError, StoredGame};

/// Errors returned by [`GameService`].
#[derive(Debug, Clone, Display, From)]
pub enum ServiceError {
    /// The request broke a game rule.
    #[display("{}", _0)]
    Game(GameError),

    /// The store failed or rejected the write.
    #[display("{}", _0)]
    Store(StoreError),

    /// No game is stored under this key.
    #[display("Game {} not found", _0)]
    #[from(ignore)]
    GameNotFound(GameKey),
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// True when reloading the game and retrying may succeed.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Store(StoreError::Conflict { .. }))
    }
}

/// Service layer for player and game operations.
#[derive(Debug, Clone)]
pub struct GameService<S> {
    store: S,
}

impl<S> GameService<S>
where
    S: PlayerStore + GameStore,
{
    /// Creates a service backed by the given store.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        info!("Creating GameService");
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a new player with a score of zero.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicatePlayer`] if the name is taken.
    #[instrument(skip(self))]
    pub fn register_player(
        &self,
        name: PlayerName,
        email: Option<&str>,
    ) -> Result<PlayerProfile, ServiceError> {
        debug!(%name, "Registering player");
        Ok(self.store.create_player(&name, email)?)
    }

    /// Starts a game between two registered players and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownPlayer`] for the first unregistered
    /// participant (X is checked first), then [`GameError::SameParticipant`].
    #[instrument(skip(self))]
    pub fn start_game(
        &self,
        player_x: PlayerName,
        player_o: PlayerName,
    ) -> Result<StoredGame, ServiceError> {
        for name in [&player_x, &player_o] {
            if self.store.find_by_name(name)?.is_none() {
                warn!(%name, "Game requested for unregistered player");
                return Err(GameError::UnknownPlayer(name.clone()).into());
            }
        }

        let game = Game::start(player_x, player_o)?;
        let stored = self.store.insert_game(&game)?;
        info!(key = %stored.key(), "Game started");
        Ok(stored)
    }

    /// Applies a move and persists the result, crediting the winner if the
    /// move ends the game.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::GameNotFound`] for an unknown key, the
    /// [`GameError`] of a rejected move, or [`StoreError::Conflict`] if the
    /// game changed after it was loaded.
    #[instrument(skip(self))]
    pub fn apply_move(
        &self,
        key: GameKey,
        player: &PlayerName,
        position: i64,
    ) -> Result<(StoredGame, MoveRecord), ServiceError> {
        let stored = self.load(key)?;

        let (next, record) = stored.game().apply_move(player, position)?;
        let award = ScoreAward::for_move(&next, &record);

        let saved = self.store.apply_move_and_persist(
            key,
            *stored.version(),
            &next,
            &record,
            award.as_ref(),
        )?;
        debug!(%key, %record, version = saved.version(), "Move applied");
        Ok((saved, record))
    }

    /// Cancels an active game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidCancellation`] if the game is already over,
    /// or [`StoreError::Conflict`] if a move landed first.
    #[instrument(skip(self))]
    pub fn cancel_game(&self, key: GameKey) -> Result<StoredGame, ServiceError> {
        let stored = self.load(key)?;
        let cancelled = stored.game().cancel()?;
        let saved = self.store.save_game(key, *stored.version(), &cancelled)?;
        info!(%key, "Game cancelled");
        Ok(saved)
    }

    /// Returns the move history of a game, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::GameNotFound`] for an unknown key.
    #[instrument(skip(self))]
    pub fn get_history(&self, key: GameKey) -> Result<Vec<MoveRecord>, ServiceError> {
        Ok(self.load(key)?.game().history().to_vec())
    }

    /// Returns the current state of a game.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::GameNotFound`] for an unknown key.
    #[instrument(skip(self))]
    pub fn get_game(&self, key: GameKey) -> Result<StoredGame, ServiceError> {
        self.load(key)
    }

    /// Returns all players, highest score first.
    #[instrument(skip(self))]
    pub fn leaderboard(&self) -> Result<Vec<PlayerProfile>, ServiceError> {
        Ok(self.store.leaderboard()?)
    }

    /// Returns the active games `player` takes part in.
    #[instrument(skip(self))]
    pub fn active_games(&self, player: &PlayerName) -> Result<Vec<StoredGame>, ServiceError> {
        Ok(self.store.active_games_for(player)?)
    }

    /// Mean number of moves over all active games.
    #[instrument(skip(self))]
    pub fn average_moves(&self) -> Result<Option<f64>, ServiceError> {
        Ok(self.store.average_moves_of_active_games()?)
    }

    fn load(&self, key: GameKey) -> Result<StoredGame, ServiceError> {
        self.store.load_game(key)?.ok_or_else(|| {
            debug!(%key, "Game not found");
            ServiceError::GameNotFound(key)
        })
    }
}
