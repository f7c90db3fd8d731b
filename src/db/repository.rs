//! SQLite repository for players, games and move history.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument, warn};

use crate::db::{
    DbError, GameChanges, GameRow, MoveRow, NewGameRow, NewMoveRow, NewPlayer, Player, schema,
};
use crate::games::tictactoe::{Game, GameStatus, MoveRecord, PlayerName, ScoreAward};
use crate::store::{GameKey, GameStore, PlayerProfile, PlayerStore, StoreError, StoredGame};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for player and game operations.
///
/// Opens a fresh connection per operation, so it is cheap to clone and
/// share. Multi-statement writes run inside a single transaction.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path must not be empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migrations failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Loads the move history of a game, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, conn))]
    fn load_moves(
        &self,
        conn: &mut SqliteConnection,
        game_id: i32,
    ) -> Result<Vec<MoveRow>, DbError> {
        let moves = schema::moves::table
            .filter(schema::moves::game_id.eq(game_id))
            .order(schema::moves::seq.asc())
            .load::<MoveRow>(conn)?;
        debug!(game_id, count = moves.len(), "Moves loaded");
        Ok(moves)
    }

    /// Writes `game` over the row at `key` if the row is still at `expected_version`.
    #[instrument(skip(self, conn, game))]
    fn update_versioned(
        &self,
        conn: &mut SqliteConnection,
        key: GameKey,
        expected_version: i32,
        game: &Game,
    ) -> Result<i32, StoreError> {
        let new_version = expected_version + 1;
        let updated = diesel::update(
            schema::games::table
                .filter(schema::games::id.eq(key.get()))
                .filter(schema::games::version.eq(expected_version)),
        )
        .set((
            GameChanges::new(game, new_version),
            schema::games::updated_at.eq(diesel::dsl::now),
        ))
        .execute(conn)?;

        if updated == 0 {
            warn!(%key, expected_version, "Stale game write rejected");
            return Err(StoreError::Conflict {
                key,
                expected: expected_version,
            });
        }
        Ok(new_version)
    }

    /// Adds points to a player's score.
    #[instrument(skip(self, conn))]
    fn add_points(
        &self,
        conn: &mut SqliteConnection,
        name: &PlayerName,
        points: i32,
    ) -> Result<(), StoreError> {
        let updated = diesel::update(
            schema::players::table.filter(schema::players::name.eq(name.as_str())),
        )
        .set(schema::players::score.eq(schema::players::score + points))
        .execute(conn)?;

        if updated == 0 {
            warn!(%name, "Score increment for unknown player");
            return Err(StoreError::MissingPlayer(name.clone()));
        }
        debug!(%name, points, "Score incremented");
        Ok(())
    }
}

impl PlayerStore for GameRepository {
    #[instrument(skip(self))]
    fn create_player(
        &self,
        name: &PlayerName,
        email: Option<&str>,
    ) -> Result<PlayerProfile, StoreError> {
        debug!(%name, "Registering player");
        let mut conn = self.connection()?;

        let inserted = diesel::insert_into(schema::players::table)
            .values(&NewPlayer::new(name.to_string(), email.map(str::to_string)))
            .returning(Player::as_returning())
            .get_result(&mut conn);

        match inserted {
            Ok(player) => {
                info!(player_id = player.id(), %name, "Player registered");
                Ok(player.to_profile())
            }
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                warn!(%name, "Player name already taken");
                Err(StoreError::DuplicatePlayer(name.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self))]
    fn find_by_name(&self, name: &PlayerName) -> Result<Option<PlayerProfile>, StoreError> {
        debug!(%name, "Looking up player by name");
        let mut conn = self.connection()?;

        let player = schema::players::table
            .filter(schema::players::name.eq(name.as_str()))
            .first::<Player>(&mut conn)
            .optional()?;

        if player.is_none() {
            debug!(%name, "Player not found");
        }
        Ok(player.map(|p| p.to_profile()))
    }

    #[instrument(skip(self))]
    fn increment_score(&self, name: &PlayerName) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let award = ScoreAward::new(name.clone());
        self.add_points(&mut conn, award.player(), award.points())
    }

    #[instrument(skip(self))]
    fn leaderboard(&self) -> Result<Vec<PlayerProfile>, StoreError> {
        let mut conn = self.connection()?;

        let players = schema::players::table
            .order((schema::players::score.desc(), schema::players::name.asc()))
            .load::<Player>(&mut conn)?;

        info!(count = players.len(), "Leaderboard loaded");
        Ok(players.iter().map(Player::to_profile).collect())
    }
}

impl GameStore for GameRepository {
    #[instrument(
        skip(self, game),
        fields(player_x = %game.player_x(), player_o = %game.player_o())
    )]
    fn insert_game(&self, game: &Game) -> Result<StoredGame, StoreError> {
        let mut conn = self.connection()?;

        let row = diesel::insert_into(schema::games::table)
            .values(&NewGameRow::from(game))
            .returning(GameRow::as_returning())
            .get_result(&mut conn)?;

        info!(game_id = row.id(), "Game stored");
        row.into_stored(Vec::new())
    }

    #[instrument(skip(self))]
    fn load_game(&self, key: GameKey) -> Result<Option<StoredGame>, StoreError> {
        let mut conn = self.connection()?;

        let Some(row) = schema::games::table
            .find(key.get())
            .first::<GameRow>(&mut conn)
            .optional()?
        else {
            debug!(%key, "Game not found");
            return Ok(None);
        };

        let moves = self.load_moves(&mut conn, key.get())?;
        row.into_stored(moves).map(Some)
    }

    #[instrument(skip(self, game), fields(status = %game.status()))]
    fn save_game(
        &self,
        key: GameKey,
        expected_version: i32,
        game: &Game,
    ) -> Result<StoredGame, StoreError> {
        let mut conn = self.connection()?;
        let version = self.update_versioned(&mut conn, key, expected_version, game)?;
        info!(%key, version, "Game saved");
        Ok(StoredGame::new(key, version, game.clone()))
    }

    #[instrument(skip(self, game, record), fields(record = %record, status = %game.status()))]
    fn apply_move_and_persist(
        &self,
        key: GameKey,
        expected_version: i32,
        game: &Game,
        record: &MoveRecord,
        award: Option<&ScoreAward>,
    ) -> Result<StoredGame, StoreError> {
        let mut conn = self.connection()?;

        let version = conn.transaction::<_, StoreError, _>(|conn| {
            let version = self.update_versioned(conn, key, expected_version, game)?;

            diesel::insert_into(schema::moves::table)
                .values(&NewMoveRow::new(
                    key.get(),
                    i32::from(game.number_of_moves()),
                    record,
                ))
                .execute(conn)?;

            if let Some(award) = award {
                self.add_points(conn, award.player(), award.points())?;
            }
            Ok(version)
        })?;

        info!(%key, version, "Move persisted");
        Ok(StoredGame::new(key, version, game.clone()))
    }

    #[instrument(skip(self))]
    fn active_games_for(&self, name: &PlayerName) -> Result<Vec<StoredGame>, StoreError> {
        let mut conn = self.connection()?;

        let rows = schema::games::table
            .filter(schema::games::status.eq(GameStatus::Active.to_string()))
            .filter(
                schema::games::player_x
                    .eq(name.as_str())
                    .or(schema::games::player_o.eq(name.as_str())),
            )
            .order(schema::games::id.asc())
            .load::<GameRow>(&mut conn)?;

        let mut games = Vec::with_capacity(rows.len());
        for row in rows {
            let moves = self.load_moves(&mut conn, *row.id())?;
            games.push(row.into_stored(moves)?);
        }

        info!(%name, count = games.len(), "Active games loaded");
        Ok(games)
    }

    #[instrument(skip(self))]
    fn average_moves_of_active_games(&self) -> Result<Option<f64>, StoreError> {
        let mut conn = self.connection()?;

        let counts = schema::games::table
            .filter(schema::games::status.eq(GameStatus::Active.to_string()))
            .select(schema::games::number_of_moves)
            .load::<i32>(&mut conn)?;

        if counts.is_empty() {
            return Ok(None);
        }
        let total: i64 = counts.iter().copied().map(i64::from).sum();
        let average = total as f64 / counts.len() as f64;
        info!(games = counts.len(), average = %format!("{:.2}", average), "Average moves computed");
        Ok(Some(average))
    }
}
