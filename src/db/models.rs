//! Database models and their mapping onto game types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::schema;
use crate::games::tictactoe::{
    Board, Game, GameSnapshot, GameStatus, MoveRecord, MoveResult, PlayerName, Position, Symbol,
};
use crate::store::{GameKey, PlayerProfile, StoreError, StoredGame};

/// Player database model.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::players)]
pub struct Player {
    id: i32,
    name: String,
    email: Option<String>,
    score: i32,
    created_at: NaiveDateTime,
}

impl Player {
    /// Converts the row into the profile the game core works with.
    pub fn to_profile(&self) -> PlayerProfile {
        PlayerProfile::new(
            PlayerName::new(self.name.clone()),
            self.email.clone(),
            self.score,
        )
    }
}

/// Insertable player model for registering new players.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::players)]
pub struct NewPlayer {
    name: String,
    email: Option<String>,
}

/// Game database model.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameRow {
    id: i32,
    player_x: String,
    player_o: String,
    board: String,
    number_of_moves: i32,
    next_turn: Option<String>,
    status: String,
    winner: Option<String>,
    version: i32,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl GameRow {
    /// Rebuilds the stored game from this row and its move rows.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if a column fails to parse or the
    /// parts violate a game invariant.
    #[instrument(skip(self, moves), fields(game_id = self.id, moves = moves.len()))]
    pub fn into_stored(self, moves: Vec<MoveRow>) -> Result<StoredGame, StoreError> {
        let key = GameKey::new(self.id);
        let corrupt = |message: String| StoreError::Corrupt(key, message);

        let board = Board::decode(&self.board)
            .ok_or_else(|| corrupt(format!("invalid board '{}'", self.board)))?;
        let status = self
            .status
            .parse::<GameStatus>()
            .map_err(|_| corrupt(format!("invalid status '{}'", self.status)))?;
        let number_of_moves = u8::try_from(self.number_of_moves)
            .map_err(|_| corrupt(format!("invalid move count {}", self.number_of_moves)))?;
        let history = moves
            .iter()
            .map(|row| row.to_record().map_err(corrupt))
            .collect::<Result<Vec<_>, _>>()?;

        let snapshot = GameSnapshot {
            player_x: PlayerName::new(self.player_x),
            player_o: PlayerName::new(self.player_o),
            board,
            number_of_moves,
            next_turn: self.next_turn.map(PlayerName::new),
            status,
            winner: self.winner.map(PlayerName::new),
            history,
        };

        let game = Game::try_from(snapshot).map_err(corrupt)?;

        Ok(StoredGame::new(key, self.version, game))
    }
}

/// Insertable game model for newly started games.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::games)]
pub struct NewGameRow {
    player_x: String,
    player_o: String,
    board: String,
    number_of_moves: i32,
    next_turn: Option<String>,
    status: String,
    winner: Option<String>,
}

impl From<&Game> for NewGameRow {
    fn from(game: &Game) -> Self {
        Self {
            player_x: game.player_x().to_string(),
            player_o: game.player_o().to_string(),
            board: game.board().encode(),
            number_of_moves: i32::from(game.number_of_moves()),
            next_turn: game.next_turn().map(PlayerName::to_string),
            status: game.status().to_string(),
            winner: game.winner().map(PlayerName::to_string),
        }
    }
}

/// Mutable game columns written by every versioned save.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::games)]
#[diesel(treat_none_as_null = true)]
pub struct GameChanges {
    board: String,
    number_of_moves: i32,
    next_turn: Option<String>,
    status: String,
    winner: Option<String>,
    version: i32,
}

impl GameChanges {
    /// Builds the changeset for `game` at the given new version.
    pub fn new(game: &Game, version: i32) -> Self {
        Self {
            board: game.board().encode(),
            number_of_moves: i32::from(game.number_of_moves()),
            next_turn: game.next_turn().map(PlayerName::to_string),
            status: game.status().to_string(),
            winner: game.winner().map(PlayerName::to_string),
            version,
        }
    }
}

/// Move history database model.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::moves)]
pub struct MoveRow {
    id: i32,
    game_id: i32,
    seq: i32,
    player: String,
    position: i32,
    result: String,
}

impl MoveRow {
    /// Parses the row into a move record.
    ///
    /// # Errors
    ///
    /// Returns a description of the first column that fails to parse.
    pub fn to_record(&self) -> Result<MoveRecord, String> {
        let player = self
            .player
            .parse::<Symbol>()
            .map_err(|_| format!("move {}: invalid symbol '{}'", self.seq, self.player))?;
        let position = Position::from_number(i64::from(self.position))
            .ok_or_else(|| format!("move {}: invalid position {}", self.seq, self.position))?;
        let result = self
            .result
            .parse::<MoveResult>()
            .map_err(|_| format!("move {}: invalid result '{}'", self.seq, self.result))?;
        Ok(MoveRecord::new(player, position, result))
    }
}

/// Insertable move model.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::moves)]
pub struct NewMoveRow {
    game_id: i32,
    seq: i32,
    player: String,
    position: i32,
    result: String,
}

impl NewMoveRow {
    /// Builds the row for the `seq`-th move (1-based) of a game.
    pub fn new(game_id: i32, seq: i32, record: &MoveRecord) -> Self {
        Self {
            game_id,
            seq,
            player: record.player().to_string(),
            position: i32::from(record.position().number()),
            result: record.result().to_string(),
        }
    }
}
