//! Game state machine for tic-tac-toe.
//!
//! A [`Game`] is the unit of persistence. It moves through
//! `Active → Won | Tied | Cancelled` and never leaves a terminal state.
//! Transitions are pure: they take `&self` and hand back a new game, so a
//! rejected request can never leave a half-applied move behind.

use super::action::MoveRecord;
use super::contracts::{LegalMove, assert_invariants};
use super::error::GameError;
use super::invariants::{GameInvariants, InvariantSet, InvariantViolation};
use super::rules;
use super::{Board, GameStatus, MoveResult, PlayerName, Symbol};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A two-player tic-tac-toe game.
///
/// Deserialization goes through [`GameSnapshot::restore`], so a decoded game
/// satisfies the same invariants as one built by play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameSnapshot")]
pub struct Game {
    player_x: PlayerName,
    player_o: PlayerName,
    board: Board,
    number_of_moves: u8,
    next_turn: Option<PlayerName>,
    status: GameStatus,
    winner: Option<PlayerName>,
    history: Vec<MoveRecord>,
}

impl Game {
    /// Starts a new game with an empty board and X to move.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SameParticipant`] if both players are the same.
    #[instrument]
    pub fn start(player_x: PlayerName, player_o: PlayerName) -> Result<Self, GameError> {
        if player_x == player_o {
            return Err(GameError::SameParticipant(player_x));
        }

        info!(%player_x, %player_o, "Starting game");
        Ok(Self {
            next_turn: Some(player_x.clone()),
            player_x,
            player_o,
            board: Board::new(),
            number_of_moves: 0,
            status: GameStatus::Active,
            winner: None,
            history: Vec::new(),
        })
    }

    /// Applies a move for `player` at the 1-based `position`.
    ///
    /// Returns the next game state together with the record appended to its
    /// history. `self` is untouched either way.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, in order: [`GameError::OutOfRange`],
    /// [`GameError::GameNotActive`], [`GameError::NotAParticipant`],
    /// [`GameError::OutOfTurn`], [`GameError::CellOccupied`].
    #[instrument(skip(self), fields(status = %self.status, moves = self.number_of_moves))]
    pub fn apply_move(
        &self,
        player: &PlayerName,
        position: i64,
    ) -> Result<(Self, MoveRecord), GameError> {
        let legal = LegalMove::check(self, player, position)?;

        let mut next = self.clone();
        next.board.place(legal.position, legal.symbol)?;
        next.number_of_moves += 1;

        let result = rules::evaluate(&next.board, legal.symbol, next.number_of_moves);
        match result {
            MoveResult::Win => {
                info!(winner = %player, symbol = %legal.symbol, "Game won");
                next.status = GameStatus::Won;
                next.winner = Some(player.clone());
                next.next_turn = None;
            }
            MoveResult::Tie => {
                info!("Game tied");
                next.status = GameStatus::Tied;
                next.next_turn = None;
            }
            MoveResult::None => {
                next.next_turn = Some(self.participant(legal.symbol.opponent()).clone());
            }
        }

        let record = MoveRecord::new(legal.symbol, legal.position, result);
        next.history.push(record);
        debug!(%record, "Move accepted");

        assert_invariants(&next);
        Ok((next, record))
    }

    /// Cancels an active game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidCancellation`] if the game is already over.
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn cancel(&self) -> Result<Self, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::InvalidCancellation(self.status));
        }

        let mut next = self.clone();
        next.status = GameStatus::Cancelled;
        next.next_turn = None;
        info!(moves = next.number_of_moves, "Game cancelled");

        assert_invariants(&next);
        Ok(next)
    }

    /// Returns the symbol `player` plays with, if they take part in this game.
    pub fn symbol_of(&self, player: &PlayerName) -> Option<Symbol> {
        if *player == self.player_x {
            Some(Symbol::X)
        } else if *player == self.player_o {
            Some(Symbol::O)
        } else {
            None
        }
    }

    /// Returns the participant playing `symbol`.
    pub fn participant(&self, symbol: Symbol) -> &PlayerName {
        match symbol {
            Symbol::X => &self.player_x,
            Symbol::O => &self.player_o,
        }
    }

    /// Returns player X.
    pub fn player_x(&self) -> &PlayerName {
        &self.player_x
    }

    /// Returns player O.
    pub fn player_o(&self) -> &PlayerName {
        &self.player_o
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the number of accepted moves.
    pub fn number_of_moves(&self) -> u8 {
        self.number_of_moves
    }

    /// Returns the player who must move next, or `None` once the game is over.
    pub fn next_turn(&self) -> Option<&PlayerName> {
        self.next_turn.as_ref()
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the winner of a won game.
    pub fn winner(&self) -> Option<&PlayerName> {
        self.winner.as_ref()
    }

    /// Returns the move history, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }
}

/// Every field of a [`Game`], for rebuilding one outside the state machine.
///
/// Storage layers load these parts and call [`GameSnapshot::restore`],
/// which refuses anything the state machine could not have produced.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameSnapshot {
    /// Player X.
    pub player_x: PlayerName,
    /// Player O.
    pub player_o: PlayerName,
    /// The board.
    pub board: Board,
    /// Accepted move count.
    pub number_of_moves: u8,
    /// Player due to move.
    pub next_turn: Option<PlayerName>,
    /// Lifecycle status.
    pub status: GameStatus,
    /// Winner, when won.
    pub winner: Option<PlayerName>,
    /// Move history, oldest first.
    pub history: Vec<MoveRecord>,
}

impl GameSnapshot {
    /// Rebuilds a game, checking every game invariant.
    ///
    /// # Errors
    ///
    /// Returns the violated invariants if the parts are inconsistent.
    #[instrument(skip(self))]
    pub fn restore(self) -> Result<Game, Vec<InvariantViolation>> {
        let game = self.into_game_unchecked();
        GameInvariants::check_all(&game)?;
        Ok(game)
    }

    pub(crate) fn into_game_unchecked(self) -> Game {
        Game {
            player_x: self.player_x,
            player_o: self.player_o,
            board: self.board,
            number_of_moves: self.number_of_moves,
            next_turn: self.next_turn,
            status: self.status,
            winner: self.winner,
            history: self.history,
        }
    }
}

impl TryFrom<GameSnapshot> for Game {
    type Error = String;

    /// Restores the game, describing every violated invariant on failure.
    fn try_from(snapshot: GameSnapshot) -> Result<Self, Self::Error> {
        snapshot.restore().map_err(|violations| {
            violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        })
    }
}

impl From<Game> for GameSnapshot {
    fn from(game: Game) -> Self {
        Self {
            player_x: game.player_x,
            player_o: game.player_o,
            board: game.board,
            number_of_moves: game.number_of_moves,
            next_turn: game.next_turn,
            status: game.status,
            winner: game.winner,
            history: game.history,
        }
    }
}
