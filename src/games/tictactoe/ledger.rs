//! Score bookkeeping for completed games.
//!
//! The core never touches player scores itself. It only decides who, if
//! anyone, is owed a point for an accepted move; the player store applies
//! the increment.

use super::action::MoveRecord;
use super::game::Game;
use super::{MoveResult, PlayerName};
use tracing::{debug, instrument};

/// Points credited to the winner of a game.
pub const POINTS_PER_WIN: i32 = 1;

/// A pending score increment for one player.
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct ScoreAward {
    player: PlayerName,
}

impl ScoreAward {
    /// Returns the player to credit.
    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    /// Returns the number of points to add.
    pub fn points(&self) -> i32 {
        POINTS_PER_WIN
    }

    /// Returns the award owed for `record`, the move that produced `game`.
    ///
    /// Only a winning move earns an award, and it goes to the winner.
    #[instrument(skip(game))]
    pub fn for_move(game: &Game, record: &MoveRecord) -> Option<Self> {
        if record.result() != MoveResult::Win {
            return None;
        }
        let award = game.winner().cloned().map(Self::new);
        debug!(?award, "Score award computed");
        award
    }
}
