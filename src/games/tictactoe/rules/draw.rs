//! Tie detection logic for tic-tac-toe.

use tracing::instrument;

/// Number of cells on the board, and so the maximum number of moves.
pub const BOARD_CELLS: u8 = 9;

/// Checks whether the move count means the board is full.
///
/// Only meaningful once the win check has found no winner for the move.
#[instrument]
pub fn is_tie(number_of_moves: u8) -> bool {
    number_of_moves == BOARD_CELLS
}
