//! Win and tie detection for tic-tac-toe.
//!
//! Pure functions over the board, kept apart from the state machine so
//! they can be tested in isolation.

pub mod draw;
pub mod win;

pub use draw::{BOARD_CELLS, is_tie};
pub use win::{MIN_MOVES_FOR_WIN, WIN_LINES, check_win, winning_line};

use super::{Board, MoveResult, Symbol};
use tracing::instrument;

/// Evaluates the outcome of the move that just placed `symbol`.
///
/// `number_of_moves` counts the move being evaluated. The tie check only
/// runs when the win check found nothing.
#[instrument(skip(board))]
pub fn evaluate(board: &Board, symbol: Symbol, number_of_moves: u8) -> MoveResult {
    if check_win(board, symbol, number_of_moves) {
        MoveResult::Win
    } else if is_tie(number_of_moves) {
        MoveResult::Tie
    } else {
        MoveResult::None
    }
}
