//! Win detection logic for tic-tac-toe.

use super::super::{Board, Symbol};
use tracing::instrument;

/// The 8 winning lines as 0-based board indexes.
#[rustfmt::skip]
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6],             // Diagonals
];

/// Fewest total moves after which one side can hold three cells.
pub const MIN_MOVES_FOR_WIN: u8 = 5;

/// Returns the first line entirely held by `symbol`, if any.
#[instrument(skip(board))]
pub fn winning_line(board: &Board, symbol: Symbol) -> Option<[usize; 3]> {
    let held = board.indexes_held_by(symbol);
    WIN_LINES
        .iter()
        .copied()
        .find(|line| line.iter().all(|&index| held & (1u16 << index) != 0))
}

/// Checks whether the move that just placed `symbol` won the game.
///
/// Skipped below [`MIN_MOVES_FOR_WIN`] moves, where no line can be complete.
#[instrument(skip(board))]
pub fn check_win(board: &Board, symbol: Symbol, number_of_moves: u8) -> bool {
    number_of_moves >= MIN_MOVES_FOR_WIN && winning_line(board, symbol).is_some()
}
