//! Core domain types for tic-tac-toe.

use super::error::GameError;
use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Mark a participant places on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Symbol {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Symbol {
    /// Returns the opposing symbol.
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

/// Unique identity of a registered player.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PlayerName(String);

impl PlayerName {
    /// Creates a player name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell holding a symbol.
    Occupied(Symbol),
}

impl Cell {
    /// Character used for this cell in the stored board encoding.
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Occupied(Symbol::X) => 'X',
            Cell::Occupied(Symbol::O) => 'O',
        }
    }

    /// Parses a cell from its stored character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Cell::Empty),
            'X' => Some(Cell::Occupied(Symbol::X)),
            'O' => Some(Cell::Occupied(Symbol::O)),
            _ => None,
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Cells can only go from `Empty` to `Occupied`; nothing overwrites a
/// placed symbol. Turn order is not the board's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (index 0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Returns the cell at the given position.
    pub fn cell_at(&self, position: Position) -> Cell {
        self.cells[position.to_index()]
    }

    /// Places a symbol on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CellOccupied`] if the cell already holds a symbol.
    #[instrument(skip(self))]
    pub fn place(&mut self, position: Position, symbol: Symbol) -> Result<(), GameError> {
        if !self.is_empty(position) {
            return Err(GameError::CellOccupied(position));
        }
        self.cells[position.to_index()] = Cell::Occupied(symbol);
        Ok(())
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, position: Position) -> bool {
        self.cell_at(position) == Cell::Empty
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Number of non-empty cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Bit set of the board indexes holding `symbol` (bit `i` = index `i`).
    pub fn indexes_held_by(&self, symbol: Symbol) -> u16 {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Occupied(symbol))
            .fold(0u16, |held, (index, _)| held | (1u16 << index))
    }

    /// Encodes the board as nine characters over `-`, `X` and `O`.
    pub fn encode(&self) -> String {
        self.cells.iter().map(|c| c.to_char()).collect()
    }

    /// Decodes a board from its nine-character encoding.
    pub fn decode(encoded: &str) -> Option<Self> {
        let mut cells = [Cell::Empty; 9];
        let mut chars = encoded.chars();
        for cell in cells.iter_mut() {
            *cell = Cell::from_char(chars.next()?)?;
        }
        if chars.next().is_some() {
            return None;
        }
        Some(Self { cells })
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their position number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.cells[index] {
                    Cell::Empty => (index + 1).to_string(),
                    Cell::Occupied(s) => s.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle status of a game.
///
/// `Active` is the only state that accepts moves or cancellation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum GameStatus {
    /// Game is ongoing.
    Active,
    /// A participant completed a line.
    Won,
    /// Board filled with no line completed.
    Tied,
    /// Game was cancelled before finishing.
    Cancelled,
}

impl GameStatus {
    /// Returns true for `Won`, `Tied` and `Cancelled`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Active)
    }
}

/// Outcome recorded for a single accepted move.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum MoveResult {
    /// The game continues.
    None,
    /// The move completed a line.
    Win,
    /// The move filled the board without a line.
    Tie,
}
