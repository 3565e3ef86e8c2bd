//! Board grid, cell contents and coordinates.

use core::fmt;

use super::config::{BOARD_SIZE, INITIAL_PIECES, NUM_CELLS};
use super::player::Player;

const SIZE: usize = BOARD_SIZE as usize;

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

/// A board coordinate. Only `row` and `col` in `[0, BOARD_SIZE)` are on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        self.row < SIZE && self.col < SIZE
    }

    /// The neighbouring position one step along `(d_row, d_col)`, or `None`
    /// when the step leaves the board.
    pub fn step(&self, (d_row, d_col): (isize, isize)) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let next = Position { row, col };
        next.is_on_board().then_some(next)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 4×4 grid. `Copy`, so every accessor hands out an independent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        Board {
            cells: [[Cell::Empty; SIZE]; SIZE],
        }
    }

    /// The opening position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (row, col, player) in INITIAL_PIECES {
            board.cells[row][col] = Cell::from(player);
        }
        board
    }

    /// Build a board from explicit rows, top row first.
    pub fn from_rows(cells: [[Cell; SIZE]; SIZE]) -> Self {
        Board { cells }
    }

    /// Cell at `pos`, or `None` when `pos` is off the board.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    /// Overwrite the cell at `pos`. Off-board positions are ignored and
    /// report `false`.
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match self.cells.get_mut(pos.row).and_then(|r| r.get_mut(pos.col)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Rows of the grid, top row first.
    pub fn rows(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    /// Number of pieces belonging to `player`.
    pub fn count(&self, player: Player) -> usize {
        let target = Cell::from(player);
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == target)
            .count()
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|c| !c.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied() == NUM_CELLS
    }

    /// All positions in row-major order.
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..SIZE).flat_map(|row| (0..SIZE).map(move |col| Position { row, col }))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                };
                write!(f, "{}", ch)?;
            }
            if r + 1 < SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
