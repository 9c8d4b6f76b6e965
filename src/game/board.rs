use std::fmt::{self, Debug};
use std::ops::Index;

use owo_colors::OwoColorize;

use super::{Cell, Player};
use crate::error::{Error, Result};

/// The outcome of a game.
/// If the game has not ended the outcome is `Ongoing`.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Outcome {
    Ongoing,
    Draw,
    Winner(Player),
}

/// All eight winning lines: rows, columns and both diagonals.
pub(crate) const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// The corner cells in row major order.
pub const CORNERS: [(usize, usize); 4] = [(0, 0), (0, 2), (2, 0), (2, 2)];

/// A 3x3 tic-tac-toe position.
/// This also provides placement, backtracking and terminal queries for the
/// search.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; 3]; 3],
}

impl Board {
    pub fn new() -> Board {
        Board::default()
    }

    /// Whether no empty cell is left.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&c| c != Cell::Empty)
    }

    /// Places `player`'s mark on an empty cell.
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<()> {
        if row >= 3 || col >= 3 || self.cells[row][col] != Cell::Empty {
            return Err(Error::InvalidMove { row, col });
        }
        self.cells[row][col] = player.into();
        Ok(())
    }

    /// Resets a cell to empty when backtracking.
    pub fn clear(&mut self, row: usize, col: usize) {
        self.cells[row][col] = Cell::Empty;
    }

    /// Unchecked placement for the search, which only visits empty cells.
    pub(crate) fn put(&mut self, row: usize, col: usize, player: Player) {
        self.cells[row][col] = player.into();
    }

    /// Checks all winning lines and the draw condition.
    pub fn outcome(&self) -> Outcome {
        for [a, b, c] in LINES {
            if let Some(player) = self[a].player() {
                if self[b] == self[a] && self[c] == self[a] {
                    return Outcome::Winner(player);
                }
            }
        }
        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    /// Parses a board from nine whitespace separated cells in row order.
    /// `X` and `O` are marks, `-` and `.` are empty.
    pub fn parse(txt: &str) -> Option<Board> {
        let mut cells = [[Cell::Empty; 3]; 3];
        let mut n = 0;
        for token in txt.split_whitespace() {
            if n >= 9 {
                return None;
            }
            cells[n / 3][n % 3] = match token {
                "X" | "x" => Cell::X,
                "O" | "o" => Cell::O,
                "-" | "." => Cell::Empty,
                _ => return None,
            };
            n += 1;
        }
        (n == 9).then_some(Board { cells })
    }
}

impl Index<(usize, usize)> for Board {
    type Output = Cell;

    fn index(&self, (row, col): (usize, usize)) -> &Cell {
        &self.cells[row][col]
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in &self.cells {
            write!(f, "  ")?;
            for cell in row {
                match cell {
                    Cell::X => write!(f, "{} ", "X".green())?,
                    Cell::O => write!(f, "{} ", "O".yellow())?,
                    Cell::Empty => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
