//! The board representation and its transition function.
//!
//! A [Board] is a plain `Copy` value; applying an [Action] always produces a
//! fresh board and never mutates the one you already hold. That keeps every
//! node of the search tree an independent snapshot, so there is no aliasing
//! between a position and the positions derived from it.

use std::fmt::{self, Display};

use itertools::iproduct;

/// One of the two players. `X` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// The first player, the maximizer in the search.
    X,
    /// The second player, the minimizer in the search.
    O,
}

impl Mark {
    /// The mark belonging to the other player.
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// A (row, column) coordinate on the board.
///
/// An action is only legal on a board where the addressed cell is empty;
/// [Board::apply] enforces this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    /// Row index, `0..3`, top to bottom.
    pub row: usize,
    /// Column index, `0..3`, left to right.
    pub col: usize,
}

/// Returned by [Board::apply] when the target cell is already occupied.
///
/// The call that produced this is unsalvageable; retrying with the same
/// action fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalAction {
    /// The action that addressed an occupied cell.
    pub action: Action,
}

impl Display for IllegalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell ({}, {}) is already occupied",
            self.action.row, self.action.col
        )
    }
}

impl std::error::Error for IllegalAction {}

/// The eight straight lines that win the game.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// An immutable snapshot of a 3×3 position.
///
/// Whose turn it is falls out of the mark counts, so the board carries no
/// separate turn counter. On any board reachable from [Board::empty] the
/// count of `X` cells minus the count of `O` cells is 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Option<Mark>; 3]; 3],
}

impl Board {
    /// The starting position, all cells empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a board directly from a cell grid.
    ///
    /// Callers constructing positions by hand are responsible for keeping the
    /// mark counts consistent with turn alternation.
    pub fn from_cells(cells: [[Option<Mark>; 3]; 3]) -> Self {
        Self { cells }
    }

    /// The mark at the given cell, or `None` when it is empty.
    pub fn get(&self, action: Action) -> Option<Mark> {
        self.cells[action.row][action.col]
    }

    fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Some(mark))
            .count()
    }

    /// The mark whose turn it is, derived from the counts already placed.
    ///
    /// Equal counts mean `X` is to move; `X` leading by one means `O` is.
    pub fn to_move(&self) -> Mark {
        if self.count(Mark::X) == self.count(Mark::O) {
            Mark::X
        } else {
            Mark::O
        }
    }

    /// All empty-cell coordinates, in row-major order.
    ///
    /// The fixed order is what makes search results (and their tie-breaks)
    /// reproducible.
    pub fn available_actions(&self) -> impl Iterator<Item = Action> + '_ {
        iproduct!(0..3, 0..3)
            .map(|(row, col)| Action { row, col })
            .filter(|action| self.get(*action).is_none())
    }

    /// The board that results from the current player marking `action`.
    ///
    /// The receiver is left untouched; the new position is returned by value.
    pub fn apply(&self, action: Action) -> Result<Board, IllegalAction> {
        if self.get(action).is_some() {
            return Err(IllegalAction { action });
        }

        let mut next = *self;
        next.cells[action.row][action.col] = Some(self.to_move());
        Ok(next)
    }

    /// The mark owning a complete row, column, or diagonal, if any.
    pub fn winner(&self) -> Option<Mark> {
        for line in LINES {
            let [a, b, c] = line.map(|(row, col)| self.cells[row][col]);
            if a.is_some() && a == b && b == c {
                return a;
            }
        }

        None
    }

    /// True when the game is over: someone won, or no empty cell remains.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.cells.iter().flatten().all(|cell| cell.is_some())
    }

    /// +1 if `X` won, −1 if `O` won, 0 otherwise.
    ///
    /// Only meaningful on terminal boards; the search never consults it
    /// elsewhere.
    pub fn utility(&self) -> i8 {
        match self.winner() {
            Some(Mark::X) => 1,
            Some(Mark::O) => -1,
            None => 0,
        }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                match cell {
                    Some(mark) => write!(f, "{mark}")?,
                    None => write!(f, ".")?,
                }
            }
        }

        Ok(())
    }
}
