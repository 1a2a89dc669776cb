//! The Sudoku board model.
//!
//! A [`Grid`] is a 9x9 matrix of digits where `0` marks an empty cell. All
//! validity queries live here: whether a value may be placed at a cell
//! ([`Grid::allows`]), which values remain admissible ([`Grid::candidates`]),
//! and which filled cells break the uniqueness rule ([`Grid::conflicts`]).
//!
//! A [`Puzzle`] pairs a grid with a snapshot of its initial state so that a
//! front end can accept user entries, highlight conflicting cells and restore
//! the board to the position it started from.

use itertools::Itertools;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::fmt;

/// The side length of the board.
pub const SIZE: usize = 9;

/// The side length of one of the nine non-overlapping subgrids.
pub const BOX_SIZE: usize = 3;

/// A cell coordinate as `(row, col)`, each in `[0, 8]`.
pub type Cell = (usize, usize);

/// The canonical example board (the classic published test fixture, also the
/// board the original interactive program starts from).
pub const EXAMPLE: [[u8; SIZE]; SIZE] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// A 9x9 Sudoku board.
///
/// Cells hold values in `[0, 9]`; `0` is an empty cell. The type is `Copy`
/// (81 bytes), so taking a snapshot of a board is a plain assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid([[u8; SIZE]; SIZE]);

impl Grid {
    /// Creates a board from a 9x9 array of cell values.
    #[must_use]
    pub const fn new(cells: [[u8; SIZE]; SIZE]) -> Self {
        Self(cells)
    }

    /// Creates an empty board.
    #[must_use]
    pub const fn empty() -> Self {
        Self([[0; SIZE]; SIZE])
    }

    /// Returns the value at `(row, col)`; `0` means empty.
    #[must_use]
    pub const fn get(&self, row: usize, col: usize) -> u8 {
        self.0[row][col]
    }

    /// Writes `value` at `(row, col)`. No validity check is performed; use
    /// [`Grid::allows`] first when one is wanted.
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.0[row][col] = value;
    }

    /// Empties the cell at `(row, col)`.
    pub fn clear(&mut self, row: usize, col: usize) {
        self.0[row][col] = 0;
    }

    /// Returns the first empty cell in row-major order, or `None` when the
    /// board is full.
    #[must_use]
    pub fn first_empty(&self) -> Option<Cell> {
        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.0[row][col] == 0 {
                    return Some((row, col));
                }
            }
        }
        None
    }

    /// Checks whether `value` may sit at `(row, col)` without duplicating a
    /// value elsewhere in its row, column or box. The cell itself is excluded
    /// from the scan, so a value already written there does not conflict with
    /// itself.
    #[must_use]
    pub fn allows(&self, row: usize, col: usize, value: u8) -> bool {
        if value == 0 || value > 9 {
            return false;
        }

        for c in 0..SIZE {
            if c != col && self.0[row][c] == value {
                return false;
            }
        }
        for r in 0..SIZE {
            if r != row && self.0[r][col] == value {
                return false;
            }
        }

        let box_row = row / BOX_SIZE * BOX_SIZE;
        let box_col = col / BOX_SIZE * BOX_SIZE;
        for r in box_row..box_row + BOX_SIZE {
            for c in box_col..box_col + BOX_SIZE {
                if (r, c) != (row, col) && self.0[r][c] == value {
                    return false;
                }
            }
        }

        true
    }

    /// Returns the admissible values for the cell at `(row, col)`, in
    /// ascending order. A filled cell has no candidates.
    #[must_use]
    pub fn candidates(&self, row: usize, col: usize) -> SmallVec<[u8; SIZE]> {
        if self.0[row][col] != 0 {
            return SmallVec::new();
        }
        (1..=9)
            .filter(|&value| self.allows(row, col, value))
            .collect()
    }

    /// Returns every filled cell that duplicates a value within some row,
    /// column or box, sorted in row-major order. Both members of a duplicate
    /// pair are reported; a front end highlights these.
    #[must_use]
    pub fn conflicts(&self) -> Vec<Cell> {
        let mut marked: FxHashSet<Cell> = FxHashSet::default();

        for unit in Self::units() {
            for (i, &(r1, c1)) in unit.iter().enumerate() {
                let value = self.0[r1][c1];
                if value == 0 {
                    continue;
                }
                for &(r2, c2) in &unit[i + 1..] {
                    if self.0[r2][c2] == value {
                        marked.insert((r1, c1));
                        marked.insert((r2, c2));
                    }
                }
            }
        }

        marked.into_iter().sorted_unstable().collect()
    }

    /// Checks whether every cell is filled. Does not check validity.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.first_empty().is_none()
    }

    /// Checks whether the board is completely filled and free of conflicts.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.is_complete() && self.conflicts().is_empty()
    }

    /// Returns the number of filled cells.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.rows().flatten().filter(|&&value| value != 0).count()
    }

    /// Iterates over the rows of the board.
    pub fn rows(&self) -> impl Iterator<Item = &[u8; SIZE]> {
        self.0.iter()
    }

    /// The 27 units of the board (nine rows, nine columns, nine boxes), each
    /// as the coordinates of its nine cells.
    fn units() -> Vec<[Cell; SIZE]> {
        let mut units = Vec::with_capacity(3 * SIZE);
        for r in 0..SIZE {
            units.push(std::array::from_fn(|c| (r, c)));
        }
        for c in 0..SIZE {
            units.push(std::array::from_fn(|r| (r, c)));
        }
        for box_row in (0..SIZE).step_by(BOX_SIZE) {
            for box_col in (0..SIZE).step_by(BOX_SIZE) {
                units.push(std::array::from_fn(|i| {
                    (box_row + i / BOX_SIZE, box_col + i % BOX_SIZE)
                }));
            }
        }
        units
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<[[u8; SIZE]; SIZE]> for Grid {
    fn from(cells: [[u8; SIZE]; SIZE]) -> Self {
        Self::new(cells)
    }
}

impl From<Grid> for [[u8; SIZE]; SIZE] {
    fn from(grid: Grid) -> Self {
        grid.0
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .0
            .iter()
            .map(|row| row.iter().map(|&value| cell_char(value)).join(" "))
            .join("\n");
        write!(f, "{rendered}")
    }
}

/// Renders one cell value: `.` for empty, the digit otherwise.
const fn cell_char(value: u8) -> char {
    if value == 0 {
        '.'
    } else {
        (b'0' + value) as char
    }
}

/// A board paired with a snapshot of its initial state.
///
/// This is the surface a front end works against: digits are written with
/// [`Puzzle::enter`] (even invalid ones; [`Puzzle::conflicts`] reports them
/// for highlighting), [`Puzzle::solve`] completes the board in place, and
/// [`Puzzle::reset`] restores the pre-solve position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Puzzle {
    current: Grid,
    initial: Grid,
}

impl Puzzle {
    /// Creates a puzzle, snapshotting `grid` as the initial state.
    #[must_use]
    pub const fn new(grid: Grid) -> Self {
        Self {
            current: grid,
            initial: grid,
        }
    }

    /// The current board.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.current
    }

    /// The initial snapshot.
    #[must_use]
    pub const fn initial(&self) -> &Grid {
        &self.initial
    }

    /// Writes a user entry at `(row, col)`; `0` clears the cell. The entry is
    /// accepted even when it conflicts, matching interactive use where bad
    /// digits are highlighted rather than rejected.
    pub fn enter(&mut self, row: usize, col: usize, value: u8) {
        self.current.set(row, col, value);
    }

    /// Attempts to complete the board in place. Returns `false` and leaves
    /// the board unchanged if no completion exists; [`Puzzle::reset`] is not
    /// needed to recover from a failed solve.
    pub fn solve(&mut self) -> bool {
        crate::sudoku::solver::solve(&mut self.current)
    }

    /// Every filled cell currently involved in a duplicate.
    #[must_use]
    pub fn conflicts(&self) -> Vec<Cell> {
        self.current.conflicts()
    }

    /// Restores the board to the initial snapshot.
    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

impl From<Grid> for Puzzle {
    fn from(grid: Grid) -> Self {
        Self::new(grid)
    }
}
