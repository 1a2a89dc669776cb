//! Sudoku puzzle generation.
//!
//! A puzzle is produced in two phases: a randomized backtracking fill of an
//! empty grid yields a complete solved board, then clues are removed in a
//! random order, each removal kept only while the board still has a unique
//! solution (checked with [`count_solutions`] bounded at two). Removal stops
//! at the requested clue count, or earlier when no further clue can be taken
//! without losing uniqueness.

use crate::sudoku::board::{Cell, Grid, SIZE};
use crate::sudoku::solver::count_solutions;
use std::fmt;

/// The smallest number of clues a 9x9 puzzle can have and still be unique.
pub const MIN_CLUES: usize = 17;

/// Errors from puzzle generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateError {
    /// The requested clue count is below [`MIN_CLUES`]; no unique 9x9 puzzle
    /// with that few clues exists.
    TooFewClues(usize),
    /// The requested clue count leaves nothing to solve (or exceeds the
    /// board).
    TooManyClues(usize),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewClues(clues) => write!(
                f,
                "requested {clues} clues, but a unique puzzle needs at least {MIN_CLUES}"
            ),
            Self::TooManyClues(clues) => write!(
                f,
                "requested {clues} clues, which leaves no cell to solve"
            ),
        }
    }
}

impl std::error::Error for GenerateError {}

/// A seedable Sudoku puzzle generator.
#[derive(Debug, Clone)]
pub struct Generator {
    rng: fastrand::Rng,
}

impl Generator {
    /// Creates a generator seeded from the thread-local RNG.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Creates a generator with a fixed seed, for reproducible output.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Produces a complete, valid, randomly filled board.
    ///
    /// This is a backtracking fill with shuffled candidate order; from an
    /// empty grid it always succeeds.
    #[must_use]
    pub fn solved_grid(&mut self) -> Grid {
        let mut grid = Grid::empty();
        let filled = fill(&mut grid, &mut self.rng);
        debug_assert!(filled, "an empty grid is always completable");
        grid
    }

    /// Produces a puzzle with a unique solution and at least `clues` clues.
    ///
    /// Clues are removed from a fresh solved board in random order; a removal
    /// that breaks uniqueness is put back. The result can hold more than
    /// `clues` clues when no further removal preserves uniqueness, so callers
    /// that care should check `clue_count` on the result.
    ///
    /// # Errors
    ///
    /// [`GenerateError::TooFewClues`] when `clues < MIN_CLUES`,
    /// [`GenerateError::TooManyClues`] when `clues >= 81`.
    pub fn puzzle(&mut self, clues: usize) -> Result<Grid, GenerateError> {
        if clues < MIN_CLUES {
            return Err(GenerateError::TooFewClues(clues));
        }
        if clues >= SIZE * SIZE {
            return Err(GenerateError::TooManyClues(clues));
        }

        let mut grid = self.solved_grid();

        let mut cells: Vec<Cell> = (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .collect();
        self.rng.shuffle(&mut cells);

        let mut filled = SIZE * SIZE;
        for (row, col) in cells {
            if filled == clues {
                break;
            }

            let value = grid.get(row, col);
            grid.clear(row, col);

            if count_solutions(&mut grid, 2) == 1 {
                filled -= 1;
            } else {
                grid.set(row, col, value);
            }
        }

        Ok(grid)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

/// Fills every empty cell of `grid` with a randomly ordered backtracking
/// search. Returns `false` only when the grid admits no completion.
fn fill(grid: &mut Grid, rng: &mut fastrand::Rng) -> bool {
    let Some((row, col)) = grid.first_empty() else {
        return true;
    };

    let mut candidates = grid.candidates(row, col);
    rng.shuffle(&mut candidates);

    for value in candidates {
        grid.set(row, col, value);
        if fill(grid, rng) {
            return true;
        }
        grid.clear(row, col);
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::solver::count_solutions;

    #[test]
    fn solved_grid_is_complete_and_valid() {
        let mut generator = Generator::with_seed(0xDEAD_BEEF);
        let grid = generator.solved_grid();
        assert!(grid.is_solved());
    }

    #[test]
    fn solved_grids_differ_across_draws() {
        let mut generator = Generator::with_seed(1);
        assert_ne!(generator.solved_grid(), generator.solved_grid());
    }

    #[test]
    fn same_seed_reproduces_the_same_puzzle() {
        let a = Generator::with_seed(7).puzzle(40).unwrap();
        let b = Generator::with_seed(7).puzzle(40).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn generated_puzzle_has_a_unique_solution() {
        let mut generator = Generator::with_seed(0xDEAD_BEEF);
        let mut puzzle = generator.puzzle(40).unwrap();

        assert!(puzzle.clue_count() >= 40);
        // Removing a clue from a full board always leaves it unique, so some
        // removal must have happened.
        assert!(puzzle.clue_count() < SIZE * SIZE);
        assert!(puzzle.conflicts().is_empty());
        assert_eq!(count_solutions(&mut puzzle, 2), 1);
    }

    #[test]
    fn rejects_out_of_range_clue_counts() {
        let mut generator = Generator::with_seed(3);
        assert_eq!(generator.puzzle(16), Err(GenerateError::TooFewClues(16)));
        assert_eq!(generator.puzzle(81), Err(GenerateError::TooManyClues(81)));
    }
}
