//! The backtracking Sudoku solver.
//!
//! This module provides the [`Solver`] struct, which implements a classical
//! depth-first backtracking search over a [`Grid`]. The search finds the
//! first empty cell in row-major order, tries each admissible value in
//! ascending order, and recurses; a branch that cannot be completed is undone
//! and the next value is tried. When no value works the search fails and the
//! caller backtracks further.
//!
//! Failure is a plain boolean. The search is deterministic and exhaustive, so
//! it always terminates with the correct answer for any 9x9 input; there is
//! nothing to time out or cancel.
//!
//! [`count_solutions`] is a bounded variant of the same search that counts
//! completions instead of keeping the first one. It restores the grid before
//! returning and is what the generator uses for its uniqueness check.

use crate::sudoku::board::Grid;

/// Statistics collected during one run of the search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Number of candidate placements tried.
    pub nodes: usize,
    /// Number of placements undone after a failed branch.
    pub backtracks: usize,
}

/// A backtracking Sudoku solver.
///
/// The struct exists to carry search statistics across the recursion; the
/// search itself holds no other state. For the plain contract without
/// statistics, use the free [`solve`] function.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    stats: SolverStats,
}

impl Solver {
    /// Creates a solver with zeroed statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to fill every empty cell of `grid` in place.
    ///
    /// Returns `true` and leaves `grid` completely and validly filled when a
    /// completion reachable by filling only the empty cells exists. Returns
    /// `false` otherwise; every trial placement is undone on the way out, so
    /// the grid is then back in the state it was passed in.
    pub fn solve(&mut self, grid: &mut Grid) -> bool {
        let Some((row, col)) = grid.first_empty() else {
            return true;
        };

        for value in grid.candidates(row, col) {
            self.stats.nodes += 1;
            grid.set(row, col, value);
            if self.solve(grid) {
                return true;
            }
            grid.clear(row, col);
            self.stats.backtracks += 1;
        }

        false
    }

    /// The statistics accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> SolverStats {
        self.stats
    }
}

/// Attempts to fill every empty cell of `grid` in place; see
/// [`Solver::solve`].
pub fn solve(grid: &mut Grid) -> bool {
    Solver::new().solve(grid)
}

/// Counts the completions of `grid`, stopping once `limit` have been found.
///
/// The grid is restored to its input state before returning. A limit of `2`
/// answers the uniqueness question without paying for a full enumeration.
pub fn count_solutions(grid: &mut Grid, limit: usize) -> usize {
    let mut found = 0;
    count_rec(grid, limit, &mut found);
    found
}

fn count_rec(grid: &mut Grid, limit: usize, found: &mut usize) {
    if *found >= limit {
        return;
    }

    let Some((row, col)) = grid.first_empty() else {
        *found += 1;
        return;
    };

    for value in grid.candidates(row, col) {
        grid.set(row, col, value);
        count_rec(grid, limit, found);
        grid.clear(row, col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::board::{EXAMPLE, SIZE};

    /// The unique published solution of [`EXAMPLE`].
    const EXAMPLE_SOLUTION: [[u8; SIZE]; SIZE] = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    #[test]
    fn solves_the_example_to_the_published_solution() {
        let mut grid = Grid::new(EXAMPLE);
        assert!(solve(&mut grid));
        assert_eq!(grid, Grid::new(EXAMPLE_SOLUTION));
    }

    #[test]
    fn solves_an_empty_grid() {
        let mut grid = Grid::empty();
        assert!(solve(&mut grid));
        assert!(grid.is_solved());
    }

    #[test]
    fn complete_valid_grid_is_returned_unchanged() {
        let mut grid = Grid::new(EXAMPLE_SOLUTION);
        assert!(solve(&mut grid));
        assert_eq!(grid, Grid::new(EXAMPLE_SOLUTION));
    }

    #[test]
    fn solve_is_idempotent_on_its_own_output() {
        let mut grid = Grid::new(EXAMPLE);
        assert!(solve(&mut grid));
        let solved = grid;
        assert!(solve(&mut grid));
        assert_eq!(grid, solved);
    }

    #[test]
    fn fails_when_a_cell_has_no_candidates() {
        // Row 0 holds 1..=8; the 9 needed at (0, 8) is blocked by the column.
        let mut grid = Grid::empty();
        for col in 0..8 {
            #[allow(clippy::cast_possible_truncation)]
            grid.set(0, col, col as u8 + 1);
        }
        grid.set(1, 8, 9);

        assert!(grid.conflicts().is_empty(), "fixture must start valid");
        assert!(!solve(&mut grid));
    }

    #[test]
    fn fails_on_a_duplicate_within_a_row() {
        // The example board with a second 5 in row 0 has no completion.
        let mut grid = Grid::new(EXAMPLE);
        grid.set(0, 2, 5);
        assert!(!solve(&mut grid));
    }

    #[test]
    fn solver_struct_records_search_statistics() {
        let mut solver = Solver::new();
        let mut grid = Grid::new(EXAMPLE);
        assert!(solver.solve(&mut grid));

        let stats = solver.stats();
        // 51 empty cells, so at least one placement per cell.
        assert!(stats.nodes >= 51);
    }

    #[test]
    fn stats_are_zero_for_a_full_grid() {
        let mut solver = Solver::new();
        let mut grid = Grid::new(EXAMPLE_SOLUTION);
        assert!(solver.solve(&mut grid));
        assert_eq!(solver.stats(), SolverStats::default());
    }

    #[test]
    fn count_solutions_finds_exactly_one_for_the_example() {
        let mut grid = Grid::new(EXAMPLE);
        assert_eq!(count_solutions(&mut grid, 2), 1);
        // The grid is restored afterwards.
        assert_eq!(grid, Grid::new(EXAMPLE));
    }

    #[test]
    fn count_solutions_respects_its_limit() {
        // Clearing a full row of the solution leaves it uniquely completable;
        // clearing all but the first row certainly does not.
        let mut grid = Grid::new(EXAMPLE_SOLUTION);
        for row in 1..SIZE {
            for col in 0..SIZE {
                grid.clear(row, col);
            }
        }
        assert_eq!(count_solutions(&mut grid, 3), 3);
        assert_eq!(count_solutions(&mut grid, 1), 1);
    }

    #[test]
    fn count_solutions_is_zero_for_an_unsolvable_grid() {
        let mut grid = Grid::new(EXAMPLE);
        grid.set(0, 2, 5);
        let before = grid;
        assert_eq!(count_solutions(&mut grid, 2), 0);
        assert_eq!(grid, before);
    }
}
