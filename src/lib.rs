#![deny(missing_docs)]
//! This crate provides a backtracking solver, puzzle generator and text-format parser
//! for 9x9 Sudoku puzzles.

/// The `sudoku` module implements the Sudoku engine: the board model and validity
/// queries, the backtracking solver, the puzzle generator and the puzzle text format
/// parser.
pub mod sudoku;
