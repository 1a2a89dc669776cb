#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
/// The board model: `Grid`, `Puzzle` and validity queries.
pub mod board;
/// The puzzle generator: randomized fill and clue removal.
pub mod generate;
/// The puzzle text format parser.
pub mod parser;
/// The backtracking solver.
pub mod solver;
