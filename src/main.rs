//! # sudoku-solver
//!
//! `sudoku-solver` is a command-line Sudoku solver. It parses puzzles from
//! files or inline text, completes them with a depth-first backtracking
//! search, and can also generate fresh puzzles with unique solutions.
//!
//! ## Features
//!
//! - **Multiple input forms**: puzzle files (one row per line, `0` or `.`
//!   for empty cells, `#`/`c` comments) and the 81-character exchange string.
//! - **Batch solving**: point it at a directory and every `.sudoku`/`.txt`
//!   file underneath is solved.
//! - **Generation**: randomized puzzles at a requested clue count, seedable
//!   for reproducibility.
//! - **Verification**: the solved board is re-checked against the Sudoku
//!   rules and the original clues.
//! - **Statistics**: parse and solve times, search node and backtrack counts
//!   with rates, and memory usage.
//! - **Memory management**: uses `tikv-jemallocator` for allocation and
//!   memory usage statistics.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a puzzle file (a bare path is treated as `file --path`)
//! sudoku-solver puzzle.sudoku
//!
//! # Solve an inline puzzle and print the board
//! sudoku-solver text --input "530070000600195000...080079" --print-solution
//!
//! # Solve every puzzle under a directory
//! sudoku-solver dir --path puzzles/
//!
//! # Generate a reproducible 30-clue puzzle
//! sudoku-solver generate --clues 30 --seed 42
//!
//! # Shell completions
//! sudoku-solver completions zsh
//! ```

use crate::sudoku::board::Grid;
use crate::sudoku::generate::Generator;
use crate::sudoku::parser;
use crate::sudoku::solver::{Solver, SolverStats};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

mod sudoku;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the sudoku solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku-solver", version, about = "A backtracking Sudoku solver")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`, `generate`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands for the sudoku solver.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a puzzle file.
    File {
        /// Path to the puzzle file. The format of this file is defined by the
        /// `sudoku::parser` module.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle provided as plain text.
    Text {
        /// The puzzle as inline text: either nine rows separated by newlines,
        /// or a single 81-character string (`0` or `.` for empty cells).
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every puzzle file found under a directory (recursively).
    Dir {
        /// Path to the directory to scan for `.sudoku` and `.txt` files.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate a puzzle with a unique solution.
    Generate {
        /// The number of clues to leave on the board (at least 17).
        #[arg(short, long, default_value_t = 30)]
        clues: usize,

        /// Seed for the generator, for reproducible output.
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the solving process.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Enable verification of the found solution. A solved board is re-checked
    /// against the Sudoku rules and the original clues.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Enable printing of the solved board.
    #[arg(short, long, default_value_t = false)]
    print_solution: bool,
}

/// Main entry point of the sudoku solver application.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and manages the overall execution flow.
fn main() {
    let cli = Cli::parse();

    // Handle the case where a path is provided globally without a subcommand.
    // This defaults to solving a puzzle file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            solve_path(&path, &cli.common);
            return;
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => solve_path(&path, &common),

        Some(Commands::Text { input, common }) => {
            let time = std::time::Instant::now();
            match parser::parse_str(&input) {
                Ok(grid) => solve_and_report(grid, &common, None, time.elapsed()),
                Err(e) => {
                    eprintln!("Error parsing puzzle text: {e}");
                    std::process::exit(1);
                }
            }
        }

        Some(Commands::Dir { path, common }) => match parser::find_puzzle_files(&path) {
            Ok(files) => {
                if files.is_empty() {
                    eprintln!("No puzzle files found under {}", path.display());
                    std::process::exit(1);
                }
                for file in files {
                    solve_path(&file, &common);
                }
            }
            Err(e) => {
                eprintln!("Error scanning directory {}: {e}", path.display());
                std::process::exit(1);
            }
        },

        Some(Commands::Generate { clues, seed }) => {
            let mut generator = seed.map_or_else(Generator::new, Generator::with_seed);
            match generator.puzzle(clues) {
                Ok(grid) => {
                    println!("# {} clues", grid.clue_count());
                    println!("{grid}");
                }
                Err(e) => {
                    eprintln!("Error generating puzzle: {e}");
                    std::process::exit(1);
                }
            }
        }

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }

        None => {
            // Reached only if no subcommand was provided and `cli.path` was
            // also None; a Some path is handled by the first block above.
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

/// Parses and solves a single puzzle file, reporting errors to stderr.
fn solve_path(path: &Path, common: &CommonOptions) {
    let time = std::time::Instant::now();
    match parser::parse_file(path) {
        Ok(grid) => {
            let parse_time = time.elapsed();
            println!("Solving: {}", path.display());
            solve_and_report(grid, common, Some(path), parse_time);
        }
        Err(e) => {
            eprintln!("Error parsing puzzle file {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

/// Solves a parsed grid and reports results including stats and verification.
fn solve_and_report(grid: Grid, common: &CommonOptions, label: Option<&Path>, parse_time: Duration) {
    if common.debug {
        if let Some(path) = label {
            println!("Puzzle: {}", path.display());
        }
        println!("Parsed puzzle:\n{grid}");
        println!("Clues: {}", grid.clue_count());
    }

    // Advance epoch for jemalloc stats, to isolate memory usage of the
    // solving phase.
    epoch::advance().unwrap();

    let mut solved = grid;
    let mut solver = Solver::new();

    let time = std::time::Instant::now();
    let ok = solver.solve(&mut solved);
    let elapsed = time.elapsed();

    if common.debug {
        println!("Solved: {ok}");
        println!("Time: {elapsed:?}");
    }

    // Advance epoch again so the memory stats capture everything up to this
    // point.
    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    #[allow(clippy::cast_precision_loss)]
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    #[allow(clippy::cast_precision_loss)]
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify && ok {
        verify_solution(&grid, &solved);
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &grid,
            &solver.stats(),
            allocated_mib,
            resident_mib,
        );
    }

    if ok {
        if common.print_solution {
            println!("Solution:\n{solved}");
        }
        println!("\nSOLVED");
    } else {
        println!("\nUNSOLVABLE");
    }
}

/// Verifies a solved board against the rules and the original clues.
///
/// Prints whether the verification was successful. If verification fails, it
/// panics.
fn verify_solution(original: &Grid, solved: &Grid) {
    let ok = solved.is_solved() && clues_preserved(original, solved);
    println!("Verified: {ok:?}");
    if !ok {
        panic!("Solution failed verification!");
    }
}

/// Checks that every clue of `original` appears unchanged in `solved`.
fn clues_preserved(original: &Grid, solved: &Grid) -> bool {
    use crate::sudoku::board::SIZE;

    (0..SIZE)
        .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
        .all(|(row, col)| {
            let clue = original.get(row, col);
            clue == 0 || clue == solved.get(row, col)
        })
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    #[allow(clippy::cast_precision_loss)]
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    grid: &Grid,
    s: &SolverStats,
    allocated: f64, // MiB
    resident: f64,  // MiB
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let clues = grid.clue_count();

    println!("\n=======================[ Problem Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Clues", clues);
    stat_line("Empty cells", 81 - clues);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Nodes", s.nodes, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
