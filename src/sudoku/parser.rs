//! A parser for the Sudoku puzzle text format.
//!
//! The format is line-oriented: one line per row, nine cells per line, where
//! `0` or `.` marks an empty cell and spaces between cells are optional.
//! Lines starting with `#` or `c` are comments; blank lines are skipped. The
//! inline entry point [`parse_str`] additionally accepts the common exchange
//! form of a single 81-character string.
//!
//! Example file:
//!
//! ```text
//! # classic example puzzle
//! 5 3 . . 7 . . . .
//! 6 . . 1 9 5 . . .
//! . 9 8 . . . . 6 .
//! 8 . . . 6 . . . 3
//! 4 . . 8 . 3 . . 1
//! 7 . . . 2 . . . 6
//! . 6 . . . . 2 8 .
//! . . . 4 1 9 . . 5
//! . . . . 8 . . 7 9
//! ```

use crate::sudoku::board::{Grid, SIZE};
use itertools::Itertools;
use std::fmt;
use std::io::{self, BufRead, Cursor};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Errors produced while parsing puzzle text.
#[derive(Debug)]
pub enum ParseError {
    /// Reading from the underlying source failed.
    Io(io::Error),
    /// A cell was neither a digit nor `.`.
    BadCharacter {
        /// 1-based line number of the offending character.
        line: usize,
        /// The character found.
        found: char,
    },
    /// A row line did not hold exactly nine cells.
    WrongRowLength {
        /// 1-based line number of the offending row.
        line: usize,
        /// The number of cells found on it.
        len: usize,
    },
    /// The input did not hold exactly nine rows.
    WrongRowCount(usize),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::BadCharacter { line, found } => {
                write!(f, "line {line}: invalid cell character {found:?}")
            }
            Self::WrongRowLength { line, len } => {
                write!(f, "line {line}: expected {SIZE} cells, found {len}")
            }
            Self::WrongRowCount(rows) => {
                write!(f, "expected {SIZE} rows, found {rows}")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Parses a puzzle from a `BufRead` source.
///
/// # Errors
///
/// Returns a [`ParseError`] when reading fails, a cell character is invalid,
/// or the input does not form nine rows of nine cells.
pub fn parse_grid<R: BufRead>(reader: R) -> Result<Grid, ParseError> {
    let mut rows: Vec<[u8; SIZE]> = Vec::with_capacity(SIZE);

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('c') {
            continue;
        }
        if rows.len() == SIZE {
            // A tenth row line; report the count rather than a cell error.
            return Err(ParseError::WrongRowCount(rows.len() + 1));
        }
        rows.push(parse_row(trimmed, idx + 1)?);
    }

    if rows.len() != SIZE {
        return Err(ParseError::WrongRowCount(rows.len()));
    }

    let mut cells = [[0; SIZE]; SIZE];
    for (row, parsed) in cells.iter_mut().zip(rows) {
        *row = parsed;
    }
    Ok(Grid::new(cells))
}

/// Parses one row line into nine cell values.
fn parse_row(line: &str, line_no: usize) -> Result<[u8; SIZE], ParseError> {
    let mut row = [0; SIZE];
    let mut len = 0;

    for ch in line.chars().filter(|ch| !ch.is_whitespace()) {
        let value = cell_value(ch).ok_or(ParseError::BadCharacter {
            line: line_no,
            found: ch,
        })?;
        if len < SIZE {
            row[len] = value;
        }
        len += 1;
    }

    if len == SIZE {
        Ok(row)
    } else {
        Err(ParseError::WrongRowLength { line: line_no, len })
    }
}

/// Maps a cell character to its value; `.` and `0` are the empty cell.
const fn cell_value(ch: char) -> Option<u8> {
    match ch {
        '.' | '0' => Some(0),
        '1'..='9' => Some(ch as u8 - b'0'),
        _ => None,
    }
}

/// Parses a puzzle from inline text.
///
/// Accepts the line-oriented format of [`parse_grid`] as well as a single
/// 81-character string (whitespace ignored).
///
/// # Errors
///
/// Returns a [`ParseError`] as for [`parse_grid`].
pub fn parse_str(input: &str) -> Result<Grid, ParseError> {
    let compact = input.trim();
    let cells = compact
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect_vec();

    if !compact.contains('\n') && cells.len() == SIZE * SIZE {
        let mut grid = Grid::empty();
        for (i, ch) in cells.into_iter().enumerate() {
            let value = cell_value(ch).ok_or(ParseError::BadCharacter { line: 1, found: ch })?;
            grid.set(i / SIZE, i % SIZE, value);
        }
        return Ok(grid);
    }

    parse_grid(Cursor::new(input))
}

/// Parses a puzzle file.
///
/// This is a convenience wrapper that opens the file, wraps it in a
/// `BufReader`, and calls [`parse_grid`].
///
/// # Errors
///
/// Returns [`ParseError::Io`] when the file cannot be opened or read, and the
/// other variants as for [`parse_grid`].
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Grid, ParseError> {
    let file = std::fs::File::open(path)?;
    let reader = io::BufReader::new(file);
    parse_grid(reader)
}

/// Recursively finds puzzle files (`.sudoku` or `.txt`) under a directory,
/// sorted by path.
///
/// # Errors
///
/// Returns `io::Result::Err` when the directory or one of its entries cannot
/// be read.
pub fn find_puzzle_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("sudoku" | "txt")
        ) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::board::EXAMPLE;

    const EXAMPLE_LINES: &str = "\
        # classic example puzzle\n\
        5 3 . . 7 . . . .\n\
        6 . . 1 9 5 . . .\n\
        . 9 8 . . . . 6 .\n\
        8 . . . 6 . . . 3\n\
        4 . . 8 . 3 . . 1\n\
        7 . . . 2 . . . 6\n\
        . 6 . . . . 2 8 .\n\
        . . . 4 1 9 . . 5\n\
        . . . . 8 . . 7 9\n";

    const EXAMPLE_COMPACT: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    #[test]
    fn parses_the_line_oriented_format() {
        let reader = Cursor::new(EXAMPLE_LINES);
        let grid = parse_grid(reader).unwrap();
        assert_eq!(grid, Grid::new(EXAMPLE));
    }

    #[test]
    fn parses_unspaced_rows_and_zero_as_empty() {
        let input = "c comment line\n\
                     530070000\n600195000\n098000060\n800060003\n400803001\n\
                     700020006\n060000280\n000419005\n000080079\n";
        let grid = parse_grid(Cursor::new(input)).unwrap();
        assert_eq!(grid, Grid::new(EXAMPLE));
    }

    #[test]
    fn skips_blank_lines() {
        let input = format!("\n{EXAMPLE_LINES}\n\n");
        let grid = parse_str(&input).unwrap();
        assert_eq!(grid, Grid::new(EXAMPLE));
    }

    #[test]
    fn parses_the_81_character_exchange_form() {
        let grid = parse_str(EXAMPLE_COMPACT).unwrap();
        assert_eq!(grid, Grid::new(EXAMPLE));
    }

    #[test]
    fn rejects_a_bad_character_with_its_line() {
        let input = "5 3 . . 7 . . x .\n";
        match parse_grid(Cursor::new(input)) {
            Err(ParseError::BadCharacter { line: 1, found: 'x' }) => {}
            other => panic!("expected BadCharacter, got {other:?}"),
        }
    }

    #[test]
    fn rejects_a_short_row() {
        let input = "5 3 . . 7\n";
        match parse_grid(Cursor::new(input)) {
            Err(ParseError::WrongRowLength { line: 1, len: 5 }) => {}
            other => panic!("expected WrongRowLength, got {other:?}"),
        }
    }

    #[test]
    fn rejects_a_long_row() {
        let input = "5 3 . . 7 . . . . 1\n";
        match parse_grid(Cursor::new(input)) {
            Err(ParseError::WrongRowLength { line: 1, len: 10 }) => {}
            other => panic!("expected WrongRowLength, got {other:?}"),
        }
    }

    #[test]
    fn rejects_too_few_rows() {
        let input = "530070000\n600195000\n";
        match parse_grid(Cursor::new(input)) {
            Err(ParseError::WrongRowCount(2)) => {}
            other => panic!("expected WrongRowCount, got {other:?}"),
        }
    }

    #[test]
    fn rejects_too_many_rows() {
        let input = format!("{EXAMPLE_LINES}530070000\n");
        match parse_grid(Cursor::new(input.as_bytes())) {
            Err(ParseError::WrongRowCount(10)) => {}
            other => panic!("expected WrongRowCount, got {other:?}"),
        }
    }

    #[test]
    fn rejects_a_bad_character_in_the_exchange_form() {
        let mut input = String::from(EXAMPLE_COMPACT);
        input.replace_range(4..5, "x");
        match parse_str(&input) {
            Err(ParseError::BadCharacter { line: 1, found: 'x' }) => {}
            other => panic!("expected BadCharacter, got {other:?}"),
        }
    }

    #[test]
    fn parse_error_messages_name_the_problem() {
        let err = ParseError::WrongRowCount(2);
        assert_eq!(err.to_string(), "expected 9 rows, found 2");

        let err = ParseError::BadCharacter { line: 3, found: 'x' };
        assert_eq!(err.to_string(), "line 3: invalid cell character 'x'");
    }
}
