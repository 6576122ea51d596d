//! Text-format collaborators: framed puzzle files and compact digit lines.
//!
//! The framed format is the puzzle-file layout: one character slot per
//! cell, a digit for a given, a space for a blank, with `|`, `-` and `+`
//! allowed anywhere as purely decorative framing. The compact format is a
//! single line of one character per cell in row-major order. Both are
//! limited to single-character digits, so boards with sides above 9 are
//! constructible through the API only.

use crate::{Grid, GridError, Position};
use std::fmt;

/// Error from parsing a puzzle text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    Grid(GridError),
    /// A character that is neither a digit, a space, nor decoration.
    UnexpectedCharacter { row: usize, col: usize, ch: char },
    /// More content rows than the board has.
    TooManyRows { size: usize },
    /// A compact line whose character count is not the cell count.
    BadLength { expected: usize, actual: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Grid(e) => write!(f, "{e}"),
            ParseError::UnexpectedCharacter { row, col, ch } => {
                write!(
                    f,
                    "unexpected character {ch:?} at row {}, column {}",
                    row + 1,
                    col + 1
                )
            }
            ParseError::TooManyRows { size } => {
                write!(f, "more than {size} rows of puzzle content")
            }
            ParseError::BadLength { expected, actual } => {
                write!(f, "expected {expected} cell characters, found {actual}")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ParseError {
    fn from(e: GridError) -> Self {
        ParseError::Grid(e)
    }
}

/// Characters used purely for visual framing.
fn is_decoration(ch: char) -> bool {
    matches!(ch, '|' | '-' | '+')
}

/// Parse the framed format.
///
/// Decoration characters are stripped first, so they never shift column
/// alignment; a line that is empty after stripping is a separator and does
/// not advance the row counter, while a line of only spaces is a content
/// row of blanks. In a content line, each remaining character's index is
/// its column: a digit is a given, a space a blank. Short lines leave
/// their trailing cells blank.
pub fn parse(input: &str, size: usize) -> Result<Grid, ParseError> {
    let mut grid = Grid::new(size)?;
    let mut row = 0;
    let mut in_content = false;
    for line in input.lines() {
        let stripped: String = line.chars().filter(|ch| !is_decoration(*ch)).collect();
        // Separator status is decided before trimming: a row of all-blank
        // cells strips to spaces, which is content and advances the row.
        if stripped.is_empty() {
            continue;
        }
        if in_content {
            row += 1;
        } else {
            in_content = true;
        }
        if row >= size {
            return Err(ParseError::TooManyRows { size });
        }
        for (col, ch) in stripped.trim_end().chars().enumerate() {
            match ch {
                ' ' => grid.set_cell(Position::new(row, col), None)?,
                ch if ch.is_ascii_digit() => {
                    grid.set_cell(Position::new(row, col), Some(ch as u8 - b'0'))?;
                }
                ch => return Err(ParseError::UnexpectedCharacter { row, col, ch }),
            }
        }
    }
    Ok(grid)
}

/// Parse the compact single-line format: one character per cell in
/// row-major order, with `0` or `.` for a blank.
pub fn parse_line(input: &str, size: usize) -> Result<Grid, ParseError> {
    let mut grid = Grid::new(size)?;
    let chars: Vec<char> = input.trim().chars().collect();
    if chars.len() != size * size {
        return Err(ParseError::BadLength {
            expected: size * size,
            actual: chars.len(),
        });
    }
    for (idx, ch) in chars.into_iter().enumerate() {
        let pos = Position::new(idx / size, idx % size);
        match ch {
            '0' | '.' => {} // blank cells already hold the full set
            ch if ch.is_ascii_digit() => grid.set_cell(pos, Some(ch as u8 - b'0'))?,
            ch => {
                return Err(ParseError::UnexpectedCharacter {
                    row: pos.row,
                    col: pos.col,
                    ch,
                })
            }
        }
    }
    Ok(grid)
}

/// Render the compact format; blank cells become `0`.
pub fn to_line(grid: &Grid) -> String {
    debug_assert!(grid.size() <= 9);
    grid.cells()
        .map(|(_, set)| match set.sole_value() {
            Some(v) => (b'0' + v) as char,
            None => '0',
        })
        .collect()
}
