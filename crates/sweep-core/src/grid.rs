//! The candidate grid: a fixed-size square board of candidate sets.

use crate::CandidateSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}C{}", self.row + 1, self.col + 1)
    }
}

/// An elimination hit a cell already pinned to the digit being removed,
/// which is the deferred form of "removal would empty the candidate set".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contradiction {
    pub pos: Position,
    pub value: u8,
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "eliminating digit {} would empty the cell at {}",
            self.value, self.pos
        )
    }
}

impl std::error::Error for Contradiction {}

/// Errors from grid construction, population and elimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Side length is not a perfect square within the supported range.
    InvalidSize { size: usize },
    /// Row, column or digit outside the board.
    OutOfRange { pos: Position, value: Option<u8> },
    /// See [`Contradiction`].
    Contradiction(Contradiction),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidSize { size } => {
                write!(
                    f,
                    "board side {size} is not a perfect square between 1 and {}",
                    Grid::MAX_SIZE
                )
            }
            GridError::OutOfRange { pos, value: Some(v) } => {
                write!(f, "digit {v} at {pos} is out of range")
            }
            GridError::OutOfRange { pos, value: None } => {
                write!(f, "{pos} is outside the board")
            }
            GridError::Contradiction(c) => write!(f, "{c}"),
        }
    }
}

impl std::error::Error for GridError {}

impl From<Contradiction> for GridError {
    fn from(c: Contradiction) -> Self {
        GridError::Contradiction(c)
    }
}

/// A square board of `size * size` cells, each holding a candidate set.
///
/// The grid owns its cells outright and exposes only candidate-preserving
/// operations, so a cell's set can never be observed empty: population
/// replaces a set wholesale and elimination refuses to touch a resolved
/// cell. The box side `k = sqrt(size)` is computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    box_size: usize,
    cells: Vec<CandidateSet>,
}

impl Grid {
    /// Largest supported side length (bounded by the candidate bitmask).
    pub const MAX_SIZE: usize = CandidateSet::MAX_DIGIT as usize;

    /// Create a blank grid: every cell holds the full set `{1..=size}`.
    ///
    /// `size` must be a perfect square no larger than [`Grid::MAX_SIZE`].
    pub fn new(size: usize) -> Result<Self, GridError> {
        if size == 0 || size > Self::MAX_SIZE {
            return Err(GridError::InvalidSize { size });
        }
        let box_size = (1..=size)
            .find(|k| k * k == size)
            .ok_or(GridError::InvalidSize { size })?;
        Ok(Grid {
            size,
            box_size,
            cells: vec![CandidateSet::full(size); size * size],
        })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Side length of one sub-box.
    pub fn box_size(&self) -> usize {
        self.box_size
    }

    fn index(&self, pos: Position) -> Result<usize, GridError> {
        if pos.row < self.size && pos.col < self.size {
            Ok(pos.row * self.size + pos.col)
        } else {
            Err(GridError::OutOfRange { pos, value: None })
        }
    }

    /// Populate one cell: `Some(v)` pins it to `{v}`, `None` resets it to
    /// the full candidate set.
    pub fn set_cell(&mut self, pos: Position, value: Option<u8>) -> Result<(), GridError> {
        let idx = self.index(pos)?;
        self.cells[idx] = match value {
            Some(v) => {
                if v == 0 || v as usize > self.size {
                    return Err(GridError::OutOfRange { pos, value: Some(v) });
                }
                CandidateSet::singleton(v)
            }
            None => CandidateSet::full(self.size),
        };
        Ok(())
    }

    /// True when the cell's candidate set has exactly one member.
    pub fn is_resolved(&self, pos: Position) -> Result<bool, GridError> {
        Ok(self.cells[self.index(pos)?].is_singleton())
    }

    /// The assigned digit of a resolved cell, `None` while blank.
    pub fn value(&self, pos: Position) -> Result<Option<u8>, GridError> {
        Ok(self.cells[self.index(pos)?].sole_value())
    }

    /// Read-only view of the cell's candidate set.
    pub fn candidates(&self, pos: Position) -> Result<CandidateSet, GridError> {
        Ok(self.cells[self.index(pos)?])
    }

    /// Remove `value` from the cell's candidate set.
    ///
    /// A resolved cell is left untouched: a placed digit is never erased by
    /// peer propagation. When the cell is pinned to exactly `{value}` there
    /// is nothing left to remove safely and the call reports a
    /// [`Contradiction`] instead. Returns whether the set changed.
    pub fn remove_candidate(&mut self, pos: Position, value: u8) -> Result<bool, GridError> {
        self.index(pos)?;
        if value == 0 || value as usize > self.size {
            return Err(GridError::OutOfRange { pos, value: Some(value) });
        }
        self.eliminate_at(pos, value).map_err(GridError::from)
    }

    /// Elimination fast path for in-bounds positions.
    pub(crate) fn eliminate_at(&mut self, pos: Position, value: u8) -> Result<bool, Contradiction> {
        debug_assert!(pos.row < self.size && pos.col < self.size);
        let cell = &mut self.cells[pos.row * self.size + pos.col];
        if let Some(v) = cell.sole_value() {
            if v == value {
                return Err(Contradiction { pos, value });
            }
            // Placed digits are never erased by their peers.
            return Ok(false);
        }
        Ok(cell.remove(value))
    }

    /// Resolved-cell fast path for in-bounds positions.
    pub(crate) fn value_at(&self, pos: Position) -> Option<u8> {
        debug_assert!(pos.row < self.size && pos.col < self.size);
        self.cells[pos.row * self.size + pos.col].sole_value()
    }

    /// True when every cell is resolved.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(CandidateSet::is_singleton)
    }

    /// Total candidates over all cells. Non-increasing across sweeps and
    /// bounded below by the cell count, which is what bounds the solve loop.
    pub fn candidate_count(&self) -> usize {
        self.cells.iter().map(CandidateSet::len).sum()
    }

    /// Number of resolved cells.
    pub fn resolved_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_singleton()).count()
    }

    /// Number of blank cells.
    pub fn blank_count(&self) -> usize {
        self.size * self.size - self.resolved_count()
    }

    /// Iterate all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, CandidateSet)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, set)| (Position::new(idx / self.size, idx % self.size), *set))
    }
}

/// Framed text rendering: a digit per resolved cell, a space per blank,
/// `|` between boxes and a `---+---+---` rule between box rows. Only
/// boards with single-character digits (side <= 9) render aligned.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let k = self.box_size;
        for row in 0..self.size {
            for col in 0..self.size {
                match self.cells[row * self.size + col].sole_value() {
                    Some(v) => write!(f, "{v}")?,
                    None => write!(f, " ")?,
                }
                if (col + 1) % k == 0 && col + 1 < self.size {
                    write!(f, "|")?;
                }
            }
            writeln!(f)?;
            if (row + 1) % k == 0 && row + 1 < self.size {
                for b in 0..k {
                    if b > 0 {
                        write!(f, "+")?;
                    }
                    for _ in 0..k {
                        write!(f, "-")?;
                    }
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_blank_grid() {
        let grid = Grid::new(9).unwrap();
        assert_eq!(grid.size(), 9);
        assert_eq!(grid.box_size(), 3);
        assert_eq!(grid.candidate_count(), 81 * 9);
        assert_eq!(grid.resolved_count(), 0);
        assert_eq!(grid.blank_count(), 81);
        assert!(!grid.is_complete());
    }

    #[test]
    fn test_invalid_sizes() {
        for size in [0, 2, 3, 8, 10, 15, 24, 36] {
            assert_eq!(
                Grid::new(size),
                Err(GridError::InvalidSize { size }),
                "size {size} should be rejected"
            );
        }
        for (size, k) in [(1, 1), (4, 2), (9, 3), (16, 4), (25, 5)] {
            assert_eq!(Grid::new(size).unwrap().box_size(), k);
        }
    }

    #[test]
    fn test_set_cell() {
        let mut grid = Grid::new(9).unwrap();
        let pos = Position::new(2, 7);
        grid.set_cell(pos, Some(4)).unwrap();
        assert!(grid.is_resolved(pos).unwrap());
        assert_eq!(grid.value(pos).unwrap(), Some(4));
        assert_eq!(grid.candidates(pos).unwrap().len(), 1);

        grid.set_cell(pos, None).unwrap();
        assert!(!grid.is_resolved(pos).unwrap());
        assert_eq!(grid.value(pos).unwrap(), None);
        assert_eq!(grid.candidates(pos).unwrap().len(), 9);
    }

    #[test]
    fn test_set_cell_out_of_range() {
        let mut grid = Grid::new(9).unwrap();
        let inside = Position::new(0, 0);
        let outside = Position::new(9, 0);
        assert_eq!(
            grid.set_cell(outside, Some(1)),
            Err(GridError::OutOfRange { pos: outside, value: None })
        );
        for bad in [0, 10] {
            assert_eq!(
                grid.set_cell(inside, Some(bad)),
                Err(GridError::OutOfRange { pos: inside, value: Some(bad) })
            );
        }
    }

    #[test]
    fn test_remove_candidate() {
        let mut grid = Grid::new(9).unwrap();
        let pos = Position::new(4, 4);
        assert!(grid.remove_candidate(pos, 3).unwrap());
        assert!(!grid.remove_candidate(pos, 3).unwrap());
        assert_eq!(grid.candidates(pos).unwrap().len(), 8);
        assert_eq!(grid.candidate_count(), 81 * 9 - 1);
    }

    #[test]
    fn test_remove_candidate_resolved_guard() {
        let mut grid = Grid::new(9).unwrap();
        let pos = Position::new(0, 0);
        grid.set_cell(pos, Some(5)).unwrap();

        // A different digit is a silent no-op on a placed cell.
        assert!(!grid.remove_candidate(pos, 3).unwrap());
        assert_eq!(grid.value(pos).unwrap(), Some(5));

        // The placed digit itself is the contradiction boundary; the cell
        // is left untouched.
        assert_eq!(
            grid.remove_candidate(pos, 5),
            Err(GridError::Contradiction(Contradiction { pos, value: 5 }))
        );
        assert_eq!(grid.value(pos).unwrap(), Some(5));
    }

    #[test]
    fn test_candidate_sets_never_empty() {
        let mut grid = Grid::new(4).unwrap();
        let pos = Position::new(1, 1);
        for v in [1, 2, 3] {
            assert!(grid.remove_candidate(pos, v).unwrap());
        }
        // Down to {4}: now resolved, so the last candidate is protected.
        assert_eq!(grid.value(pos).unwrap(), Some(4));
        assert!(grid.remove_candidate(pos, 4).is_err());
        assert!(!grid.candidates(pos).unwrap().is_empty());
    }

    #[test]
    fn test_is_complete() {
        let mut grid = Grid::new(4).unwrap();
        for row in 0..4 {
            for col in 0..4 {
                let v = ((row * 2 + row / 2 + col) % 4 + 1) as u8;
                grid.set_cell(Position::new(row, col), Some(v)).unwrap();
            }
        }
        assert!(grid.is_complete());
        assert_eq!(grid.candidate_count(), 16);

        grid.set_cell(Position::new(3, 3), None).unwrap();
        assert!(!grid.is_complete());
        assert_eq!(grid.blank_count(), 1);
    }

    #[test]
    fn test_display_framed() {
        let mut grid = Grid::new(4).unwrap();
        grid.set_cell(Position::new(0, 0), Some(1)).unwrap();
        grid.set_cell(Position::new(0, 3), Some(4)).unwrap();
        grid.set_cell(Position::new(2, 1), Some(3)).unwrap();
        grid.set_cell(Position::new(3, 2), Some(2)).unwrap();
        let expected = "1 | 4\n  |  \n--+--\n 3|  \n  |2 \n";
        assert_eq!(grid.to_string(), expected);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut grid = Grid::new(9).unwrap();
        grid.set_cell(Position::new(0, 0), Some(5)).unwrap();
        grid.remove_candidate(Position::new(8, 8), 2).unwrap();

        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
