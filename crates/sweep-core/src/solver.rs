//! Elimination solver: constraint propagation to a fixed point, no search.

use crate::{Contradiction, Grid, Position};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal outcome of a solve run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// Every cell resolved.
    Solved,
    /// Fixed point reached with blank cells remaining: elimination alone
    /// was insufficient. A valid terminal state, not an error.
    Unresolved,
    /// Propagation hit mutually inconsistent digits; the grid is left
    /// exactly as it was at the point of detection.
    Contradiction(Contradiction),
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved)
    }
}

impl fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveOutcome::Solved => write!(f, "solved"),
            SolveOutcome::Unresolved => write!(f, "not fully solvable by elimination"),
            SolveOutcome::Contradiction(c) => write!(f, "contradiction: {c}"),
        }
    }
}

/// Summary of a solve run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveReport {
    pub outcome: SolveOutcome,
    /// Full passes over the board, including the final fixed-point pass.
    pub sweeps: usize,
    /// Total candidates removed.
    pub eliminations: usize,
}

/// Stateless elimination solver.
///
/// Each sweep walks the board in row-major order; every cell that is
/// resolved at the moment it is visited knocks its digit out of the
/// candidate sets of its row, column and box peers. Eliminations are
/// applied in place, so progress made early in a sweep is visible to
/// cells visited later in the same sweep.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Drive `grid` to a fixed point and report the outcome.
    pub fn solve(&self, grid: &mut Grid) -> SolveOutcome {
        self.solve_report(grid).outcome
    }

    /// Like [`Solver::solve`], with sweep and elimination counts.
    pub fn solve_report(&self, grid: &mut Grid) -> SolveReport {
        let mut sweeps = 0;
        let mut eliminations = 0;
        loop {
            sweeps += 1;
            match self.sweep(grid) {
                Err(c) => {
                    trace!("sweep {sweeps}: {c}");
                    return SolveReport {
                        outcome: SolveOutcome::Contradiction(c),
                        sweeps,
                        eliminations,
                    };
                }
                Ok(0) => {
                    // A sweep that removes nothing can never make progress
                    // later; this is the fixed point.
                    let outcome = if grid.is_complete() {
                        SolveOutcome::Solved
                    } else {
                        SolveOutcome::Unresolved
                    };
                    debug!("fixed point after {sweeps} sweeps, {eliminations} eliminations");
                    return SolveReport { outcome, sweeps, eliminations };
                }
                Ok(removed) => {
                    debug!("sweep {sweeps}: removed {removed} candidates");
                    eliminations += removed;
                    if grid.is_complete() {
                        return SolveReport {
                            outcome: SolveOutcome::Solved,
                            sweeps,
                            eliminations,
                        };
                    }
                }
            }
        }
    }

    /// One full row-major pass; returns the number of candidates removed.
    pub fn sweep(&self, grid: &mut Grid) -> Result<usize, Contradiction> {
        let mut removed = 0;
        for row in 0..grid.size() {
            for col in 0..grid.size() {
                let pos = Position::new(row, col);
                let Some(value) = grid.value_at(pos) else {
                    continue;
                };
                removed += self.eliminate_row(grid, pos, value)?;
                removed += self.eliminate_col(grid, pos, value)?;
                removed += self.eliminate_box(grid, pos, value)?;
            }
        }
        Ok(removed)
    }

    fn eliminate_row(
        &self,
        grid: &mut Grid,
        src: Position,
        value: u8,
    ) -> Result<usize, Contradiction> {
        let mut removed = 0;
        for col in 0..grid.size() {
            if col == src.col {
                continue;
            }
            if grid.eliminate_at(Position::new(src.row, col), value)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn eliminate_col(
        &self,
        grid: &mut Grid,
        src: Position,
        value: u8,
    ) -> Result<usize, Contradiction> {
        let mut removed = 0;
        for row in 0..grid.size() {
            if row == src.row {
                continue;
            }
            if grid.eliminate_at(Position::new(row, src.col), value)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn eliminate_box(
        &self,
        grid: &mut Grid,
        src: Position,
        value: u8,
    ) -> Result<usize, Contradiction> {
        let k = grid.box_size();
        let top = (src.row / k) * k;
        let left = (src.col / k) * k;
        let mut removed = 0;
        for row in top..top + k {
            for col in left..left + k {
                if row == src.row && col == src.col {
                    continue;
                }
                if grid.eliminate_at(Position::new(row, col), value)? {
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }
}
