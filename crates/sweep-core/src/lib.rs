//! Elimination-only Sudoku engine.
//!
//! A puzzle is loaded into a [`Grid`] of per-cell candidate sets and driven
//! to a fixed point by [`Solver`]: every resolved cell repeatedly knocks its
//! digit out of the candidate sets of its row, column and box peers. There
//! is no search or backtracking; a puzzle that needs more than propagation
//! terminates as [`SolveOutcome::Unresolved`] with the partial grid intact.

mod grid;
mod set;
mod solver;
pub mod text;

pub use grid::{Contradiction, Grid, GridError, Position};
pub use set::CandidateSet;
pub use solver::{SolveOutcome, SolveReport, Solver};
