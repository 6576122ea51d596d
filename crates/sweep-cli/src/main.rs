//! File-in, text-out driver for the elimination solver.

use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use sweep_core::{text, Grid, SolveOutcome, Solver};

/// Solve a Sudoku puzzle by candidate elimination.
#[derive(Parser)]
#[command(name = "sweep", version, about)]
struct Args {
    /// Path to the puzzle file
    puzzle: PathBuf,

    /// Board side length (must be a perfect square)
    #[arg(long, default_value_t = 9)]
    size: usize,

    /// Force the compact one-line format (N*N digits, 0 or . for a blank)
    #[arg(long)]
    line: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(SolveOutcome::Contradiction(_)) => ExitCode::from(2),
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<SolveOutcome, Box<dyn std::error::Error>> {
    let input = fs::read_to_string(&args.puzzle)?;
    let mut grid = parse_input(&input, args)?;

    println!("Unsolved board:");
    println!("{grid}");

    let report = Solver::new().solve_report(&mut grid);
    info!(
        "{} sweeps, {} eliminations",
        report.sweeps, report.eliminations
    );

    // The terminal grid state is printed whatever the outcome.
    println!("Result:");
    println!("{grid}");
    match report.outcome {
        SolveOutcome::Solved => println!("Solved in {} sweeps.", report.sweeps),
        SolveOutcome::Unresolved => println!(
            "Stalled after {} sweeps with {} cells unresolved; \
             elimination alone cannot finish this puzzle.",
            report.sweeps,
            grid.blank_count()
        ),
        SolveOutcome::Contradiction(c) => {
            println!("The givens are mutually inconsistent: {c}.")
        }
    }
    Ok(report.outcome)
}

fn parse_input(input: &str, args: &Args) -> Result<Grid, text::ParseError> {
    if args.line || looks_compact(input, args.size) {
        text::parse_line(input, args.size)
    } else {
        text::parse(input, args.size)
    }
}

/// A compact puzzle is a single content line of exactly N*N cell characters.
fn looks_compact(input: &str, size: usize) -> bool {
    let mut lines = input.lines().filter(|l| !l.trim().is_empty());
    match (lines.next(), lines.next()) {
        (Some(line), None) => line.trim().chars().count() == size * size,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::looks_compact;

    #[test]
    fn test_looks_compact() {
        let compact = "0".repeat(81);
        assert!(looks_compact(&compact, 9));
        assert!(looks_compact(&format!("\n{compact}\n"), 9));
        assert!(!looks_compact("53 | 7 |\n6  |195|\n", 9));
        assert!(!looks_compact(&"0".repeat(80), 9));
    }
}
