// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]

pub mod config;
pub mod data;
pub mod fs;
pub mod heuristic;
pub mod map_formatter;
pub mod moves;
pub mod parser;
pub mod solver;
pub mod state;

mod vec2d;

use std::error::Error;

use crate::config::Strategy;
use crate::solver::SolverOk;
use crate::state::BoardState;

/// Reads a puzzle file, auto-detects the format and parses it.
pub trait LoadPuzzle {
    fn load_puzzle(&self) -> Result<BoardState, Box<dyn Error>>;
}

impl LoadPuzzle for str {
    fn load_puzzle(&self) -> Result<BoardState, Box<dyn Error>> {
        let text = fs::read_file(self)?;
        let state = text.parse::<BoardState>()?;
        Ok(state)
    }
}

/// Runs the search with the given frontier-ordering strategy.
pub trait Solve {
    fn solve(&self, strategy: Strategy, print_status: bool) -> SolverOk;
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::Strategy::{self, AStar, Greedy};

    #[test]
    fn test_levels() {
        // level file, strategy, expected solution (None = unsolvable)
        let levels: &[(&str, Strategy, Option<&str>)] = &[
            ("levels/one-way.txt", Greedy, Some("U")),
            ("levels/one-way-xsb.txt", Greedy, Some("U")),
            ("levels/walkabout.txt", Greedy, Some("U, L, D")),
            ("levels/walkabout.txt", AStar, Some("U, L, D")),
            ("levels/no-solution.txt", Greedy, None),
            ("levels/no-solution.txt", AStar, None),
        ];

        for &(path, strategy, expected) in levels {
            let state = path.load_puzzle().unwrap();
            let result = state.solve(strategy, false);
            assert_eq!(
                result.moves.map(|m| m.to_string()),
                expected.map(str::to_string),
                "level {} using {}",
                path,
                strategy,
            );
        }
    }

    #[test]
    fn load_missing_file() {
        assert!("levels/does-not-exist.txt".load_puzzle().is_err());
    }

    #[test]
    fn load_garbage() {
        // parse errors surface through the same boundary as I/O errors
        assert!("Cargo.toml".load_puzzle().is_err());
    }
}
