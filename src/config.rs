use std::fmt::{self, Display, Formatter};

/// Text encodings a puzzle can be read from and printed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Width/height header followed by numeric cell symbols.
    Numeric,
    /// The common `#`/`@`/`$`/`.` board text.
    Xsb,
}

/// How successors are scored before entering the frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Heuristic only, the default.
    Greedy,
    /// Depth plus heuristic.
    AStar,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Strategy::Greedy => write!(f, "greedy"),
            Strategy::AStar => write!(f, "a-star"),
        }
    }
}
