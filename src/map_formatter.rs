use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::data::{CellFlags, Pos};
use crate::state::BoardState;

/// Renders a board state in a chosen text format.
///
/// The numeric output mirrors the parser's symbol table row by row (the
/// width/height header is the loader's concern, not the board's). The XSB
/// output drops trailing empty cells so it matches the level strings tests
/// are written with.
pub struct MapFormatter<'a> {
    state: &'a BoardState,
    format: Format,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(state: &'a BoardState, format: Format) -> Self {
        Self { state, format }
    }

    fn write_to_formatter(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let board = self.state.board();
        for r in 0..board.rows() {
            let cols = match self.format {
                Format::Numeric => board.cols(),
                Format::Xsb => last_non_empty(self.state, r) + 1,
            };
            for c in 0..cols {
                let cell = board[Pos::new(r, c)];
                match self.format {
                    Format::Numeric => Self::write_cell_numeric(cell, f)?,
                    Format::Xsb => Self::write_cell_xsb(cell, f)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_cell_numeric(cell: CellFlags, f: &mut Formatter<'_>) -> fmt::Result {
        if cell.contains(CellFlags::WALL) {
            write!(f, "-1")
        } else if cell.contains(CellFlags::PLAYER_ON_GOAL) {
            write!(f, " 3")
        } else if cell.contains(CellFlags::PLAYER) {
            write!(f, "3")
        } else if cell.contains(CellFlags::BOX_ON_GOAL) {
            write!(f, "l")
        } else if cell.contains(CellFlags::BOX) {
            write!(f, "1")
        } else if cell.contains(CellFlags::GOAL) {
            write!(f, "2")
        } else {
            write!(f, "0")
        }
    }

    fn write_cell_xsb(cell: CellFlags, f: &mut Formatter<'_>) -> fmt::Result {
        let symbol = if cell.contains(CellFlags::WALL) {
            '#'
        } else if cell.contains(CellFlags::PLAYER_ON_GOAL) {
            '+'
        } else if cell.contains(CellFlags::PLAYER) {
            '@'
        } else if cell.contains(CellFlags::BOX_ON_GOAL) {
            '*'
        } else if cell.contains(CellFlags::BOX) {
            '$'
        } else if cell.contains(CellFlags::GOAL) {
            '.'
        } else {
            ' '
        };
        write!(f, "{}", symbol)
    }
}

// don't print trailing empty cells to match the input level strings
fn last_non_empty(state: &BoardState, r: u8) -> u8 {
    let board = state.board();
    let mut last = 0;
    for c in 0..board.cols() {
        if board[Pos::new(r, c)] != CellFlags::EMPTY {
            last = c;
        }
    }
    last
}

impl Display for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_to_formatter(f)
    }
}

impl Debug for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Format;
    use crate::parser;
    use crate::state::BoardState;

    #[test]
    fn formatting_xsb() {
        let level = r"
#####
#+$.#
# * #
#####
"
        .trim_start_matches('\n');
        let state: BoardState = level.parse().unwrap();
        assert_eq!(state.xsb().to_string(), level);
        assert_eq!(state.to_string(), level);
        assert_eq!(format!("{:?}", state), level);
    }

    #[test]
    fn formatting_xsb_ragged_rows() {
        // the last row is short - padding must not leak into the output
        let level = r"
####
#@.#
###
"
        .trim_start_matches('\n');
        let state: BoardState = level.parse().unwrap();
        assert_eq!(state.to_string(), level);
    }

    #[test]
    fn formatting_numeric() {
        let level = "
6
3
-1-1-1-1-1-1
-1 31l0-1
-1-1-1-1-1-1
";
        let state = parser::parse(level, Format::Numeric).unwrap();
        let expected = "\
-1-1-1-1-1-1
-1 31l0-1
-1-1-1-1-1-1
";
        assert_eq!(state.numeric().to_string(), expected);
    }

    #[test]
    fn numeric_round_trips_through_parser() {
        let level = "
5
5
-1-1-1-1-1
-1000-1
-1013-1
-1020-1
-1-1-1-1-1
";
        let state = parser::parse(level, Format::Numeric).unwrap();
        let rendered = format!("5\n5\n{}", state.numeric());
        let reparsed = parser::parse(&rendered, Format::Numeric).unwrap();
        assert_eq!(state, reparsed);
    }

    #[test]
    fn both_formats_describe_the_same_board() {
        let numeric = "
3
5
-1-1-1
-12-1
-11-1
-13-1
-1-1-1
";
        let xsb = r"
###
#.#
#$#
#@#
###
";
        let a = parser::parse(numeric, Format::Numeric).unwrap();
        let b = parser::parse(xsb, Format::Xsb).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.xsb().to_string(), b.xsb().to_string());
        assert_eq!(a.numeric().to_string(), b.numeric().to_string());
    }
}
