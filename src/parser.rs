use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;
use std::str::FromStr;

use crate::config::Format;
use crate::data::{CellFlags, Pos, MAX_SIZE};
use crate::state::BoardState;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Dimensions,
    TooLarge,
    Symbol(usize, usize),
    NoPlayer,
    MultiplePlayers,
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Dimensions => write!(f, "Missing or invalid width/height header"),
            ParserErr::TooLarge => write!(f, "Board larger than 255 rows/columns"),
            ParserErr::Symbol(r, c) => write!(f, "Invalid symbol at pos: [{}, {}]", r, c),
            ParserErr::NoPlayer => write!(f, "No player"),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
        }
    }
}

impl Error for ParserErr {}

/// Symbol table of the numeric format. Passed to the tokenizer explicitly
/// instead of living in hidden global state.
const NUMERIC_SYMBOLS: [(&str, CellFlags); 7] = [
    ("-1", CellFlags::WALL),
    ("2", CellFlags::GOAL),
    ("3", CellFlags::PLAYER),
    (" 3", CellFlags::PLAYER_ON_GOAL),
    ("1", CellFlags::BOX),
    ("l", CellFlags::BOX_ON_GOAL),
    ("0", CellFlags::EMPTY),
];

impl FromStr for BoardState {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s, detect_format(s))
    }
}

/// A first line that parses as an integer can only be the width header of
/// the numeric format.
pub fn detect_format(input: &str) -> Format {
    match input.trim_matches('\n').lines().next() {
        Some(first) if first.trim().parse::<usize>().is_ok() => Format::Numeric,
        _ => Format::Xsb,
    }
}

pub fn parse(input: &str, format: Format) -> Result<BoardState, ParserErr> {
    match format {
        Format::Numeric => parse_numeric(input, &NUMERIC_SYMBOLS),
        Format::Xsb => parse_xsb(input),
    }
}

struct Collected {
    grid: Vec<Vec<CellFlags>>,
    player: Option<Pos>,
    goals: Vec<Pos>,
    boxes: Vec<Pos>,
}

impl Collected {
    fn new() -> Self {
        Collected {
            grid: Vec::new(),
            player: None,
            goals: Vec::new(),
            boxes: Vec::new(),
        }
    }

    fn record(&mut self, pos: Pos, flags: CellFlags) -> Result<(), ParserErr> {
        if flags.contains(CellFlags::PLAYER) {
            if self.player.is_some() {
                return Err(ParserErr::MultiplePlayers);
            }
            self.player = Some(pos);
        }
        if flags.contains(CellFlags::GOAL) {
            self.goals.push(pos);
        }
        if flags.contains(CellFlags::BOX) {
            self.boxes.push(pos);
        }
        Ok(())
    }

    fn into_state(self) -> Result<BoardState, ParserErr> {
        let player = self.player.ok_or(ParserErr::NoPlayer)?;
        Ok(BoardState::new(
            Vec2d::new(&self.grid),
            player,
            Rc::new(self.goals),
            self.boxes,
        ))
    }
}

/// Parses the numeric format: first line width, second line height, then one
/// row per line.
///
/// Tokenization is asymmetric: a minus sign opens a two-character token
/// (`-1`, wall), a space followed by `3` is the two-character
/// player-on-goal token, everything else is a single character. Rows
/// shorter than the width are padded with empty cells, input beyond the
/// declared height is ignored.
fn parse_numeric(input: &str, symbols: &[(&str, CellFlags)]) -> Result<BoardState, ParserErr> {
    let input = input.trim_matches('\n');
    let mut lines = input.lines();

    let width = read_dimension(lines.next())?;
    let height = read_dimension(lines.next())?;
    if width > MAX_SIZE || height > MAX_SIZE {
        return Err(ParserErr::TooLarge);
    }

    let mut collected = Collected::new();
    collected.grid = vec![vec![CellFlags::EMPTY; width]; height];

    for (r, line) in lines.take(height).enumerate() {
        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;
        let mut c = 0;
        while c < width && i < chars.len() {
            let len = if chars[i] == '-' || (chars[i] == ' ' && chars.get(i + 1) == Some(&'3')) {
                2
            } else {
                1
            };
            let end = (i + len).min(chars.len());
            let token: String = chars[i..end].iter().collect();

            let flags = lookup(symbols, &token).ok_or(ParserErr::Symbol(r, c))?;
            collected.grid[r][c] = flags;
            collected.record(Pos::new(r as u8, c as u8), flags)?;

            i = end;
            c += 1;
        }
    }

    collected.into_state()
}

fn read_dimension(line: Option<&str>) -> Result<usize, ParserErr> {
    let dim = line
        .and_then(|l| l.trim().parse().ok())
        .ok_or(ParserErr::Dimensions)?;
    if dim == 0 {
        return Err(ParserErr::Dimensions);
    }
    Ok(dim)
}

fn lookup(symbols: &[(&str, CellFlags)], token: &str) -> Option<CellFlags> {
    symbols
        .iter()
        .find(|&&(symbol, _)| symbol == token)
        .map(|&(_, flags)| flags)
}

/// Parses (a subset of) the XSB level format.
fn parse_xsb(input: &str) -> Result<BoardState, ParserErr> {
    // trim so levels are easy to write as raw strings
    let input = input.trim_matches('\n').trim_end();

    let mut collected = Collected::new();

    for (r, line) in input.lines().enumerate() {
        if r >= MAX_SIZE {
            return Err(ParserErr::TooLarge);
        }
        let mut row = Vec::new();
        for (c, cur_char) in line.chars().enumerate() {
            if c >= MAX_SIZE {
                return Err(ParserErr::TooLarge);
            }
            let flags = match cur_char {
                '#' => CellFlags::WALL,
                '@' => CellFlags::PLAYER,
                '+' => CellFlags::PLAYER_ON_GOAL,
                '$' => CellFlags::BOX,
                '*' => CellFlags::BOX_ON_GOAL,
                '.' => CellFlags::GOAL,
                ' ' | '-' | '_' => CellFlags::EMPTY,
                _ => return Err(ParserErr::Symbol(r, c)),
            };
            collected.record(Pos::new(r as u8, c as u8), flags)?;
            row.push(flags);
        }
        collected.grid.push(row);
    }

    collected.into_state()
}
