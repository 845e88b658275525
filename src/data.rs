use std::fmt::{self, Debug, Display, Formatter};
use std::ops::BitOr;

pub(crate) const MAX_SIZE: usize = 255;

/// Cell attributes as combinable bit flags.
///
/// A cell can carry more than one: `PLAYER | GOAL` when the player stands on
/// a goal, `BOX | GOAL` when a box has been pushed onto one. Walls never
/// combine with anything.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellFlags(u8);

impl CellFlags {
    pub const EMPTY: CellFlags = CellFlags(0);
    pub const PLAYER: CellFlags = CellFlags(1);
    pub const WALL: CellFlags = CellFlags(1 << 1);
    pub const BOX: CellFlags = CellFlags(1 << 2);
    pub const GOAL: CellFlags = CellFlags(1 << 3);

    pub const PLAYER_ON_GOAL: CellFlags = CellFlags(Self::PLAYER.0 | Self::GOAL.0);
    pub const BOX_ON_GOAL: CellFlags = CellFlags(Self::BOX.0 | Self::GOAL.0);

    pub fn contains(self, flags: CellFlags) -> bool {
        self.0 & flags.0 == flags.0
    }

    pub fn insert(&mut self, flags: CellFlags) {
        self.0 |= flags.0;
    }

    pub fn remove(&mut self, flags: CellFlags) {
        self.0 &= !flags.0;
    }
}

impl BitOr for CellFlags {
    type Output = CellFlags;

    fn bitor(self, rhs: CellFlags) -> CellFlags {
        CellFlags(self.0 | rhs.0)
    }
}

impl Debug for CellFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "EMPTY");
        }
        let names = [
            (CellFlags::PLAYER, "PLAYER"),
            (CellFlags::WALL, "WALL"),
            (CellFlags::BOX, "BOX"),
            (CellFlags::GOAL, "GOAL"),
        ];
        let mut delim = "";
        for &(flag, name) in &names {
            if self.contains(flag) {
                write!(f, "{}{}", delim, name)?;
                delim = "|";
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: u8,
    pub c: u8,
}

impl Pos {
    pub fn new(r: u8, c: u8) -> Pos {
        Pos { r, c }
    }

    /// Manhattan distance.
    pub fn dist(self, other: Pos) -> i32 {
        (i32::from(self.r) - i32::from(other.r)).abs()
            + (i32::from(self.c) - i32::from(other.c)).abs()
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.r, self.c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

/// Expansion enumerates directions in this order - it is part of the
/// deterministic exploration order, don't reorder.
pub const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

impl Dir {
    /// Row/column deltas of a single step.
    pub(crate) fn offset(self) -> (i32, i32) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Dir::Up => 'U',
            Dir::Right => 'R',
            Dir::Down => 'D',
            Dir::Left => 'L',
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
