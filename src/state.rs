use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::config::Format;
use crate::data::{CellFlags, Dir, Pos};
use crate::map_formatter::MapFormatter;
use crate::vec2d::Vec2d;

/// One configuration of the puzzle: the full grid plus where the player and
/// the boxes currently are.
///
/// A value, not an object: applying a move produces a new state with its own
/// copy of the grid and its own box list, the source state is never touched.
/// The only write after construction is the single cost assignment from the
/// scoring step.
///
/// The grid is authoritative. `boxes` is a derived cache kept consistent by
/// `apply_move` and deliberately excluded from equality - two states are
/// equal iff their grids, goals and player positions are.
#[derive(Clone)]
pub struct BoardState {
    board: Vec2d<CellFlags>,
    player: Pos,
    // shared across all states of one search, goals never move
    goals: Rc<Vec<Pos>>,
    boxes: Vec<Pos>,
    direction_taken: Option<Dir>,
    cost: i32,
}

impl BoardState {
    pub(crate) fn new(
        board: Vec2d<CellFlags>,
        player: Pos,
        goals: Rc<Vec<Pos>>,
        boxes: Vec<Pos>,
    ) -> Self {
        BoardState {
            board,
            player,
            goals,
            boxes,
            direction_taken: None,
            cost: 0,
        }
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn goals(&self) -> &[Pos] {
        &self.goals
    }

    pub fn boxes(&self) -> &[Pos] {
        &self.boxes
    }

    /// The move that produced this state, `None` for the initial one.
    pub fn direction_taken(&self) -> Option<Dir> {
        self.direction_taken
    }

    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Assigned by the expansion policy before the state enters the
    /// frontier. Never affects equality or hashing.
    pub fn set_cost(&mut self, cost: i32) {
        self.cost = cost;
    }

    pub(crate) fn board(&self) -> &Vec2d<CellFlags> {
        &self.board
    }

    /// Whether the player can take one step in `dir`: the cell ahead must
    /// not be a wall, and a box ahead must have a free cell behind it.
    /// Pure - never mutates.
    pub fn can_move(&self, dir: Dir) -> bool {
        let (dr, dc) = dir.offset();
        let (r, c) = (i32::from(self.player.r) + dr, i32::from(self.player.c) + dc);

        let ahead = self.flags_at(r, c);
        if ahead.contains(CellFlags::BOX) {
            // a box can't be pushed into a wall or another box
            let behind = self.flags_at(r + dr, c + dc);
            !behind.contains(CellFlags::WALL) && !behind.contains(CellFlags::BOX)
        } else {
            !ahead.contains(CellFlags::WALL)
        }
    }

    /// Produces the successor state one step in `dir`, pushing a box if one
    /// is ahead. Calling this when `can_move(dir)` is false is a bug in the
    /// caller, not a runtime condition, and fails loudly.
    pub fn apply_move(&self, dir: Dir) -> BoardState {
        assert!(self.can_move(dir), "apply_move in a blocked direction: {}", dir);

        let (dr, dc) = dir.offset();
        let (r, c) = (i32::from(self.player.r) + dr, i32::from(self.player.c) + dc);
        let new_player = Pos::new(r as u8, c as u8);

        let mut board = self.board.clone();
        board[self.player].remove(CellFlags::PLAYER);
        board[new_player].insert(CellFlags::PLAYER);

        // fresh copy for every successor, box lists are never aliased
        let mut boxes = self.boxes.clone();
        if board[new_player].contains(CellFlags::BOX) {
            let box_dest = Pos::new((r + dr) as u8, (c + dc) as u8);
            board[new_player].remove(CellFlags::BOX);
            board[box_dest].insert(CellFlags::BOX);
            for b in &mut boxes {
                if *b == new_player {
                    *b = box_dest;
                }
            }
        }

        BoardState {
            board,
            player: new_player,
            goals: Rc::clone(&self.goals),
            boxes,
            direction_taken: Some(dir),
            cost: 0,
        }
    }

    /// Solved means every goal cell also carries a box. A puzzle without
    /// goals is trivially solved.
    pub fn is_solved(&self) -> bool {
        self.goals
            .iter()
            .all(|&g| self.board[g].contains(CellFlags::BOX_ON_GOAL))
    }

    pub fn numeric(&self) -> MapFormatter<'_> {
        MapFormatter::new(self, Format::Numeric)
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        MapFormatter::new(self, Format::Xsb)
    }

    pub fn format(&self, format: Format) -> MapFormatter<'_> {
        MapFormatter::new(self, format)
    }

    /// Out-of-bounds coordinates act like wall so an unfenced board can't
    /// be walked (or index) out of.
    fn flags_at(&self, r: i32, c: i32) -> CellFlags {
        if r < 0
            || c < 0
            || r >= i32::from(self.board.rows())
            || c >= i32::from(self.board.cols())
        {
            CellFlags::WALL
        } else {
            self.board[Pos::new(r as u8, c as u8)]
        }
    }
}

impl PartialEq for BoardState {
    fn eq(&self, other: &Self) -> bool {
        // boxes are implied by the board, cost and direction are bookkeeping
        self.player == other.player && self.goals == other.goals && self.board == other.board
    }
}

impl Eq for BoardState {}

impl Hash for BoardState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
        self.goals.hash(state);
        self.player.hash(state);
    }
}

impl Display for BoardState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for BoardState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}
