mod node;
mod stats;

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::{self, Debug, Formatter};

use fnv::{FnvHashMap, FnvHashSet};
use log::{debug, trace};

use crate::config::Strategy;
use crate::data::DIRECTIONS;
use crate::heuristic::{Heuristic, NearestGoal};
use crate::moves::Moves;
use crate::state::BoardState;
use crate::Solve;

use self::node::SearchNode;
pub use self::stats::Stats;

/// Result of a finished search.
///
/// `moves: None` means the frontier ran dry without reaching a solved
/// configuration - the puzzle is unsolvable. That is a normal outcome,
/// deliberately distinct from input errors which never reach the engine.
pub struct SolverOk {
    pub moves: Option<Moves>,
    pub stats: Stats,
}

impl SolverOk {
    fn new(moves: Option<Moves>, stats: Stats) -> Self {
        Self { moves, stats }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.moves {
            None => writeln!(f, "No solution")?,
            Some(ref moves) => writeln!(f, "{} moves: {}", moves.move_cnt(), moves)?,
        }
        write!(f, "{:?}", self.stats)
    }
}

/// Decides how freshly discovered states are scored and which of them enter
/// the frontier. The search loop never looks at costs itself - swapping the
/// policy changes the exploration order without touching the loop or the
/// state model.
pub trait ExpansionPolicy {
    /// Scores `successors` (all legal, none previously visited) discovered
    /// at `depth` and retains the ones to insert into the frontier.
    fn admit(&mut self, depth: u32, successors: &mut Vec<BoardState>);
}

/// Default policy: frontier ordered by heuristic score alone, every
/// successor admitted.
#[derive(Debug)]
pub struct GreedyExpansion<H: Heuristic> {
    heuristic: H,
}

impl<H: Heuristic> GreedyExpansion<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<H: Heuristic> ExpansionPolicy for GreedyExpansion<H> {
    fn admit(&mut self, _depth: u32, successors: &mut Vec<BoardState>) {
        for successor in successors.iter_mut() {
            let cost = self.heuristic.score(successor);
            successor.set_cost(cost);
        }
    }
}

/// Classic f = g + h ordering. Same engine, same heuristic, different
/// frontier order.
#[derive(Debug)]
pub struct AStarExpansion<H: Heuristic> {
    heuristic: H,
}

impl<H: Heuristic> AStarExpansion<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<H: Heuristic> ExpansionPolicy for AStarExpansion<H> {
    fn admit(&mut self, depth: u32, successors: &mut Vec<BoardState>) {
        for successor in successors.iter_mut() {
            let cost = depth as i32 + self.heuristic.score(successor);
            successor.set_cost(cost);
        }
    }
}

impl Solve for BoardState {
    fn solve(&self, strategy: Strategy, print_status: bool) -> SolverOk {
        solve(self, strategy, print_status)
    }
}

pub fn solve(initial: &BoardState, strategy: Strategy, print_status: bool) -> SolverOk {
    debug!("Solving using {}", strategy);
    match strategy {
        Strategy::Greedy => search(initial, &mut GreedyExpansion::new(NearestGoal), print_status),
        Strategy::AStar => search(initial, &mut AStarExpansion::new(NearestGoal), print_status),
    }
}

/// Best-first search from `initial` to any solved configuration.
///
/// Pops the cheapest frontier state, goal-tests it and asks the policy to
/// score its unvisited successors. A popped state that was already visited
/// still goes through the goal test and expansion - it only counts as a
/// duplicate sighting in the stats, its successors are all visited by then
/// and get filtered out.
pub fn search<P: ExpansionPolicy>(
    initial: &BoardState,
    policy: &mut P,
    print_status: bool,
) -> SolverOk {
    let mut stats = Stats::new();

    let mut to_visit = BinaryHeap::new();
    let mut visited = FnvHashSet::default();
    let mut prevs: FnvHashMap<BoardState, BoardState> = FnvHashMap::default();
    let mut seq = 0_u64;

    let start = SearchNode::new(initial.clone(), 0, seq);
    seq += 1;
    stats.add_created(&start);
    to_visit.push(Reverse(start));

    while let Some(Reverse(cur_node)) = to_visit.pop() {
        if visited.contains(&cur_node.state) {
            stats.add_reached_duplicate(&cur_node);
        } else if stats.add_unique_visited(&cur_node) && print_status {
            println!("Visited new depth: {}", cur_node.dist);
            println!("{:?}", stats);
        }
        visited.insert(cur_node.state.clone());

        trace!(
            "expanding depth {} cost {}:\n{}",
            cur_node.dist,
            cur_node.state.cost(),
            cur_node.state
        );

        if cur_node.state.is_solved() {
            debug!("Solved, backtracking path");
            return SolverOk::new(Some(backtrack_moves(&prevs, &cur_node.state)), stats);
        }

        let mut successors = Vec::with_capacity(4);
        for &dir in &DIRECTIONS {
            if !cur_node.state.can_move(dir) {
                continue;
            }
            let successor = cur_node.state.apply_move(dir);
            if !visited.contains(&successor) {
                successors.push(successor);
            }
        }

        policy.admit(cur_node.dist + 1, &mut successors);
        for successor in successors {
            // on re-discovery the map keeps the first key instance and only
            // replaces the value
            prevs.insert(successor.clone(), cur_node.state.clone());
            let next_node = SearchNode::new(successor, cur_node.dist + 1, seq);
            seq += 1;
            stats.add_created(&next_node);
            to_visit.push(Reverse(next_node));
        }
    }

    debug!("Frontier exhausted, no solution");
    SolverOk::new(None, stats)
}

/// Walks the predecessor chain from the solved state back to the initial
/// one (the only state without a `direction_taken`) and returns the moves
/// in chronological order.
fn backtrack_moves(prevs: &FnvHashMap<BoardState, BoardState>, final_state: &BoardState) -> Moves {
    let mut dirs = Vec::new();
    let mut state = final_state;
    while let Some(dir) = state.direction_taken() {
        dirs.push(dir);
        state = &prevs[state];
    }
    dirs.reverse();
    Moves::new(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::Strategy;

    fn solve_greedy(level: &str) -> SolverOk {
        let state: BoardState = level.parse().unwrap();
        state.solve(Strategy::Greedy, false)
    }

    #[test]
    fn no_goals_solved_immediately() {
        // open 3x3 board, player in the corner, no boxes or goals - the
        // goal test passes on the initial state and the solution is the
        // empty sequence
        let result = solve_greedy(
            "
3
3
300
000
000
",
        );
        let moves = result.moves.unwrap();
        assert!(moves.is_empty());
        assert_eq!(moves.to_string(), "");
        assert_eq!(result.stats.total_created(), 1);
        assert_eq!(result.stats.total_unique_visited(), 1);
    }

    #[test]
    fn single_push_up() {
        let result = solve_greedy(
            "
3
5
-1-1-1
-12-1
-11-1
-13-1
-1-1-1
",
        );
        assert_eq!(result.moves.unwrap().to_string(), "U");
        assert_eq!(result.stats.total_created(), 2);
        assert_eq!(result.stats.total_unique_visited(), 2);
        assert_eq!(result.stats.total_reached_duplicates(), 0);
    }

    #[test]
    fn sealed_box_exhausts_the_frontier() {
        // the box sits in a corner - no push can ever free it, so the
        // search must visit the handful of player positions and stop
        let result = solve_greedy(
            "
5
4
-1-1-1-1-1
-1130-1
-1002-1
-1-1-1-1-1
",
        );
        assert!(result.moves.is_none());
        assert_eq!(result.stats.total_created(), 6);
        assert_eq!(result.stats.total_unique_visited(), 5);
        assert_eq!(result.stats.total_reached_duplicates(), 1);
    }

    #[test]
    fn walks_around_the_box_before_pushing() {
        // the box must go down but the player starts beside it - the
        // cheapest path walks up and around first
        let result = solve_greedy(
            "
5
5
-1-1-1-1-1
-1000-1
-1013-1
-1020-1
-1-1-1-1-1
",
        );
        assert_eq!(result.moves.unwrap().to_string(), "U, L, D");
        assert_eq!(result.stats.total_created(), 8);
        assert_eq!(result.stats.total_unique_visited(), 5);
        assert_eq!(result.stats.total_reached_duplicates(), 0);
    }

    #[test]
    fn same_solution_from_both_formats() {
        let numeric = solve_greedy(
            "
5
5
-1-1-1-1-1
-1000-1
-1013-1
-1020-1
-1-1-1-1-1
",
        );
        let xsb = solve_greedy(
            r"
#####
#   #
# $@#
# . #
#####
",
        );
        assert_eq!(
            numeric.moves.unwrap().to_string(),
            xsb.moves.unwrap().to_string()
        );
    }

    #[test]
    fn deterministic_across_runs() {
        let level = r"
#######
#@$  .#
# $  .#
#     #
#######
";
        let state: BoardState = level.parse().unwrap();
        let first = state.solve(Strategy::Greedy, false);
        let second = state.solve(Strategy::Greedy, false);

        let first_moves = first.moves.unwrap().to_string();
        let second_moves = second.moves.unwrap().to_string();
        assert_eq!(first_moves, second_moves);
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn a_star_finds_the_same_walk_around() {
        let state: BoardState = "
5
5
-1-1-1-1-1
-1000-1
-1013-1
-1020-1
-1-1-1-1-1
"
        .parse()
        .unwrap();
        let result = state.solve(Strategy::AStar, false);
        assert_eq!(result.moves.unwrap().to_string(), "U, L, D");
        assert_eq!(result.stats.total_unique_visited(), 7);
        assert_eq!(result.stats.total_created(), 12);
    }

    #[test]
    fn custom_policy_plugs_into_the_engine() {
        // a policy that prunes everything proves the loop only sees what
        // the policy admits - the search must come up empty
        struct AdmitNothing;

        impl ExpansionPolicy for AdmitNothing {
            fn admit(&mut self, _depth: u32, successors: &mut Vec<BoardState>) {
                successors.clear();
            }
        }

        let state: BoardState = r"
#####
#@$.#
#####
"
        .parse()
        .unwrap();
        let result = search(&state, &mut AdmitNothing, false);
        assert!(result.moves.is_none());
        assert_eq!(result.stats.total_created(), 1);
        assert_eq!(result.stats.total_unique_visited(), 1);
    }

    #[test]
    fn solved_input_needs_no_moves() {
        let result = solve_greedy(
            r"
#####
#@ *#
#####
",
        );
        let moves = result.moves.unwrap();
        assert!(moves.is_empty());
        assert_eq!(result.stats.total_unique_visited(), 1);
    }
}
