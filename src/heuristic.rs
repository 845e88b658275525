use crate::state::BoardState;

/// Scoring strategy for frontier ordering. Lower is better.
///
/// One implementation is injected per solver run - the engine itself never
/// knows how states are scored.
pub trait Heuristic {
    fn score(&self, state: &BoardState) -> i32;
}

/// Sum of each unplaced box's Manhattan distance to its nearest unfilled
/// goal.
///
/// Box/goal pairs that already coincide are settled: they contribute zero
/// and their goal is excluded from the other boxes' candidates. Goals are
/// NOT claimed exclusively beyond that - two boxes may both count the same
/// nearest goal, so the estimate is not an admissible lower bound. That is
/// intended behavior: switching to a one-to-one assignment changes the
/// exploration order and the solutions found.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestGoal;

impl Heuristic for NearestGoal {
    fn score(&self, state: &BoardState) -> i32 {
        let goals = state.goals();
        let boxes = state.boxes();

        let open_goals: Vec<_> = goals
            .iter()
            .copied()
            .filter(|g| !boxes.contains(g))
            .collect();

        let mut cost = 0;
        for &box_pos in boxes.iter().filter(|b| !goals.contains(b)) {
            if let Some(min) = open_goals.iter().map(|&g| box_pos.dist(g)).min() {
                cost += min;
            }
        }
        cost
    }
}
