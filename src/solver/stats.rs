use std::fmt::{self, Debug, Display, Formatter};

use separator::Separatable;

use crate::solver::node::SearchNode;

/// Per-depth counters of how the search behaved. Diagnostic only - nothing
/// in the engine branches on these.
#[derive(Clone, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<i32>,
    visited_states: Vec<i32>,
    duplicate_states: Vec<i32>,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats {
            created_states: vec![],
            visited_states: vec![],
            duplicate_states: vec![],
        }
    }

    pub fn total_created(&self) -> i32 {
        self.created_states.iter().sum()
    }

    pub fn total_unique_visited(&self) -> i32 {
        self.visited_states.iter().sum()
    }

    pub fn total_reached_duplicates(&self) -> i32 {
        self.duplicate_states.iter().sum()
    }

    pub(crate) fn add_created(&mut self, node: &SearchNode) -> bool {
        Self::add(&mut self.created_states, node)
    }

    pub(crate) fn add_unique_visited(&mut self, node: &SearchNode) -> bool {
        Self::add(&mut self.visited_states, node)
    }

    pub(crate) fn add_reached_duplicate(&mut self, node: &SearchNode) -> bool {
        Self::add(&mut self.duplicate_states, node)
    }

    /// Returns true when the node reached a depth not seen by this counter
    /// before.
    fn add(counts: &mut Vec<i32>, node: &SearchNode) -> bool {
        let mut ret = false;

        // while because some depths might be skipped
        while node.dist as usize >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[node.dist as usize] += 1;
        ret
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "unique visited by depth: {:?}", self.visited_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "States created total: {}",
            self.total_created().separated_string()
        )?;
        writeln!(
            f,
            "Unique states visited total: {}",
            self.total_unique_visited().separated_string()
        )?;
        writeln!(
            f,
            "Reached duplicates total: {}",
            self.total_reached_duplicates().separated_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::state::BoardState;

    fn node_at_depth(dist: u32) -> SearchNode {
        let state: BoardState = r"
###
#@#
###
"
        .parse()
        .unwrap();
        SearchNode::new(state, dist, 0)
    }

    #[test]
    fn counting_by_depth() {
        let mut stats = Stats::new();
        assert!(stats.add_created(&node_at_depth(0)));
        assert!(!stats.add_created(&node_at_depth(0)));
        assert!(stats.add_created(&node_at_depth(2)));
        assert_eq!(stats.total_created(), 3);
        assert_eq!(stats.created_states, [2, 0, 1]);
    }

    #[test]
    fn formatting_totals() {
        let mut stats = Stats::new();
        for _ in 0..1234 {
            stats.add_unique_visited(&node_at_depth(1));
        }
        let display = stats.to_string();
        assert!(display.contains("Unique states visited total: 1,234"));
        assert!(display.contains("States created total: 0"));
    }
}
