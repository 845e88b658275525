use std::cmp::Ordering;

use crate::state::BoardState;

/// One frontier entry: a state plus the depth it was discovered at and a
/// monotone insertion sequence number.
///
/// Ordered by the state's cost first. `BinaryHeap` is not stable, so the
/// sequence number is the explicit tie-break - equal costs pop first-in
/// first-out, which makes two runs on the same puzzle identical.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode {
    pub(crate) state: BoardState,
    pub(crate) dist: u32,
    seq: u64,
}

impl SearchNode {
    pub(crate) fn new(state: BoardState, dist: u32, seq: u64) -> Self {
        SearchNode { state, dist, seq }
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.state.cost() == other.state.cost() && self.seq == other.seq
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.state.cost(), self.seq).cmp(&(other.state.cost(), other.seq))
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Reverse;
    use std::collections::BinaryHeap;

    use super::*;

    #[test]
    fn pops_cheapest_first_ties_fifo() {
        let template: BoardState = r"
###
#@#
###
"
        .parse()
        .unwrap();
        let mut node = |cost, seq| {
            let mut state = template.clone();
            state.set_cost(cost);
            SearchNode::new(state, 0, seq)
        };

        let mut heap = BinaryHeap::new();
        heap.push(Reverse(node(2, 0)));
        heap.push(Reverse(node(1, 1)));
        heap.push(Reverse(node(1, 2)));
        heap.push(Reverse(node(0, 3)));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|Reverse(n)| (n.state.cost(), n.seq))
            .collect();
        assert_eq!(order, [(0, 3), (1, 1), (1, 2), (2, 0)]);
    }
}
