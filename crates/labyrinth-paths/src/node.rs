use std::cmp::Ordering;

/// Index meaning "no predecessor".
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Per-cell search state for one run.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    /// Best known accumulated cost from the start.
    pub(crate) g: f64,
    /// Flat index of the cell the best known route arrives from.
    pub(crate) parent: usize,
    /// Finalized: popped from the open set and expanded.
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            parent: NO_PARENT,
            closed: false,
        }
    }
}

impl Node {
    /// Whether any route to this cell has been found yet.
    #[inline]
    pub(crate) fn discovered(&self) -> bool {
        self.g.is_finite()
    }
}

/// Frontier entry, ordered for use in a `BinaryHeap`.
///
/// The heap pops the lowest `f` first. Ties go to the lowest `h` (the entry
/// closest to the goal) and then to the lowest `seq` (first pushed).
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: f64,
    pub(crate) h: f64,
    pub(crate) seq: u64,
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest key first.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    fn entry(idx: usize, f: f64, h: f64, seq: u64) -> NodeRef {
        NodeRef { idx, f, h, seq }
    }

    #[test]
    fn pops_lowest_f_first() {
        let mut heap = BinaryHeap::new();
        heap.push(entry(0, 5.0, 0.0, 0));
        heap.push(entry(1, 2.5, 0.0, 1));
        heap.push(entry(2, 4.0, 0.0, 2));
        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|e| e.idx)).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn ties_prefer_lower_h_then_earlier_push() {
        let mut heap = BinaryHeap::new();
        heap.push(entry(0, 4.0, 3.0, 0));
        heap.push(entry(1, 4.0, 1.0, 1));
        heap.push(entry(2, 4.0, 1.0, 2));
        heap.push(entry(3, 4.0, 2.0, 3));
        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|e| e.idx)).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn default_node_is_undiscovered() {
        let n = Node::default();
        assert!(!n.discovered());
        assert!(!n.closed);
        assert_eq!(n.parent, NO_PARENT);
    }
}
