use std::ops::RangeInclusive;

use common::{SegError, SegResult};
use derive_more::*;
use typed_index_collections::TiVec;

use super::{Aggregation, NodeState, RangeExt, RangeUpdate};

/// An Index into a DynamicSegmentTree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
pub struct DynamicSegmentTreeNodeIdx(usize);

const ROOT: DynamicSegmentTreeNodeIdx = DynamicSegmentTreeNodeIdx(0);

#[derive(Debug, Clone)]
struct DynamicSegmentTreeNode {
    left: Option<DynamicSegmentTreeNodeIdx>,
    right: Option<DynamicSegmentTreeNodeIdx>,
    state: NodeState,
}

impl DynamicSegmentTreeNode {
    fn new(value: i64) -> Self {
        Self {
            left: None,
            right: None,
            state: NodeState::fresh(value),
        }
    }

    // Children are always created in pairs.
    fn children(&self) -> Option<(DynamicSegmentTreeNodeIdx, DynamicSegmentTreeNodeIdx)> {
        self.left.zip(self.right)
    }
}

/// A segment tree over the integer positions `lo..=hi` supporting range assignment,
/// range addition and range maximum queries.
///
/// Nodes are created lazily, the first time an update only covers part of a node.
/// Until then the whole range of a node holds one value, so a tree over `0..=10^9`
/// starts with a single node and every update adds at most `O(log(hi - lo))` nodes.
///
/// All ranges taken by the methods are inclusive on both ends.
///
/// Updates never overflow. Values are tracked exactly and a query reports its result
/// clamped to `i64::MIN..=i64::MAX`, see [range_add](DynamicSegmentTree::range_add).
///
/// # Example
/// ```
/// # use algorithms::segment_tree::DynamicSegmentTree;
/// # fn main() -> common::SegResult<()> {
/// let mut tree = DynamicSegmentTree::new(0, 1_000_000_000, 0)?;
/// tree.range_assign(0, 9, 10)?;
/// tree.range_add(5, 14, 1)?;
///
/// assert_eq!(tree.range_query(0, 4)?, 10);
/// assert_eq!(tree.range_query(5, 9)?, 11);
/// assert_eq!(tree.range_query(10, 14)?, 1);
/// assert_eq!(tree.range_query(15, 1_000_000_000)?, 0);
///
/// assert!(tree.range_query(10, 5).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DynamicSegmentTree {
    borders: RangeInclusive<i64>,
    initial_value: i64,
    aggregation: Aggregation,
    data: TiVec<DynamicSegmentTreeNodeIdx, DynamicSegmentTreeNode>,
}

impl DynamicSegmentTree {
    /// Creates a new tree over `lo..=hi` where every position holds `initial_value`.
    /// # Errors
    /// [SegError::InvalidBorders] if `lo > hi`.
    pub fn new(lo: i64, hi: i64, initial_value: i64) -> SegResult<Self> {
        Self::with_aggregation(lo, hi, initial_value, Aggregation::default())
    }

    /// Like [new](DynamicSegmentTree::new), but with an explicit [Aggregation].
    pub fn with_aggregation(
        lo: i64,
        hi: i64,
        initial_value: i64,
        aggregation: Aggregation,
    ) -> SegResult<Self> {
        if lo > hi {
            return Err(SegError::InvalidBorders { lo, hi });
        }
        let mut data = TiVec::new();
        data.push(DynamicSegmentTreeNode::new(initial_value));
        Ok(Self {
            borders: lo..=hi,
            initial_value,
            aggregation,
            data,
        })
    }

    /// The positions this tree holds values for.
    pub fn borders(&self) -> RangeInclusive<i64> {
        self.borders.clone()
    }

    /// The number of nodes which have been created so far.
    pub fn node_count(&self) -> usize {
        self.data.len()
    }

    /// Gives the maximum over all positions in `l..=r`.
    /// This never creates nodes.
    /// # Runtime
    /// O(log D) where D = hi - lo
    /// # Errors
    /// [SegError::OutOfRange] if `l > r` or `l..=r` is not inside the borders.
    pub fn range_query(&self, l: i64, r: i64) -> SegResult<i64> {
        let target = self.validate(l, r)?;
        let result = self.range_query_inner(ROOT, &self.borders, &target);
        Ok(clamp_to_i64(result))
    }

    /// Gives the value at `position`.
    pub fn point_query(&self, position: i64) -> SegResult<i64> {
        self.range_query(position, position)
    }

    /// Adds `delta` to every position in `l..=r`.
    ///
    /// Additions never overflow. A position is tracked exactly even beyond the `i64` bounds and
    /// queries clamp what they report. So assigning `i64::MAX` and adding `1` reads as `i64::MAX`,
    /// adding `-1` afterwards gets back to `i64::MAX` and not `i64::MAX - 1`.
    /// # Example
    /// ```
    /// # use algorithms::segment_tree::DynamicSegmentTree;
    /// let mut tree = DynamicSegmentTree::new(0, 9, 0).unwrap();
    /// tree.range_assign(0, 9, i64::MAX).unwrap();
    /// tree.range_add(0, 4, 1).unwrap();
    /// assert_eq!(tree.range_query(0, 9).unwrap(), i64::MAX);
    /// tree.range_add(0, 9, -2).unwrap();
    /// assert_eq!(tree.range_query(0, 4).unwrap(), i64::MAX - 1);
    /// assert_eq!(tree.range_query(5, 9).unwrap(), i64::MAX - 2);
    /// ```
    /// # Runtime
    /// O(log D) where D = hi - lo
    /// # Errors
    /// [SegError::OutOfRange] if `l > r` or `l..=r` is not inside the borders.
    /// The tree is left untouched in this case.
    pub fn range_add(&mut self, l: i64, r: i64, delta: i64) -> SegResult<()> {
        self.range_update(l, r, RangeUpdate::Add(delta.into()))
    }

    /// Sets every position in `l..=r` to `value`.
    /// # Runtime
    /// O(log D) where D = hi - lo
    /// # Errors
    /// [SegError::OutOfRange] if `l > r` or `l..=r` is not inside the borders.
    /// The tree is left untouched in this case.
    pub fn range_assign(&mut self, l: i64, r: i64, value: i64) -> SegResult<()> {
        self.range_update(l, r, RangeUpdate::Assign(value.into()))
    }

    /// Applies `update` to every position in `l..=r`.
    pub fn range_update(&mut self, l: i64, r: i64, update: RangeUpdate) -> SegResult<()> {
        let target = self.validate(l, r)?;
        let root_range = self.borders.clone();
        self.range_update_inner(ROOT, &root_range, &target, update);
        Ok(())
    }

    /// Behaves exactly like [range_add](DynamicSegmentTree::range_add), but the range is cut to the borders first.
    /// A range completely outside of the borders is ignored.
    /// # Example
    /// ```
    /// # use algorithms::segment_tree::DynamicSegmentTree;
    /// let mut tree = DynamicSegmentTree::new(0, 9, 0).unwrap();
    /// assert!(tree.range_add_clamped(5, 20, 1).is_ok());
    /// assert!(tree.range_add_clamped(10, 20, 1).is_ok());
    /// assert_eq!(tree.range_query(0, 9).unwrap(), 1);
    /// ```
    pub fn range_add_clamped(&mut self, l: i64, r: i64, delta: i64) -> SegResult<()> {
        self.range_update_clamped(l, r, RangeUpdate::Add(delta.into()))
    }

    /// Behaves exactly like [range_assign](DynamicSegmentTree::range_assign), but the range is cut to the borders first.
    /// A range completely outside of the borders is ignored.
    pub fn range_assign_clamped(&mut self, l: i64, r: i64, value: i64) -> SegResult<()> {
        self.range_update_clamped(l, r, RangeUpdate::Assign(value.into()))
    }

    fn range_update_clamped(&mut self, l: i64, r: i64, update: RangeUpdate) -> SegResult<()> {
        if l > r {
            return Err(self.out_of_range(l, r));
        }
        match (l..=r).clamped_by(&self.borders) {
            Some(clamped) => self.range_update(*clamped.start(), *clamped.end(), update),
            None => Ok(()),
        }
    }

    fn validate(&self, l: i64, r: i64) -> SegResult<RangeInclusive<i64>> {
        let target = l..=r;
        if target.is_normal() && self.borders.is_superset(&target) {
            Ok(target)
        } else {
            log::debug!(
                "DynamicSegmentTree: rejecting range [{}, {}] for borders {:?}",
                l,
                r,
                self.borders
            );
            Err(self.out_of_range(l, r))
        }
    }

    fn out_of_range(&self, l: i64, r: i64) -> SegError {
        SegError::OutOfRange {
            query: (l, r),
            borders: (*self.borders.start(), *self.borders.end()),
        }
    }

    fn allocate(&mut self) -> DynamicSegmentTreeNodeIdx {
        let idx = self.data.len().into();
        self.data.push(DynamicSegmentTreeNode::new(self.initial_value));
        idx
    }

    // This creates both children of node `idx` if they do not exist yet.
    fn create_children(
        &mut self,
        idx: DynamicSegmentTreeNodeIdx,
    ) -> (DynamicSegmentTreeNodeIdx, DynamicSegmentTreeNodeIdx) {
        if let Some(children) = self.data[idx].children() {
            return children;
        }
        let left = self.allocate();
        let right = self.allocate();
        log::trace!(
            "DynamicSegmentTree: node {:?} got children {:?} and {:?}",
            idx,
            left,
            right
        );
        self.data[idx].left = Some(left);
        self.data[idx].right = Some(right);
        (left, right)
    }

    // Hands the pending updates of `idx` to its children, creating them if needed.
    fn push_down(
        &mut self,
        idx: DynamicSegmentTreeNodeIdx,
    ) -> (DynamicSegmentTreeNodeIdx, DynamicSegmentTreeNodeIdx) {
        let (left, right) = self.create_children(idx);
        let (state, pending) = self.data[idx].state.take_pending();
        self.data[idx].state = state;
        if !pending.is_empty() {
            for &child in &[left, right] {
                self.data[child].state = self.data[child].state.receive_pending(pending);
            }
        }
        (left, right)
    }

    fn range_update_inner(
        &mut self,
        node_idx: DynamicSegmentTreeNodeIdx,
        node_range: &RangeInclusive<i64>,
        query_range: &RangeInclusive<i64>,
        update: RangeUpdate,
    ) {
        if query_range.is_superset(node_range) {
            // this is a minimal overlapping segment so stop recursion here.
            let node = &mut self.data[node_idx];
            node.state = node.state.receive(update);
            return;
        }

        // relies on the invariant that the query range and the node range overlap,
        // so a node which is not covered has at least two positions.
        if let Some((left_range, right_range)) = node_range.split() {
            let (left, right) = self.push_down(node_idx);
            if left_range.intersects(query_range) {
                self.range_update_inner(left, &left_range, query_range, update);
            }
            if right_range.intersects(query_range) {
                self.range_update_inner(right, &right_range, query_range, update);
            }
            let aggregate = self
                .aggregation
                .combine(self.data[left].state.aggregate, self.data[right].state.aggregate);
            self.data[node_idx].state.aggregate = aggregate;
        }
    }

    fn range_query_inner(
        &self,
        node_idx: DynamicSegmentTreeNodeIdx,
        node_range: &RangeInclusive<i64>,
        query_range: &RangeInclusive<i64>,
    ) -> i128 {
        let node = &self.data[node_idx];
        if query_range.is_superset(node_range) {
            return node.state.aggregate;
        }

        match (node.children(), node_range.split()) {
            (Some((left, right)), Some((left_range, right_range))) => {
                let mut result = self.aggregation.identity();
                if left_range.intersects(query_range) {
                    result = self.aggregation.combine(
                        result,
                        self.range_query_inner(left, &left_range, query_range),
                    );
                }
                if right_range.intersects(query_range) {
                    result = self.aggregation.combine(
                        result,
                        self.range_query_inner(right, &right_range, query_range),
                    );
                }
                // the children do not know about the updates still pending here
                node.state.pending.apply(result)
            }
            // a node without children holds the same value everywhere
            _ => node.state.aggregate,
        }
    }
}

fn clamp_to_i64(value: i128) -> i64 {
    value.clamp(i64::MIN.into(), i64::MAX.into()) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_do_not_create_nodes() -> SegResult<()> {
        let mut tree = DynamicSegmentTree::new(0, 99, 0)?;
        tree.range_query(0, 99)?;
        tree.range_query(13, 17)?;
        tree.point_query(42)?;
        assert_eq!(tree.node_count(), 1);

        tree.range_add(10, 20, 1)?;
        let nodes = tree.node_count();
        tree.range_query(0, 5)?;
        tree.range_query(15, 50)?;
        assert_eq!(tree.node_count(), nodes);
        Ok(())
    }

    #[test]
    fn covering_updates_do_not_create_nodes() -> SegResult<()> {
        let mut tree = DynamicSegmentTree::new(-1_000_000_000, 1_000_000_000, 7)?;
        tree.range_add(-1_000_000_000, 1_000_000_000, 3)?;
        tree.range_assign(-1_000_000_000, 1_000_000_000, -2)?;
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.range_query(5, 5)?, -2);
        Ok(())
    }

    #[test]
    fn childless_node_keeps_pending_consistent_with_initial_value() -> SegResult<()> {
        let mut tree = DynamicSegmentTree::new(0, 15, 4)?;
        tree.range_add(0, 15, 3)?;
        tree.range_assign(0, 15, 1)?;
        tree.range_add(0, 15, 6)?;
        let root = &tree.data[ROOT];
        assert_eq!(
            root.state.pending.apply(tree.initial_value.into()),
            root.state.aggregate
        );
        Ok(())
    }

    #[test]
    fn pending_tags_are_pushed_before_splitting() -> SegResult<()> {
        let mut tree = DynamicSegmentTree::new(0, 15, 0)?;
        tree.range_add(0, 15, 5)?;
        tree.range_assign(0, 7, 1)?;

        let root = &tree.data[ROOT];
        assert!(root.state.pending.is_empty());
        assert_eq!(root.state.aggregate, 5);
        let (left, right) = root.children().unwrap();
        assert_eq!(tree.data[left].state.aggregate, 1);
        assert_eq!(tree.data[right].state.aggregate, 5);
        assert_eq!(tree.data[right].state.pending.add(), Some(5));
        Ok(())
    }

    #[test]
    fn single_position_tree_works() -> SegResult<()> {
        let mut tree = DynamicSegmentTree::new(3, 3, 0)?;
        tree.range_add(3, 3, 2)?;
        assert_eq!(tree.point_query(3)?, 2);
        assert!(tree.point_query(4).is_err());
        assert_eq!(tree.node_count(), 1);
        Ok(())
    }

    #[test]
    fn extreme_borders_work() -> SegResult<()> {
        let mut tree = DynamicSegmentTree::new(i64::MIN, i64::MAX, 0)?;
        tree.range_assign(i64::MIN, -1, 4)?;
        tree.range_add(-1, i64::MAX, 1)?;
        assert_eq!(tree.point_query(i64::MIN)?, 4);
        assert_eq!(tree.point_query(-1)?, 5);
        assert_eq!(tree.range_query(0, i64::MAX)?, 1);
        Ok(())
    }

    #[test]
    fn empty_borders_are_rejected() {
        match DynamicSegmentTree::new(10, 9, 0) {
            Err(SegError::InvalidBorders { lo: 10, hi: 9 }) => {}
            other => panic!("expected InvalidBorders, got {:?}", other),
        }
    }

    #[test]
    fn clamped_updates_cut_to_borders() -> SegResult<()> {
        let mut tree = DynamicSegmentTree::new(0, 9, 0)?;
        tree.range_assign_clamped(-5, 3, 8)?;
        tree.range_add_clamped(20, 30, 100)?;
        assert_eq!(tree.range_query(0, 3)?, 8);
        assert_eq!(tree.range_query(4, 9)?, 0);
        assert!(tree.range_add_clamped(5, 4, 1).unwrap_err().is_out_of_range());
        Ok(())
    }
}
