//! This module contains everything related to the Segment Tree datastructure.
//!
//! The [DynamicSegmentTree] answers range maximum queries over a domain far too large to
//! store densely (e.g. `0..=10^9`) and supports two kinds of range updates:
//! adding a delta to every position ([RangeUpdate::Add]) and overwriting every position
//! ([RangeUpdate::Assign]).
//! The rules how both kinds of updates are deferred and combined live in [NodeState] and [Pending].
//!
//! # Remark
//! An assignment erases every addition issued before it on the same positions,
//! an addition issued after an assignment raises the assigned value.
//! # Example
//! Let's stack squares on a line. A square lands on the highest square below it,
//! so we need the maximum height under it and afterwards overwrite that part of the line.
//! ```
//! # use algorithms::segment_tree::*;
//! # fn main() -> common::SegResult<()> {
//! let mut line = DynamicSegmentTree::new(0, 1_000, 0)?;
//! let mut heights = Vec::new();
//! for &(left, side) in &[(1, 2), (2, 3), (6, 1)] {
//!     let right = left + side - 1;
//!     let height = line.range_query(left, right)? + side;
//!     line.range_assign(left, right, height)?;
//!     heights.push(line.range_query(0, 1_000)?);
//! }
//! assert_eq!(heights, vec![2, 5, 5]);
//! # Ok(())
//! # }
//! ```

mod aggregation;
pub use aggregation::Aggregation;

mod dynamic;
pub use dynamic::{DynamicSegmentTree, DynamicSegmentTreeNodeIdx};

mod lazy;
pub use lazy::{NodeState, Pending, RangeUpdate};

mod range;
use range::RangeExt;
