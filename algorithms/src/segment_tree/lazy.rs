//! The lazy combinator of the [DynamicSegmentTree](super::DynamicSegmentTree).
//!
//! A node does not forward updates covering its whole range to its children immediately.
//! It remembers them as [Pending] and hands them down once a later operation needs to
//! distinguish the two halves. Receiving an update from a caller and receiving the pending
//! updates of a parent are the same operation: [NodeState::receive].
//!
//! Values are held as `i128` and added with `saturating_add`. Sums of `i64` deltas cannot
//! reach the `i128` bounds in any realistic number of calls, so adding stays exact and
//! commutes with taking the maximum. The tree clamps into `i64` when it reports a value.
//!
//! # Example
//! ```
//! # use algorithms::segment_tree::{NodeState, RangeUpdate};
//! let state = NodeState::fresh(0)
//!     .receive(RangeUpdate::Add(5))
//!     .receive(RangeUpdate::Assign(3));
//! // the assignment erased the pending addition
//! assert_eq!(state.aggregate, 3);
//! assert_eq!(state.pending.add(), None);
//!
//! let state = state.receive(RangeUpdate::Add(2));
//! assert_eq!(state.aggregate, 5);
//! assert_eq!(state.pending.assign(), Some(5));
//! ```

/// An update of every position of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeUpdate {
    /// Increase every position by the delta.
    Add(i128),
    /// Overwrite every position with the value.
    Assign(i128),
}

impl RangeUpdate {
    /// The value of a single position after this update.
    /// As every position of a range moves the same way, this also maps the maximum of a range.
    pub fn apply(self, value: i128) -> i128 {
        match self {
            RangeUpdate::Add(delta) => value.saturating_add(delta),
            RangeUpdate::Assign(value) => value,
        }
    }
}

/// The updates a node owes to its children.
///
/// If both parts are present, the assignment happened first and the addition on top of it,
/// so the whole range holds `assign + add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pending {
    assign: Option<i128>,
    add: Option<i128>,
}

impl Pending {
    /// The absolute value owed to every position, if any.
    pub fn assign(&self) -> Option<i128> {
        self.assign
    }

    /// The delta owed to every position on top of [Pending::assign] or the current values.
    pub fn add(&self) -> Option<i128> {
        self.add
    }

    /// True if nothing is owed to the children.
    pub fn is_empty(&self) -> bool {
        self.assign.is_none() && self.add.is_none()
    }

    /// Composes `update` after everything already pending.
    pub fn then(self, update: RangeUpdate) -> Pending {
        match update {
            RangeUpdate::Add(delta) => match self.assign {
                // assignment dominates, the addition just raises the assigned value
                Some(value) => Pending {
                    assign: Some(value.saturating_add(delta)),
                    add: self.add,
                },
                None => Pending {
                    assign: None,
                    add: Some(self.add.unwrap_or(0).saturating_add(delta)),
                },
            },
            RangeUpdate::Assign(value) => Pending {
                assign: Some(value),
                add: None,
            },
        }
    }

    /// The pending updates in the order they have to be replayed on a child.
    pub fn updates(self) -> impl Iterator<Item = RangeUpdate> {
        self.assign
            .map(RangeUpdate::Assign)
            .into_iter()
            .chain(self.add.map(RangeUpdate::Add))
    }

    /// The value a position holding `value` ends up with once everything pending is applied.
    pub fn apply(self, value: i128) -> i128 {
        self.updates().fold(value, |value, update| update.apply(value))
    }
}

/// The data a node of the tree carries, apart from its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeState {
    /// Aggregate of the covered range, *including* the node's own pending updates.
    pub aggregate: i128,
    /// Updates not yet handed to the children.
    pub pending: Pending,
}

impl NodeState {
    /// A node whose range uniformly holds `value` and owes nothing.
    pub fn fresh(value: i64) -> Self {
        Self {
            aggregate: value.into(),
            pending: Pending::default(),
        }
    }

    /// The state after `update` was applied to the whole range of the node.
    pub fn receive(self, update: RangeUpdate) -> Self {
        Self {
            aggregate: update.apply(self.aggregate),
            pending: self.pending.then(update),
        }
    }

    /// The state after a parent handed down its pending updates.
    pub fn receive_pending(self, pending: Pending) -> Self {
        pending.updates().fold(self, NodeState::receive)
    }

    /// Splits off the pending updates, leaving a state which owes nothing.
    pub fn take_pending(self) -> (Self, Pending) {
        (
            Self {
                aggregate: self.aggregate,
                pending: Pending::default(),
            },
            self.pending,
        )
    }
}
