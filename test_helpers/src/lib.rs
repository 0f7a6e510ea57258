#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]
#![cfg_attr(feature = "strict", deny(missing_docs))]
//! This crate contains stuff that's really helpful for tests.
use common::{SegError, SegResult};
use proptest::prelude::*;

/// One call against a range max tree, all ranges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `range_add(l, r, delta)`
    Add(i64, i64, i64),
    /// `range_assign(l, r, value)`
    Assign(i64, i64, i64),
    /// `range_query(l, r)`
    Query(i64, i64),
}

/// A dense reference for trees over small domains.
/// Every position is stored explicitly and every operation touches every position in its range,
/// so this is obviously correct, but slow.
#[derive(Debug, Clone)]
pub struct DenseModel {
    lo: i64,
    values: Vec<i64>,
}

impl DenseModel {
    /// A model over `lo..=hi` where every position holds `initial_value`.
    /// # Panics
    /// If `lo > hi`.
    pub fn new(lo: i64, hi: i64, initial_value: i64) -> Self {
        assert!(lo <= hi);
        Self {
            lo,
            values: vec![initial_value; (hi - lo + 1) as usize],
        }
    }

    fn hi(&self) -> i64 {
        self.lo + self.values.len() as i64 - 1
    }

    fn positions(&mut self, l: i64, r: i64) -> SegResult<&mut [i64]> {
        if l > r || l < self.lo || r > self.hi() {
            return Err(SegError::OutOfRange {
                query: (l, r),
                borders: (self.lo, self.hi()),
            });
        }
        Ok(&mut self.values[(l - self.lo) as usize..=(r - self.lo) as usize])
    }

    /// Adds `delta` to every position in `l..=r`.
    pub fn range_add(&mut self, l: i64, r: i64, delta: i64) -> SegResult<()> {
        self.positions(l, r)?
            .iter_mut()
            .for_each(|value| *value += delta);
        Ok(())
    }

    /// Sets every position in `l..=r` to `value`.
    pub fn range_assign(&mut self, l: i64, r: i64, value: i64) -> SegResult<()> {
        self.positions(l, r)?
            .iter_mut()
            .for_each(|position| *position = value);
        Ok(())
    }

    /// The maximum over `l..=r`.
    pub fn range_query(&mut self, l: i64, r: i64) -> SegResult<i64> {
        self.positions(l, r)?
            .iter()
            .copied()
            .max()
            .ok_or_else(|| "DenseModel: empty range".into())
    }

    /// Runs `operation` and returns the query result, if it was a query.
    pub fn apply(&mut self, operation: Operation) -> SegResult<Option<i64>> {
        match operation {
            Operation::Add(l, r, delta) => self.range_add(l, r, delta).map(|_| None),
            Operation::Assign(l, r, value) => self.range_assign(l, r, value).map(|_| None),
            Operation::Query(l, r) => self.range_query(l, r).map(Some),
        }
    }
}

prop_compose! {
    /// gives a random non empty inclusive range inside `lo..=hi`.
    pub fn inclusive_range(lo: i64, hi: i64)(a in lo..=hi, b in lo..=hi) -> (i64, i64) {
        (a.min(b), a.max(b))
    }
}

/// gives a random [Operation] on the domain `lo..=hi`, with values in `-100..100`.
pub fn operation(lo: i64, hi: i64) -> impl Strategy<Value = Operation> {
    prop_oneof![
        (inclusive_range(lo, hi), -100i64..100)
            .prop_map(|((l, r), delta)| Operation::Add(l, r, delta)),
        (inclusive_range(lo, hi), -100i64..100)
            .prop_map(|((l, r), value)| Operation::Assign(l, r, value)),
        inclusive_range(lo, hi).prop_map(|(l, r)| Operation::Query(l, r)),
    ]
}

prop_compose! {
    /// Gives a strategy generating between one and `limit` many [operation]s on `lo..=hi`.
    pub fn operations(lo: i64, hi: i64, limit: usize)(
        operations in prop::collection::vec(operation(lo, hi), 1..limit)
    ) -> Vec<Operation> {
        operations
    }
}
