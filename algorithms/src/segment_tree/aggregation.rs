/// How the values of a range are summarized in a node.
/// Only the maximum is needed by now, the enum is the hook for further modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregation {
    /// The largest value of the range.
    Max,
}

impl Default for Aggregation {
    fn default() -> Self {
        Aggregation::Max
    }
}

impl Aggregation {
    /// The neutral element of [Aggregation::combine].
    pub fn identity(self) -> i128 {
        match self {
            Aggregation::Max => i128::MIN,
        }
    }

    /// Summarizes two adjacent ranges.
    pub fn combine(self, lhs: i128, rhs: i128) -> i128 {
        match self {
            Aggregation::Max => lhs.max(rhs),
        }
    }
}
