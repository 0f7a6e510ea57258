//! Interval problems answered with a [DynamicSegmentTree].
//!
//! Bookings are half-open intervals `start..end` as usual for time slots,
//! squares are given by their left edge and side length.
//! Both are translated to the inclusive ranges of the tree here.

use common::{SegError, SegResult};

use crate::segment_tree::DynamicSegmentTree;

/// The positions the adapters work on, if not given an explicit tree.
pub const DEFAULT_LO: i64 = 0;
/// See [DEFAULT_LO].
pub const DEFAULT_HI: i64 = 1_000_000_000;

fn default_tree() -> DynamicSegmentTree {
    DynamicSegmentTree::new(DEFAULT_LO, DEFAULT_HI, 0)
        .unwrap_or_else(|_| unreachable!("The default borders are not empty."))
}

// start..end as an inclusive range, an empty booking is out of range.
fn inclusive(start: i64, end: i64) -> (i64, i64) {
    (start, end.saturating_sub(1))
}

/// A calendar which accepts a booking only if no point in time would be booked more than `k` times.
/// # Example
/// ```
/// # use algorithms::scheduling::BoundedOverlapCalendar;
/// let mut calendar = BoundedOverlapCalendar::new(2);
/// assert!(calendar.book(10, 20).unwrap());
/// assert!(calendar.book(15, 25).unwrap());
/// // 15..20 would be booked three times
/// assert!(!calendar.book(18, 30).unwrap());
/// assert!(calendar.book(20, 30).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct BoundedOverlapCalendar {
    max_overlap: i64,
    tree: DynamicSegmentTree,
}

impl BoundedOverlapCalendar {
    /// A calendar over [DEFAULT_LO]..=[DEFAULT_HI] allowing `max_overlap` bookings at the same time.
    pub fn new(max_overlap: i64) -> Self {
        Self::with_tree(max_overlap, default_tree())
    }

    /// A calendar on top of an existing tree, which holds the number of bookings per point in time.
    pub fn with_tree(max_overlap: i64, tree: DynamicSegmentTree) -> Self {
        Self { max_overlap, tree }
    }

    /// The number of bookings allowed at the same time.
    pub fn max_overlap(&self) -> i64 {
        self.max_overlap
    }

    /// Tries to book `start..end`.
    /// # Returns
    /// Returns Ok(true) if the booking was accepted and Ok(false) if it was rejected.
    /// Returns an error if `start >= end` or the booking leaves the calendar.
    pub fn book(&mut self, start: i64, end: i64) -> SegResult<bool> {
        let (l, r) = inclusive(start, end);
        let booked = self.tree.range_query(l, r)?;
        if booked >= self.max_overlap {
            log::debug!(
                "Rejecting booking {}..{}, already booked {} times",
                start,
                end,
                booked
            );
            return Ok(false);
        }
        self.tree.range_add(l, r, 1)?;
        log::debug!("Accepted booking {}..{}", start, end);
        Ok(true)
    }
}

/// A calendar which accepts a booking only if it does not overlap any accepted booking.
#[derive(Debug, Clone)]
pub struct SingleBookingCalendar {
    inner: BoundedOverlapCalendar,
}

impl SingleBookingCalendar {
    /// An empty calendar over [DEFAULT_LO]..=[DEFAULT_HI].
    pub fn new() -> Self {
        Self::with_tree(default_tree())
    }

    /// See [BoundedOverlapCalendar::with_tree].
    pub fn with_tree(tree: DynamicSegmentTree) -> Self {
        Self {
            inner: BoundedOverlapCalendar::with_tree(1, tree),
        }
    }

    /// See [BoundedOverlapCalendar::book].
    pub fn book(&mut self, start: i64, end: i64) -> SegResult<bool> {
        self.inner.book(start, end)
    }
}

impl Default for SingleBookingCalendar {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepts every booking and keeps track of the largest number of bookings at the same time.
#[derive(Debug, Clone)]
pub struct OverlapCounter {
    tree: DynamicSegmentTree,
}

impl OverlapCounter {
    /// A counter over [DEFAULT_LO]..=[DEFAULT_HI] without bookings.
    pub fn new() -> Self {
        Self::with_tree(default_tree())
    }

    /// A counter on top of an existing tree, which holds the number of bookings per point in time.
    pub fn with_tree(tree: DynamicSegmentTree) -> Self {
        Self { tree }
    }

    /// Books `start..end` and returns the maximum overlap of all bookings so far.
    pub fn book(&mut self, start: i64, end: i64) -> SegResult<i64> {
        let (l, r) = inclusive(start, end);
        self.tree.range_add(l, r, 1)?;
        let borders = self.tree.borders();
        self.tree.range_query(*borders.start(), *borders.end())
    }
}

impl Default for OverlapCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops squares onto a line, each one landing on the highest square it overlaps.
/// Squares only touching at an edge do not overlap.
#[derive(Debug, Clone)]
pub struct SquareStacker {
    tree: DynamicSegmentTree,
}

impl SquareStacker {
    /// An empty line over [DEFAULT_LO]..=[DEFAULT_HI].
    pub fn new() -> Self {
        Self::with_tree(default_tree())
    }

    /// A stacker on top of an existing tree, which holds the height per position.
    pub fn with_tree(tree: DynamicSegmentTree) -> Self {
        Self { tree }
    }

    /// Drops a square covering `left..left + side` and returns the height of the highest stack afterwards.
    /// Heights saturate at `i64::MAX`.
    /// # Errors
    /// If `side < 1` or the square leaves the line.
    pub fn drop_square(&mut self, left: i64, side: i64) -> SegResult<i64> {
        if side < 1 {
            return Err(format!("SquareStacker: square at {} has side {}", left, side).into());
        }
        let right = left.checked_add(side - 1).ok_or(SegError::OutOfRange {
            query: (left, i64::MAX),
            borders: (*self.tree.borders().start(), *self.tree.borders().end()),
        })?;
        let landing = self.tree.range_query(left, right)?;
        self.tree.range_assign(left, right, landing.saturating_add(side))?;
        log::debug!(
            "Square {}..={} landed at height {}",
            left,
            right,
            landing
        );
        let borders = self.tree.borders();
        self.tree.range_query(*borders.start(), *borders.end())
    }

    /// Drops all `(left, side)` squares in order and returns the height of the highest stack after each.
    /// # Example
    /// ```
    /// # use algorithms::scheduling::SquareStacker;
    /// let heights = SquareStacker::new().stack_all(&[(1, 2), (2, 3), (6, 1)]).unwrap();
    /// assert_eq!(heights, vec![2, 5, 5]);
    /// ```
    pub fn stack_all(&mut self, squares: &[(i64, i64)]) -> SegResult<Vec<i64>> {
        squares
            .iter()
            .map(|&(left, side)| self.drop_square(left, side))
            .collect()
    }
}

impl Default for SquareStacker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOKINGS: [(i64, i64); 6] = [(10, 20), (50, 60), (10, 40), (5, 15), (5, 10), (25, 55)];

    #[test]
    fn double_booking_walkthrough() -> SegResult<()> {
        common::logging::init_test_logging();
        let mut calendar = BoundedOverlapCalendar::new(2);
        let accepted = BOOKINGS
            .iter()
            .map(|&(start, end)| calendar.book(start, end))
            .collect::<SegResult<Vec<_>>>()?;
        assert_eq!(accepted, vec![true, true, true, false, true, true]);
        Ok(())
    }

    #[test]
    fn single_booking_walkthrough() -> SegResult<()> {
        let mut calendar = SingleBookingCalendar::new();
        assert!(calendar.book(10, 20)?);
        assert!(!calendar.book(15, 25)?);
        assert!(calendar.book(20, 30)?);
        assert!(!calendar.book(5, 11)?);
        assert!(calendar.book(5, 10)?);
        Ok(())
    }

    #[test]
    fn overlap_counter_walkthrough() -> SegResult<()> {
        let mut counter = OverlapCounter::new();
        let overlaps = BOOKINGS
            .iter()
            .map(|&(start, end)| counter.book(start, end))
            .collect::<SegResult<Vec<_>>>()?;
        assert_eq!(overlaps, vec![1, 1, 2, 3, 3, 3]);
        Ok(())
    }

    #[test]
    fn rejected_bookings_are_not_counted() -> SegResult<()> {
        let mut calendar = BoundedOverlapCalendar::new(1);
        assert!(calendar.book(0, 10)?);
        assert!(!calendar.book(0, 10)?);
        assert!(!calendar.book(9, 10)?);
        assert!(calendar.book(10, 11)?);
        Ok(())
    }

    #[test]
    fn empty_and_outside_bookings_fail() {
        let mut calendar = BoundedOverlapCalendar::new(2);
        assert!(calendar.book(10, 10).unwrap_err().is_out_of_range());
        assert!(calendar.book(10, 5).unwrap_err().is_out_of_range());
        assert!(calendar.book(-5, 5).unwrap_err().is_out_of_range());
        assert!(calendar
            .book(DEFAULT_HI, DEFAULT_HI + 2)
            .unwrap_err()
            .is_out_of_range());
    }

    #[test]
    fn stacking_walkthrough() -> SegResult<()> {
        let heights = SquareStacker::new().stack_all(&[(1, 2), (2, 3), (6, 1)])?;
        assert_eq!(heights, vec![2, 5, 5]);
        Ok(())
    }

    #[test]
    fn squares_touching_at_edges_do_not_stack() -> SegResult<()> {
        let heights = SquareStacker::new().stack_all(&[(100, 100), (200, 100)])?;
        assert_eq!(heights, vec![100, 100]);
        Ok(())
    }

    #[test]
    fn squares_land_on_overwritten_heights() -> SegResult<()> {
        let mut stacker = SquareStacker::new();
        assert_eq!(stacker.drop_square(0, 10)?, 10);
        // lands on the first square, the line below 5..=7 is now 13 and not 10 + 13
        assert_eq!(stacker.drop_square(5, 3)?, 13);
        assert_eq!(stacker.drop_square(7, 1)?, 14);
        assert_eq!(stacker.drop_square(0, 1)?, 14);
        assert_eq!(stacker.drop_square(0, 8)?, 22);
        Ok(())
    }

    #[test]
    fn stacks_saturate_at_max_height() -> SegResult<()> {
        let tree = DynamicSegmentTree::new(0, 100, i64::MAX - 3)?;
        let mut stacker = SquareStacker::with_tree(tree);
        assert_eq!(stacker.drop_square(0, 5)?, i64::MAX);
        assert_eq!(stacker.drop_square(2, 5)?, i64::MAX);
        Ok(())
    }

    #[test]
    fn invalid_squares_fail() {
        let mut stacker = SquareStacker::new();
        assert!(stacker.drop_square(1, 0).is_err());
        assert!(stacker
            .drop_square(DEFAULT_HI, 2)
            .unwrap_err()
            .is_out_of_range());
        assert!(stacker.drop_square(i64::MAX, 2).unwrap_err().is_out_of_range());
    }
}
