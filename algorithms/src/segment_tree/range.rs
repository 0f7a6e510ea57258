use std::ops::RangeInclusive;

/// Helpers on the inclusive coordinate ranges a tree node covers.
/// All ranges handled here are interpreted as `start..=end`,
/// a range with `start > end` is empty.
pub trait RangeExt {
    /// A range is splittable if it contains at least two positions.
    fn is_splittable(&self) -> bool;

    /// A range is considered normal if `range.start() <= range.end()` holds.
    fn is_normal(&self) -> bool;

    /// Splits the range into two non empty halves, the left one being at most one position larger.
    fn split(&self) -> Option<(Self, Self)>
    where
        Self: Sized;

    fn intersects(&self, rhs: &Self) -> bool;

    fn is_superset(&self, other: &Self) -> bool;

    /// The part of self which does not extend beyond other, `None` if there is none.
    fn clamped_by(&self, other: &Self) -> Option<Self>
    where
        Self: Sized;
}

impl RangeExt for RangeInclusive<i64> {
    fn is_splittable(&self) -> bool {
        self.start() < self.end()
    }

    fn is_normal(&self) -> bool {
        self.start() <= self.end()
    }

    fn split(&self) -> Option<(Self, Self)>
    where
        Self: Sized,
    {
        if self.is_splittable() {
            // i128 as start + end might leave i64
            let mid = (*self.start() as i128 + *self.end() as i128).div_euclid(2) as i64;
            Some((*self.start()..=mid, mid + 1..=*self.end()))
        } else {
            None
        }
    }

    fn intersects(&self, rhs: &Self) -> bool {
        self.is_normal()
            && rhs.is_normal()
            && self.start() <= rhs.end()
            && rhs.start() <= self.end()
    }

    fn is_superset(&self, other: &Self) -> bool {
        !other.is_normal() || (self.start() <= other.start() && other.end() <= self.end())
    }

    fn clamped_by(&self, other: &Self) -> Option<Self> {
        if self.intersects(other) {
            Some(*self.start().max(other.start())..=*self.end().min(other.end()))
        } else {
            None
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::RangeExt;
    use std::ops::RangeInclusive;

    use proptest::prelude::*;

    prop_compose! {
        fn normal_range()(a in prop::num::i64::ANY,
                          b in prop::num::i64::ANY)
            -> RangeInclusive<i64> {
            a.min(b)..=a.max(b)
        }
    }

    prop_compose! {
        fn empty_range()(a in prop::num::i64::ANY,
                         b in prop::num::i64::ANY)
            -> RangeInclusive<i64> {
            // equal bounds would give a single position, so shift
            if a == b {
                a.saturating_add(1)..=a.saturating_add(1) - 1
            } else {
                a.max(b)..=a.min(b)
            }
        }
    }

    #[test]
    fn split_halves_cover_the_range() {
        assert_eq!((0..=9).split(), Some((0..=4, 5..=9)));
        assert_eq!((-3..=-2).split(), Some((-3..=-3, -2..=-2)));
        assert_eq!((7..=7).split(), None);
        assert_eq!(
            (i64::MIN..=i64::MAX).split(),
            Some((i64::MIN..=-1, 0..=i64::MAX))
        );
    }

    proptest! {
        #[test]
        fn split_gives_adjacent_non_empty_halves(range in normal_range()) {
            prop_assume!(range.is_splittable());
            let (left, right) = range.split().unwrap();
            prop_assert!(left.is_normal());
            prop_assert!(right.is_normal());
            prop_assert_eq!(left.start(), range.start());
            prop_assert_eq!(right.end(), range.end());
            prop_assert_eq!(*left.end() + 1, *right.start());
            prop_assert!(!left.intersects(&right));
        }

        #[test]
        fn clamped_by_leaves_subset_of_both(l in normal_range(), r in normal_range()) {
            match l.clamped_by(&r) {
                Some(clamped) => {
                    prop_assert!(clamped.is_normal());
                    prop_assert!(l.is_superset(&clamped));
                    prop_assert!(r.is_superset(&clamped));
                }
                None => prop_assert!(!l.intersects(&r)),
            }
        }

        #[test]
        fn superset_intersects_when_non_empty(l in normal_range(), r in normal_range()) {
            prop_assume!(l.is_superset(&r));
            prop_assert!(l.intersects(&r));
        }

        #[test]
        fn nothing_intersects_empty_range(l in normal_range(), r in empty_range()) {
            prop_assert!(!l.intersects(&r));
            prop_assert!(!r.intersects(&l));
        }

        #[test]
        fn every_thing_is_superset_of_empty_range(l in normal_range(), r in empty_range()) {
            prop_assert!(l.is_superset(&r));
        }
    }
}
