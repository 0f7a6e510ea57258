//! This crate contains helper functions that are used exclusively in defining binaries, that is
//! main functions.
use std::str::FromStr;

use algorithms::scheduling::{
    BoundedOverlapCalendar, OverlapCounter, SingleBookingCalendar, SquareStacker,
};
use common::{SegError, SegResult};
use indicatif::ProgressIterator;
use serde::Serialize;

pub mod config;
use config::ReplayConfig;

/// Which calendar the bookings are replayed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarKind {
    /// No two bookings may overlap.
    Single,
    /// At most `max_overlap` of the config may overlap.
    Bounded,
    /// Every booking is accepted, the maximum overlap is reported.
    Counter,
}

impl CalendarKind {
    /// The names accepted by [FromStr].
    pub const VARIANTS: &'static [&'static str] = &["single", "bounded", "counter"];

    /// The name used on the command line and in output files.
    pub fn name(self) -> &'static str {
        match self {
            CalendarKind::Single => "single",
            CalendarKind::Bounded => "bounded",
            CalendarKind::Counter => "counter",
        }
    }
}

impl FromStr for CalendarKind {
    type Err = SegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(CalendarKind::Single),
            "bounded" => Ok(CalendarKind::Bounded),
            "counter" => Ok(CalendarKind::Counter),
            other => Err(format!(
                "Unknown calendar kind {}, expected one of {:?}",
                other,
                CalendarKind::VARIANTS
            )
            .into()),
        }
    }
}

/// The answers of a calendar to a list of bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BookingOutcome {
    /// Whether each booking was accepted.
    Accepted(Vec<bool>),
    /// The maximum overlap after each booking.
    Overlaps(Vec<i64>),
}

/// Books every `(start, end)` in order.
/// # Returns
/// - An `Err` as soon as one booking is empty or leaves the configured borders.
pub fn replay_bookings(
    kind: CalendarKind,
    config: &ReplayConfig,
    bookings: &[(i64, i64)],
) -> SegResult<BookingOutcome> {
    let tree = config.tree()?;
    match kind {
        CalendarKind::Single => {
            let mut calendar = SingleBookingCalendar::with_tree(tree);
            bookings
                .iter()
                .progress()
                .map(|&(start, end)| calendar.book(start, end))
                .collect::<SegResult<_>>()
                .map(BookingOutcome::Accepted)
        }
        CalendarKind::Bounded => {
            let mut calendar = BoundedOverlapCalendar::with_tree(config.max_overlap, tree);
            bookings
                .iter()
                .progress()
                .map(|&(start, end)| calendar.book(start, end))
                .collect::<SegResult<_>>()
                .map(BookingOutcome::Accepted)
        }
        CalendarKind::Counter => {
            let mut counter = OverlapCounter::with_tree(tree);
            bookings
                .iter()
                .progress()
                .map(|&(start, end)| counter.book(start, end))
                .collect::<SegResult<_>>()
                .map(BookingOutcome::Overlaps)
        }
    }
}

/// Drops every `(left, side)` square in order and gives the highest stack after each.
pub fn replay_squares(config: &ReplayConfig, squares: &[(i64, i64)]) -> SegResult<Vec<i64>> {
    let mut stacker = SquareStacker::with_tree(config.tree()?);
    squares
        .iter()
        .progress()
        .map(|&(left, side)| stacker.drop_square(left, side))
        .collect()
}
