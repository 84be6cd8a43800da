//! Domain models for observation timelines and classification windows.
//!
//! A [`Timeline`] is the ordered list of acquisition dates of one coverage or
//! one sample series. Windows over it come in two flavours that mirror each
//! other: [`DateWindow`] (calendar dates) and [`IndexWindow`] (0-based
//! positions into the same timeline).

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AlignmentError, AlignmentResult};
use crate::time::days_between;

/// Ordered sequence of unique observation dates.
///
/// Construction sorts and de-duplicates the input and rejects timelines with
/// fewer than two dates, since the sampling cadence is read from the first
/// and last pairs of entries.
///
/// # Examples
///
/// ```
/// use sits_timeline::core::domain::Timeline;
/// use chrono::NaiveDate;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2000, m, day).unwrap();
/// let timeline = Timeline::new(vec![d(1, 17), d(1, 1), d(1, 17), d(2, 2)]).unwrap();
///
/// assert_eq!(timeline.len(), 3);
/// assert_eq!(timeline.first(), d(1, 1));
/// assert_eq!(timeline.start_cadence_days(), 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<NaiveDate>", into = "Vec<NaiveDate>")]
pub struct Timeline {
    dates: Vec<NaiveDate>,
}

impl Timeline {
    pub fn new(mut dates: Vec<NaiveDate>) -> AlignmentResult<Self> {
        dates.sort_unstable();
        dates.dedup();

        if dates.len() < 2 {
            return Err(AlignmentError::InvalidTimeline(format!(
                "a timeline needs at least two distinct dates, got {}",
                dates.len()
            )));
        }

        Ok(Self { dates })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false for a constructed timeline.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn last(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    pub fn get(&self, index: usize) -> Option<NaiveDate> {
        self.dates.get(index).copied()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.position(date).is_some()
    }

    /// Exact position of `date` in the timeline.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    /// Position of the entry closest to `date`.
    ///
    /// When two entries are equally distant the earlier one wins, matching a
    /// left-to-right scan that keeps the first minimum.
    pub fn nearest_index(&self, date: NaiveDate) -> usize {
        let after = self.dates.partition_point(|d| *d < date);
        if after == 0 {
            return 0;
        }
        if after == self.dates.len() {
            return self.dates.len() - 1;
        }

        let before = after - 1;
        let gap_before = days_between(self.dates[before], date);
        let gap_after = days_between(date, self.dates[after]);
        if gap_after < gap_before {
            after
        } else {
            before
        }
    }

    /// Number of entries strictly before `date`.
    pub fn count_before(&self, date: NaiveDate) -> usize {
        self.dates.partition_point(|d| *d < date)
    }

    /// Days between the first two entries.
    pub fn start_cadence_days(&self) -> i64 {
        days_between(self.dates[0], self.dates[1])
    }

    /// Days between the last two entries.
    pub fn end_cadence_days(&self) -> i64 {
        let n = self.dates.len();
        days_between(self.dates[n - 2], self.dates[n - 1])
    }

    /// Day gaps between consecutive entries.
    pub fn steps(&self) -> impl Iterator<Item = i64> + '_ {
        self.dates.windows(2).map(|pair| days_between(pair[0], pair[1]))
    }
}

impl TryFrom<Vec<NaiveDate>> for Timeline {
    type Error = AlignmentError;

    fn try_from(dates: Vec<NaiveDate>) -> Result<Self, Self::Error> {
        Timeline::new(dates)
    }
}

impl From<Timeline> for Vec<NaiveDate> {
    fn from(timeline: Timeline) -> Self {
        timeline.dates
    }
}

/// One classification window expressed in timeline dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.start, self.end)
    }
}

/// One classification window expressed as inclusive 0-based timeline positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexWindow {
    pub start: usize,
    pub end: usize,
}

impl IndexWindow {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of timeline entries covered, both ends included.
    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Canonical start/end pair of a training sample.
///
/// Its length defines how long a classification window is, and its
/// month/day-of-month defines where windows start within each year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ReferenceWindow {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn duration_days(&self) -> i64 {
        days_between(self.start_date, self.end_date)
    }
}
