//! Boundary checks for window start and end dates.
//!
//! A date inside the timeline bounds is always accepted. Outside, it is
//! accepted only when it sits at most one sampling step away from the
//! nearest bound, with the step read from the two entries at that end.
//! Irregular timelines make this an approximation; see
//! [`crate::preprocessing::validator`] for the cadence report.

use chrono::NaiveDate;

use crate::core::domain::Timeline;
use crate::error::{AlignmentError, AlignmentResult};
use crate::time::days_between;

/// True when `date` is an acceptable window start for `timeline`.
pub fn is_valid_start_date(date: NaiveDate, timeline: &Timeline) -> bool {
    if date >= timeline.first() && date <= timeline.last() {
        return true;
    }
    days_between(timeline.first(), date).abs() <= timeline.start_cadence_days()
}

/// True when `date` is an acceptable window end for `timeline`.
pub fn is_valid_end_date(date: NaiveDate, timeline: &Timeline) -> bool {
    if date >= timeline.first() && date <= timeline.last() {
        return true;
    }
    days_between(timeline.last(), date).abs() <= timeline.end_cadence_days()
}

pub(crate) fn ensure_valid_start(date: NaiveDate, timeline: &Timeline) -> AlignmentResult<()> {
    if is_valid_start_date(date, timeline) {
        return Ok(());
    }
    Err(AlignmentError::MisalignedStart {
        date,
        first: timeline.first(),
        last: timeline.last(),
        cadence_days: timeline.start_cadence_days(),
    })
}

pub(crate) fn ensure_valid_end(date: NaiveDate, timeline: &Timeline) -> AlignmentResult<()> {
    if is_valid_end_date(date, timeline) {
        return Ok(());
    }
    Err(AlignmentError::MisalignedEnd {
        date,
        first: timeline.first(),
        last: timeline.last(),
        cadence_days: timeline.end_cadence_days(),
    })
}
