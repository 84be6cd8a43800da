//! Tiling a timeline with classification windows.
//!
//! The reference sample fixes two things: the phase of each window (its
//! month and day-of-month) and, through the interval, its length in samples.
//! The matcher places the first window at the reference phase in the first
//! year of the timeline, or in the following year when that phase falls
//! before the coverage starts. It then steps forward one interval at a time,
//! snapping each estimated start to the nearest acquisition date.

use chrono::{Datelike, NaiveDate};
use log::{debug, warn};

use super::validity::{ensure_valid_end, ensure_valid_start, is_valid_start_date};
use super::window_count::num_samples;
use crate::core::domain::{DateWindow, Timeline};
use crate::error::{AlignmentError, AlignmentResult};
use crate::time::{date_with_phase, Interval};

/// Splits `timeline` into windows of equal sample count following the reference phase.
///
/// `ref_end_date` is carried for symmetry with the reference window; window
/// length comes from the interval, not from the reference end.
///
/// Consecutive windows never share more than one date: a window may start on
/// the date the previous one ends on.
///
/// # Errors
///
/// * [`AlignmentError::MisalignedStart`] if the phase-estimated first start is more than
///   one cadence step outside the timeline in both the first and the following year
/// * [`AlignmentError::WindowOverflow`] if not even one full window fits
/// * [`AlignmentError::MisalignedEnd`] if the last window ends too far off the timeline
///
/// # Examples
///
/// ```
/// use sits_timeline::algorithms::match_timeline;
/// use sits_timeline::core::domain::Timeline;
/// use sits_timeline::time::Interval;
/// use chrono::NaiveDate;
///
/// let first = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
/// let last = NaiveDate::from_ymd_opt(2002, 12, 31).unwrap();
/// let timeline = Timeline::new(first.iter_days().take_while(|d| *d <= last).collect()).unwrap();
///
/// let windows = match_timeline(
///     &timeline,
///     NaiveDate::from_ymd_opt(2000, 8, 13).unwrap(),
///     NaiveDate::from_ymd_opt(2001, 8, 9).unwrap(),
///     &Interval::months(12).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(windows.len(), 2);
/// assert_eq!(windows[0].start, NaiveDate::from_ymd_opt(2000, 8, 13).unwrap());
/// ```
pub fn match_timeline(
    timeline: &Timeline,
    ref_start_date: NaiveDate,
    ref_end_date: NaiveDate,
    interval: &Interval,
) -> AlignmentResult<Vec<DateWindow>> {
    let samples_per_window = num_samples(timeline, interval)?;
    debug!(
        "Matching timeline of {} dates ({} .. {}) with reference {} .. {}, interval {}, {} samples per window",
        timeline.len(),
        timeline.first(),
        timeline.last(),
        ref_start_date,
        ref_end_date,
        interval,
        samples_per_window
    );
    match_timeline_with_count(timeline, ref_start_date, interval, samples_per_window)
}

/// Window tiling with an already-derived window count.
pub(crate) fn match_timeline_with_count(
    timeline: &Timeline,
    ref_start_date: NaiveDate,
    interval: &Interval,
    samples_per_window: usize,
) -> AlignmentResult<Vec<DateWindow>> {
    let estimated_start = estimate_start(timeline, ref_start_date)?;

    let mut start_index = timeline.nearest_index(estimated_start);
    let start_date = timeline.dates()[start_index];

    let mut end_index = match window_end(start_index, samples_per_window, timeline) {
        Some(end) => end,
        None => {
            return Err(AlignmentError::WindowOverflow {
                start_date,
                start_index,
                num_samples: samples_per_window,
                timeline_len: timeline.len(),
            })
        }
    };

    let dates = timeline.dates();
    let mut windows = Vec::new();
    loop {
        let window = DateWindow::new(dates[start_index], dates[end_index]);
        debug!("Window {}: {} (indexes {}..={})", windows.len(), window, start_index, end_index);
        windows.push(window);

        let estimated_next = interval.advance(dates[start_index])?;
        let mut next_index = timeline.nearest_index(estimated_next);
        if next_index <= start_index {
            warn!(
                "Interval {} does not advance past {} on this timeline; stepping one sample forward",
                interval, dates[start_index]
            );
            next_index = start_index + 1;
        }

        match window_end(next_index, samples_per_window, timeline) {
            Some(end) => {
                start_index = next_index;
                end_index = end;
            }
            None => break,
        }
    }

    ensure_valid_end(dates[end_index], timeline)?;
    Ok(windows)
}

/// Reference phase in the timeline's first year, or in the next year when the
/// first-year date precedes the coverage by more than one cadence step.
///
/// Snapped dates are always in bounds, so validity is checked on the estimate.
fn estimate_start(timeline: &Timeline, ref_start_date: NaiveDate) -> AlignmentResult<NaiveDate> {
    let year = timeline.first().year();
    let first_year = date_with_phase(year, ref_start_date).ok_or(AlignmentError::MisalignedStart {
        date: ref_start_date,
        first: timeline.first(),
        last: timeline.last(),
        cadence_days: timeline.start_cadence_days(),
    })?;
    if is_valid_start_date(first_year, timeline) {
        return Ok(first_year);
    }

    if first_year < timeline.first() {
        if let Some(next_year) = date_with_phase(year + 1, ref_start_date) {
            if is_valid_start_date(next_year, timeline) {
                debug!(
                    "Phase {} precedes the timeline start {}; starting at {}",
                    first_year,
                    timeline.first(),
                    next_year
                );
                return Ok(next_year);
            }
        }
    }

    ensure_valid_start(first_year, timeline)?;
    Ok(first_year)
}

/// Index of the last entry of a window starting at `start_index`, if it exists.
fn window_end(start_index: usize, samples_per_window: usize, timeline: &Timeline) -> Option<usize> {
    let end = start_index.checked_add(samples_per_window)?.checked_sub(1)?;
    (end < timeline.len()).then_some(end)
}
