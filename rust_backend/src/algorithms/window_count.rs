use crate::core::domain::Timeline;
use crate::error::AlignmentResult;
use crate::time::Interval;

/// Number of timeline entries spanned by one interval from the first date.
///
/// Counts the entries strictly before `timeline.first() + interval`. The
/// result is the fixed length, in samples, of every classification window.
///
/// # Examples
///
/// ```
/// use sits_timeline::algorithms::num_samples;
/// use sits_timeline::core::domain::Timeline;
/// use sits_timeline::time::Interval;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
/// let dates = (0..46).map(|i| start + chrono::Days::new(16 * i)).collect();
/// let timeline = Timeline::new(dates).unwrap();
///
/// assert_eq!(num_samples(&timeline, &Interval::months(12).unwrap()).unwrap(), 23);
/// ```
pub fn num_samples(timeline: &Timeline, interval: &Interval) -> AlignmentResult<usize> {
    let next_date = interval.advance(timeline.first())?;
    // `first < next_date` for any positive interval, so the count is at least 1
    Ok(timeline.count_before(next_date).max(1))
}
