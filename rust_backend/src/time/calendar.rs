use chrono::{Datelike, NaiveDate};

/// Signed number of days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Builds a date in `year` carrying the month and day-of-month of `phase`.
///
/// Days that do not exist in the target month are clamped to its last day,
/// so a Feb 29 phase lands on Feb 28 in common years.
///
/// # Examples
///
/// ```
/// use sits_timeline::time::calendar::date_with_phase;
/// use chrono::NaiveDate;
///
/// let phase = NaiveDate::from_ymd_opt(2004, 2, 29).unwrap();
/// assert_eq!(
///     date_with_phase(2001, phase),
///     Some(NaiveDate::from_ymd_opt(2001, 2, 28).unwrap())
/// );
/// ```
pub fn date_with_phase(year: i32, phase: NaiveDate) -> Option<NaiveDate> {
    let month = phase.month();
    (1..=phase.day())
        .rev()
        .find_map(|day| NaiveDate::from_ymd_opt(year, month, day))
}

/// Parses a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Timestamps keep only their calendar date; the time of day is dropped.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.date_naive());
    }
    chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|datetime| datetime.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_between_is_signed() {
        assert_eq!(days_between(date(2000, 1, 1), date(2000, 1, 17)), 16);
        assert_eq!(days_between(date(2000, 1, 17), date(2000, 1, 1)), -16);
    }

    #[test]
    fn test_date_with_phase() {
        assert_eq!(date_with_phase(2000, date(2013, 8, 13)), Some(date(2000, 8, 13)));
        assert_eq!(date_with_phase(2003, date(2000, 2, 29)), Some(date(2003, 2, 28)));
        assert_eq!(date_with_phase(2004, date(2000, 2, 29)), Some(date(2004, 2, 29)));
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2000-02-18"), Some(date(2000, 2, 18)));
        assert_eq!(parse_date(" 2000-02-18 "), Some(date(2000, 2, 18)));
        assert_eq!(parse_date("2000-02-18T10:30:00Z"), Some(date(2000, 2, 18)));
        assert_eq!(parse_date("2000-02-18T10:30:00"), Some(date(2000, 2, 18)));
        assert_eq!(parse_date("18/02/2000"), None);
    }
}
