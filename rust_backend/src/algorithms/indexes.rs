use chrono::NaiveDate;

use crate::core::domain::{DateWindow, IndexWindow, Timeline};
use crate::error::{AlignmentError, AlignmentResult};

/// Converts date windows into 0-based index windows over `timeline`.
///
/// Lookups are exact: the windows come from the same timeline, so a missing
/// date means the windows and the timeline have drifted apart.
pub fn match_indexes(
    timeline: &Timeline,
    date_windows: &[DateWindow],
) -> AlignmentResult<Vec<IndexWindow>> {
    date_windows
        .iter()
        .enumerate()
        .map(|(window, dates)| -> AlignmentResult<IndexWindow> {
            let locate = |date: NaiveDate| {
                timeline
                    .position(date)
                    .ok_or(AlignmentError::DateNotFound { date, window })
            };
            Ok(IndexWindow::new(locate(dates.start)?, locate(dates.end)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timeline() -> Timeline {
        Timeline::new(vec![
            date(2000, 1, 1),
            date(2000, 1, 17),
            date(2000, 2, 2),
            date(2000, 2, 18),
            date(2000, 3, 5),
        ])
        .unwrap()
    }

    #[test]
    fn test_maps_dates_to_positions() {
        let windows = vec![
            DateWindow::new(date(2000, 1, 1), date(2000, 2, 2)),
            DateWindow::new(date(2000, 2, 2), date(2000, 3, 5)),
        ];
        let indexes = match_indexes(&timeline(), &windows).unwrap();
        assert_eq!(indexes, vec![IndexWindow::new(0, 2), IndexWindow::new(2, 4)]);
    }

    #[test]
    fn test_missing_date_names_window() {
        let windows = vec![
            DateWindow::new(date(2000, 1, 1), date(2000, 2, 2)),
            DateWindow::new(date(2000, 2, 2), date(2000, 3, 6)),
        ];
        let err = match_indexes(&timeline(), &windows).unwrap_err();
        match err {
            AlignmentError::DateNotFound { date: missing, window } => {
                assert_eq!(missing, date(2000, 3, 6));
                assert_eq!(window, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_windows() {
        assert!(match_indexes(&timeline(), &[]).unwrap().is_empty());
    }
}
