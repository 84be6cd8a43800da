use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::layout::{FlatLayout, SelectionLayout};
use crate::core::domain::{IndexWindow, Timeline};
use crate::core::ClassificationInfo;

/// Per-band (start, end) flat indexes of one window.
///
/// Stored as `[b0_start, b0_end, b1_start, b1_end, ...]`, each pair already
/// shifted by `band × timeline_len`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeIndex(Vec<usize>);

impl TimeIndex {
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn num_bands(&self) -> usize {
        self.0.len() / 2
    }

    /// Inclusive flat range of `band`.
    pub fn band_range(&self, band: usize) -> Option<RangeInclusive<usize>> {
        let start = *self.0.get(2 * band)?;
        let end = *self.0.get(2 * band + 1)?;
        Some(start..=end)
    }

    /// All band ranges in band order.
    pub fn band_ranges(&self) -> impl Iterator<Item = RangeInclusive<usize>> + '_ {
        self.0.chunks_exact(2).map(|pair| pair[0]..=pair[1])
    }
}

impl From<Vec<usize>> for TimeIndex {
    fn from(values: Vec<usize>) -> Self {
        Self(values)
    }
}

/// Maps each index window onto the flattened all-bands layout.
///
/// For band `i`, the window `(s, e)` becomes `(s + i·len, e + i·len)` where
/// `len` is the timeline length.
///
/// # Examples
///
/// ```
/// use sits_timeline::core::domain::{IndexWindow, Timeline};
/// use sits_timeline::transformations::build_time_index;
/// use chrono::{Days, NaiveDate};
///
/// let first = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
/// let timeline = Timeline::new((0..10).map(|i| first + Days::new(16 * i)).collect()).unwrap();
/// let bands = vec!["ndvi".to_string(), "evi".to_string()];
///
/// let indexes = build_time_index(&[IndexWindow::new(2, 5)], &timeline, &bands);
/// assert_eq!(indexes[0].as_slice(), &[2, 5, 12, 15]);
/// ```
pub fn build_time_index(
    index_windows: &[IndexWindow],
    timeline: &Timeline,
    bands: &[String],
) -> Vec<TimeIndex> {
    let layout = FlatLayout::new(bands.len(), timeline.len(), SelectionLayout::Raster);
    index_windows
        .iter()
        .map(|window| {
            let pairs = (0..bands.len())
                .flat_map(|band| {
                    [
                        layout.flat_index(band, window.start),
                        layout.flat_index(band, window.end),
                    ]
                })
                .collect();
            TimeIndex(pairs)
        })
        .collect()
}

/// Time indexes for every window of a classification job.
pub fn time_indexes_for(info: &ClassificationInfo) -> Vec<TimeIndex> {
    build_time_index(info.index_windows(), info.timeline(), info.bands())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn timeline(len: u64) -> Timeline {
        let first = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        Timeline::new((0..len).map(|i| first + Days::new(16 * i)).collect()).unwrap()
    }

    fn bands(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_offsets_per_band() {
        let windows = vec![IndexWindow::new(0, 3), IndexWindow::new(4, 7)];
        let indexes = build_time_index(&windows, &timeline(12), &bands(&["ndvi", "evi", "nir"]));

        assert_eq!(indexes.len(), 2);
        assert_eq!(indexes[0].as_slice(), &[0, 3, 12, 15, 24, 27]);
        assert_eq!(indexes[1].as_slice(), &[4, 7, 16, 19, 28, 31]);
        assert_eq!(indexes[1].num_bands(), 3);
        assert_eq!(indexes[1].band_range(2), Some(28..=31));
        assert_eq!(indexes[1].band_range(3), None);
    }

    #[test]
    fn test_band_ranges_iterates_pairs() {
        let index = TimeIndex::from(vec![1, 2, 11, 12]);
        let ranges: Vec<_> = index.band_ranges().collect();
        assert_eq!(ranges, vec![1..=2, 11..=12]);
    }

    #[test]
    fn test_no_bands_gives_empty_index() {
        let indexes = build_time_index(&[IndexWindow::new(0, 3)], &timeline(5), &[]);
        assert!(indexes[0].as_slice().is_empty());
    }
}
