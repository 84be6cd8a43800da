//! The per-job classification aggregate.

use log::info;
use serde::{Deserialize, Serialize};

use super::domain::{DateWindow, IndexWindow, ReferenceWindow, Timeline};
use super::samples::{ReferencePolicy, SampleSet};
use crate::algorithms::matching::match_timeline_with_count;
use crate::algorithms::{match_indexes, num_samples};
use crate::error::AlignmentResult;
use crate::time::Interval;

/// Everything a classification job needs to slice per-window features.
///
/// Built once from the training samples and the timeline of the data being
/// classified, then only read. Both the time-index derivation and the
/// selection-mask construction take it by reference.
///
/// # Examples
///
/// ```
/// use sits_timeline::core::{ClassificationInfo, ReferencePolicy, SampleSet, TrainingSample};
/// use sits_timeline::core::samples::{BandValues, TimeSeries};
/// use sits_timeline::core::domain::Timeline;
/// use sits_timeline::time::Interval;
/// use chrono::{Days, NaiveDate};
///
/// let first = NaiveDate::from_ymd_opt(2000, 2, 18).unwrap();
/// let timeline = Timeline::new((0..69).map(|i| first + Days::new(16 * i)).collect()).unwrap();
///
/// let start = NaiveDate::from_ymd_opt(2000, 9, 13).unwrap();
/// let end = NaiveDate::from_ymd_opt(2001, 8, 29).unwrap();
/// let samples = SampleSet::new(vec![TrainingSample {
///     longitude: -55.2,
///     latitude: -11.7,
///     start_date: start,
///     end_date: end,
///     label: "Forest".to_string(),
///     coverage: "MOD13Q1".to_string(),
///     time_series: TimeSeries {
///         index: vec![start, end],
///         bands: vec![BandValues { name: "ndvi".to_string(), values: vec![0.8, 0.7] }],
///     },
/// }]);
///
/// let info = ClassificationInfo::build(
///     &samples,
///     timeline,
///     Interval::months(12).unwrap(),
///     ReferencePolicy::First,
/// )
/// .unwrap();
///
/// assert_eq!(info.bands(), ["ndvi"]);
/// assert_eq!(info.date_windows().len(), info.index_windows().len());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationInfo {
    bands: Vec<String>,
    labels: Vec<String>,
    interval: Interval,
    timeline: Timeline,
    reference: ReferenceWindow,
    num_samples: usize,
    date_windows: Vec<DateWindow>,
    index_windows: Vec<IndexWindow>,
}

impl ClassificationInfo {
    /// Derives the windows for `timeline` from the reference window of `samples`.
    pub fn build(
        samples: &SampleSet,
        timeline: Timeline,
        interval: Interval,
        policy: ReferencePolicy,
    ) -> AlignmentResult<Self> {
        let bands = samples.bands()?;
        let labels = samples.labels();
        let reference = samples.reference_window(policy)?;

        Self::from_parts(bands, labels, timeline, reference, interval)
    }

    /// Builds the aggregate from explicit bands, labels and reference window.
    pub fn from_parts(
        bands: Vec<String>,
        labels: Vec<String>,
        timeline: Timeline,
        reference: ReferenceWindow,
        interval: Interval,
    ) -> AlignmentResult<Self> {
        let num_samples = num_samples(&timeline, &interval)?;
        let date_windows =
            match_timeline_with_count(&timeline, reference.start_date, &interval, num_samples)?;
        let index_windows = match_indexes(&timeline, &date_windows)?;

        info!(
            "Classification info: {} bands, {} labels, {} timeline dates, {} windows of {} samples",
            bands.len(),
            labels.len(),
            timeline.len(),
            date_windows.len(),
            num_samples
        );

        Ok(Self {
            bands,
            labels,
            interval,
            timeline,
            reference,
            num_samples,
            date_windows,
            index_windows,
        })
    }

    pub fn bands(&self) -> &[String] {
        &self.bands
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn reference(&self) -> &ReferenceWindow {
        &self.reference
    }

    /// Timeline entries per classification window.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn date_windows(&self) -> &[DateWindow] {
        &self.date_windows
    }

    pub fn index_windows(&self) -> &[IndexWindow] {
        &self.index_windows
    }

    pub fn num_windows(&self) -> usize {
        self.date_windows.len()
    }
}
