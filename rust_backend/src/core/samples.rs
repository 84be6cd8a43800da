//! Labelled training samples and the per-band time series they carry.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::ReferenceWindow;
use crate::error::{AlignmentError, AlignmentResult};

/// Values of one band over a time series, aligned with [`TimeSeries::index`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandValues {
    pub name: String,
    pub values: Vec<f64>,
}

/// A per-observation table: one date column plus one value column per band.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    pub index: Vec<NaiveDate>,
    #[serde(default)]
    pub bands: Vec<BandValues>,
}

impl TimeSeries {
    pub fn band_names(&self) -> Vec<String> {
        self.bands.iter().map(|band| band.name.clone()).collect()
    }

    pub fn band(&self, name: &str) -> Option<&[f64]> {
        self.bands
            .iter()
            .find(|band| band.name == name)
            .map(|band| band.values.as_slice())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// One labelled training sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub latitude: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub label: String,
    #[serde(default)]
    pub coverage: String,
    #[serde(default)]
    pub time_series: TimeSeries,
}

impl TrainingSample {
    pub fn reference_window(&self) -> ReferenceWindow {
        ReferenceWindow::new(self.start_date, self.end_date)
    }
}

/// How the reference window is chosen from a set of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// The first sample of the set.
    #[default]
    First,
    /// The most frequent (start, end) pair; the earliest occurrence wins ties.
    MostCommon,
}

/// An ordered collection of training samples.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleSet {
    samples: Vec<TrainingSample>,
}

impl SampleSet {
    pub fn new(samples: Vec<TrainingSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[TrainingSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Band names in the order of the first sample's time series.
    pub fn bands(&self) -> AlignmentResult<Vec<String>> {
        let first = self.first_sample()?;
        let bands = first.time_series.band_names();
        if bands.is_empty() {
            return Err(AlignmentError::EmptySamples(
                "the first sample carries no bands".to_string(),
            ));
        }
        Ok(bands)
    }

    /// Distinct labels, sorted.
    pub fn labels(&self) -> Vec<String> {
        self.samples
            .iter()
            .map(|sample| sample.label.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Reference start/end pair under `policy`.
    pub fn reference_window(&self, policy: ReferencePolicy) -> AlignmentResult<ReferenceWindow> {
        match policy {
            ReferencePolicy::First => Ok(self.first_sample()?.reference_window()),
            ReferencePolicy::MostCommon => {
                self.first_sample()?;

                let mut counts: HashMap<ReferenceWindow, (usize, usize)> = HashMap::new();
                for (position, sample) in self.samples.iter().enumerate() {
                    counts
                        .entry(sample.reference_window())
                        .or_insert((0, position))
                        .0 += 1;
                }

                counts
                    .into_iter()
                    .max_by(|(_, (count_a, pos_a)), (_, (count_b, pos_b))| {
                        count_a.cmp(count_b).then(pos_b.cmp(pos_a))
                    })
                    .map(|(window, _)| window)
                    .ok_or_else(|| AlignmentError::EmptySamples("no samples".to_string()))
            }
        }
    }

    fn first_sample(&self) -> AlignmentResult<&TrainingSample> {
        self.samples.first().ok_or_else(|| {
            AlignmentError::EmptySamples("at least one training sample is required".to_string())
        })
    }
}

impl From<Vec<TrainingSample>> for SampleSet {
    fn from(samples: Vec<TrainingSample>) -> Self {
        Self::new(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample(label: &str, start: NaiveDate, end: NaiveDate) -> TrainingSample {
        TrainingSample {
            longitude: -55.0,
            latitude: -11.0,
            start_date: start,
            end_date: end,
            label: label.to_string(),
            coverage: "MOD13Q1".to_string(),
            time_series: TimeSeries {
                index: vec![start, end],
                bands: vec![
                    BandValues {
                        name: "ndvi".to_string(),
                        values: vec![0.5, 0.6],
                    },
                    BandValues {
                        name: "evi".to_string(),
                        values: vec![0.3, 0.4],
                    },
                ],
            },
        }
    }

    #[test]
    fn test_bands_keep_series_order() {
        let set = SampleSet::new(vec![sample("Forest", date(2000, 8, 13), date(2001, 8, 9))]);
        assert_eq!(set.bands().unwrap(), vec!["ndvi", "evi"]);
        assert_eq!(set.samples()[0].time_series.band("evi"), Some(&[0.3, 0.4][..]));
    }

    #[test]
    fn test_labels_are_sorted_and_unique() {
        let set = SampleSet::new(vec![
            sample("Pasture", date(2000, 8, 13), date(2001, 8, 9)),
            sample("Forest", date(2000, 8, 13), date(2001, 8, 9)),
            sample("Pasture", date(2001, 8, 13), date(2002, 8, 9)),
        ]);
        assert_eq!(set.labels(), vec!["Forest", "Pasture"]);
    }

    #[test]
    fn test_reference_policies() {
        let set = SampleSet::new(vec![
            sample("Forest", date(2000, 9, 1), date(2001, 8, 31)),
            sample("Forest", date(2000, 8, 13), date(2001, 8, 9)),
            sample("Pasture", date(2000, 8, 13), date(2001, 8, 9)),
        ]);

        let first = set.reference_window(ReferencePolicy::First).unwrap();
        assert_eq!(first.start_date, date(2000, 9, 1));

        let common = set.reference_window(ReferencePolicy::MostCommon).unwrap();
        assert_eq!(common.start_date, date(2000, 8, 13));
    }

    #[test]
    fn test_most_common_tie_keeps_earliest() {
        let set = SampleSet::new(vec![
            sample("Forest", date(2000, 9, 1), date(2001, 8, 31)),
            sample("Forest", date(2000, 8, 13), date(2001, 8, 9)),
        ]);
        let common = set.reference_window(ReferencePolicy::MostCommon).unwrap();
        assert_eq!(common.start_date, date(2000, 9, 1));
    }

    #[test]
    fn test_empty_set_errors() {
        let set = SampleSet::default();
        assert!(matches!(set.bands(), Err(AlignmentError::EmptySamples(_))));
        assert!(set.reference_window(ReferencePolicy::MostCommon).is_err());
        assert!(set.labels().is_empty());
    }
}
