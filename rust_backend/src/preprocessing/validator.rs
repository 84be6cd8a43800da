//! Timeline and training-sample validation with detailed error and warning reporting.
//!
//! Nothing here aborts a job: problems that would make the alignment fail
//! later are reported as errors, data-quality oddities as warnings, so a
//! caller can show every issue at once before running the matcher.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::algorithms::{is_valid_end_date, is_valid_start_date};
use crate::core::domain::Timeline;
use crate::core::samples::SampleSet;

/// Validation result with categorized issues and statistics.
///
/// Errors make `is_valid` false, while warnings are informational.
///
/// # Examples
///
/// ```
/// use sits_timeline::preprocessing::validator::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid);
///
/// result.add_warning("Irregular step".to_string());
/// assert!(result.is_valid);
///
/// result.add_error("Timeline has a single date".to_string());
/// assert!(!result.is_valid);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary statistics computed during validation.
///
/// # Fields
///
/// * `total_dates` - Number of dates inspected, duplicates included
/// * `duplicate_dates` - Dates that appeared more than once
/// * `cadence_days` - Most common step between consecutive dates
/// * `min_step_days` / `max_step_days` - Step range over the timeline
/// * `irregular_steps` - Steps outside half to one and a half times the cadence
/// * `total_samples` - Number of training samples inspected
/// * `samples_outside_timeline` - Samples whose reference window misses the timeline
/// * `band_mismatches` - Samples whose bands differ from the first sample's
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_dates: usize,
    pub duplicate_dates: usize,
    pub cadence_days: i64,
    pub min_step_days: i64,
    pub max_step_days: i64,
    pub irregular_steps: usize,
    pub total_samples: usize,
    pub samples_outside_timeline: usize,
    pub band_mismatches: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Adds a critical error and marks the result as invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Folds `other` into `self`, keeping every non-zero statistic of `other`.
    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);

        let stats = other.stats;
        if stats.total_dates > 0 {
            self.stats.total_dates = stats.total_dates;
            self.stats.duplicate_dates = stats.duplicate_dates;
            self.stats.cadence_days = stats.cadence_days;
            self.stats.min_step_days = stats.min_step_days;
            self.stats.max_step_days = stats.max_step_days;
            self.stats.irregular_steps = stats.irregular_steps;
        }
        if stats.total_samples > 0 {
            self.stats.total_samples = stats.total_samples;
            self.stats.samples_outside_timeline = stats.samples_outside_timeline;
            self.stats.band_mismatches = stats.band_mismatches;
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for timelines and the training samples aligned against them.
///
/// # Examples
///
/// ```
/// use sits_timeline::preprocessing::validator::TimelineValidator;
/// use chrono::{Days, NaiveDate};
///
/// let first = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
/// let dates: Vec<NaiveDate> = (0..10).map(|i| first + Days::new(16 * i)).collect();
///
/// let result = TimelineValidator::default().validate_dates(&dates);
/// assert!(result.is_valid);
/// assert_eq!(result.stats.cadence_days, 16);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimelineValidator {
    max_reported_issues: usize,
}

impl TimelineValidator {
    pub fn new(max_reported_issues: usize) -> Self {
        Self {
            max_reported_issues,
        }
    }

    /// Validates raw observation dates, in input order.
    ///
    /// Checks for:
    /// - Fewer than two distinct dates (error)
    /// - Dates out of order (warning)
    /// - Duplicate dates (warning)
    /// - Steps far from the dominant cadence (warning)
    pub fn validate_dates(&self, dates: &[NaiveDate]) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.stats.total_dates = dates.len();

        if dates.windows(2).any(|pair| pair[1] < pair[0]) {
            result.add_warning("Dates are not in ascending order; they will be sorted".to_string());
        }

        let mut sorted = dates.to_vec();
        sorted.sort_unstable();
        result.stats.duplicate_dates = self.check_duplicates(&sorted, &mut result);
        sorted.dedup();

        if sorted.len() < 2 {
            result.add_error(format!(
                "Timeline needs at least two distinct dates, found {}",
                sorted.len()
            ));
            return result;
        }

        self.check_steps(&sorted, &mut result);
        result
    }

    /// Validates the steps of an already normalised timeline.
    pub fn validate_timeline(&self, timeline: &Timeline) -> ValidationResult {
        self.validate_dates(timeline.dates())
    }

    /// Validates training samples against the timeline they will be aligned to.
    ///
    /// Checks for:
    /// - An empty sample set (error)
    /// - Samples without any band (error)
    /// - Band sets differing from the first sample's (error)
    /// - Reference windows starting or ending beyond one cadence step of the timeline (warning)
    pub fn validate_samples(&self, samples: &SampleSet, timeline: &Timeline) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.stats.total_samples = samples.len();

        let Some(first) = samples.samples().first() else {
            result.add_error("Sample set is empty".to_string());
            return result;
        };

        let expected = first.time_series.band_names();
        if expected.is_empty() {
            result.add_error("First sample carries no bands".to_string());
        }

        let mut outside = 0;
        let mut mismatches = 0;
        for (row, sample) in samples.samples().iter().enumerate() {
            if sample.time_series.band_names() != expected {
                mismatches += 1;
                if mismatches <= self.max_reported_issues {
                    result.add_error(format!(
                        "Sample {} has bands {:?}, expected {:?}",
                        row,
                        sample.time_series.band_names(),
                        expected
                    ));
                }
            }

            let start_ok = is_valid_start_date(sample.start_date, timeline);
            let end_ok = is_valid_end_date(sample.end_date, timeline);
            if !start_ok || !end_ok {
                outside += 1;
                if outside <= self.max_reported_issues {
                    result.add_warning(format!(
                        "Sample {} ({}) window [{} .. {}] falls outside timeline [{} .. {}]",
                        row,
                        sample.label,
                        sample.start_date,
                        sample.end_date,
                        timeline.first(),
                        timeline.last()
                    ));
                }
            }
        }

        if mismatches > self.max_reported_issues {
            result.add_error(format!(
                "Total band mismatches: {} (showing first {})",
                mismatches, self.max_reported_issues
            ));
        }
        if outside > self.max_reported_issues {
            result.add_warning(format!(
                "Total samples outside timeline: {} (showing first {})",
                outside, self.max_reported_issues
            ));
        }

        result.stats.band_mismatches = mismatches;
        result.stats.samples_outside_timeline = outside;
        result
    }

    fn check_duplicates(&self, sorted: &[NaiveDate], result: &mut ValidationResult) -> usize {
        let mut duplicates = 0;
        for pair in sorted.windows(2) {
            if pair[0] == pair[1] {
                duplicates += 1;
                if duplicates <= self.max_reported_issues {
                    result.add_warning(format!("Duplicate date: {}", pair[0]));
                }
            }
        }

        if duplicates > self.max_reported_issues {
            result.add_warning(format!(
                "Total duplicate dates: {} (showing first {})",
                duplicates, self.max_reported_issues
            ));
        }

        duplicates
    }

    fn check_steps(&self, sorted: &[NaiveDate], result: &mut ValidationResult) {
        let steps: Vec<(NaiveDate, i64)> = sorted
            .windows(2)
            .map(|pair| (pair[1], (pair[1] - pair[0]).num_days()))
            .collect();

        let cadence = dominant_step(steps.iter().map(|(_, step)| *step));
        result.stats.cadence_days = cadence;
        result.stats.min_step_days = steps.iter().map(|(_, step)| *step).min().unwrap_or(0);
        result.stats.max_step_days = steps.iter().map(|(_, step)| *step).max().unwrap_or(0);

        let mut irregular = 0;
        for (date, step) in &steps {
            // Outside [cadence / 2, 3 · cadence / 2]
            if 2 * step < cadence || 2 * step > 3 * cadence {
                irregular += 1;
                if irregular <= self.max_reported_issues {
                    result.add_warning(format!(
                        "Irregular step of {} days ending at {} (cadence {} days)",
                        step, date, cadence
                    ));
                }
            }
        }

        if irregular > self.max_reported_issues {
            result.add_warning(format!(
                "Total irregular steps: {} (showing first {})",
                irregular, self.max_reported_issues
            ));
        }
        result.stats.irregular_steps = irregular;
    }
}

impl Default for TimelineValidator {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Most frequent step; the smaller one wins ties.
fn dominant_step(steps: impl Iterator<Item = i64>) -> i64 {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for step in steps {
        *counts.entry(step).or_default() += 1;
    }
    counts
        .into_iter()
        .fold((0, 0), |best, (step, count)| {
            if count > best.1 {
                (step, count)
            } else {
                best
            }
        })
        .0
}
