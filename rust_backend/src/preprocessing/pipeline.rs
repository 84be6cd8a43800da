use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{info, warn};
use polars::prelude::DataFrame;
use serde::Serialize;
use std::path::Path;

use crate::config::AlignmentConfig;
use crate::core::domain::Timeline;
use crate::core::{ClassificationInfo, SampleSet};
use crate::io::loaders::{SamplesLoader, TimelineLoader};
use crate::preprocessing::validator::{TimelineValidator, ValidationResult};
use crate::transformations::{
    build_feature_table, build_masks, slice_windows, time_indexes_for, FlatLayout,
    SelectionLayout, SelectionMask, TimeIndex,
};

/// Everything derived for one classification job
#[derive(Debug, Clone, Serialize)]
pub struct AlignmentOutput {
    pub info: ClassificationInfo,
    pub time_indexes: Vec<TimeIndex>,
    pub masks: Vec<SelectionMask>,
    pub validation: ValidationResult,
}

/// Main alignment pipeline: validate, match windows, build selections
pub struct AlignmentPipeline {
    config: AlignmentConfig,
}

impl AlignmentPipeline {
    /// Create a new pipeline with default configuration
    pub fn new() -> Self {
        Self {
            config: AlignmentConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: AlignmentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    /// Align `samples` against `timeline`
    ///
    /// # Returns
    /// AlignmentOutput with the classification info, per-window time indexes
    /// and selection masks, and the validation report
    pub fn process(&self, samples: &SampleSet, timeline: Timeline) -> Result<AlignmentOutput> {
        let validation = self.validate(samples, timeline.dates(), &timeline)?;
        self.align(samples, timeline, validation)
    }

    /// Align `samples` against raw timeline dates, validating them before
    /// they are sorted and de-duplicated
    pub fn process_dates(&self, samples: &SampleSet, dates: Vec<NaiveDate>) -> Result<AlignmentOutput> {
        let timeline = Timeline::new(dates.clone()).context("Failed to build timeline")?;
        let validation = self.validate(samples, &dates, &timeline)?;
        self.align(samples, timeline, validation)
    }

    fn align(
        &self,
        samples: &SampleSet,
        timeline: Timeline,
        validation: ValidationResult,
    ) -> Result<AlignmentOutput> {
        // Derive windows
        let info = ClassificationInfo::build(
            samples,
            timeline,
            self.config.alignment.interval,
            self.config.alignment.reference,
        )
        .context("Failed to align samples with timeline")?;

        // Flatten windows per band
        let time_indexes = time_indexes_for(&info);

        // Selection masks
        let layout = FlatLayout::new(
            info.bands().len(),
            info.timeline().len(),
            self.config.selection.layout,
        );
        let masks = build_masks(&time_indexes, &layout, &self.config.selection.options())
            .context("Failed to build selection masks")?;

        info!(
            "Aligned {} samples: {} windows of {} dates, masks of {} columns",
            samples.len(),
            info.num_windows(),
            info.num_samples(),
            layout.width()
        );

        Ok(AlignmentOutput {
            info,
            time_indexes,
            masks,
            validation,
        })
    }

    /// Process from JSON strings (useful for testing or API usage)
    pub fn process_json_str(&self, samples_json: &str, timeline_json: &str) -> Result<AlignmentOutput> {
        let samples = SamplesLoader::load_from_str(samples_json)?;
        let dates = TimelineLoader::load_dates_from_str(timeline_json)?;
        self.process_dates(&samples, dates)
    }

    /// Process a samples file against the timeline of a coverage descriptor file
    pub fn process_files(&self, samples_path: &Path, timeline_path: &Path) -> Result<AlignmentOutput> {
        let samples = SamplesLoader::load_from_file(samples_path)?;
        let dates = TimelineLoader::load_dates_from_file(timeline_path)?;
        self.process_dates(&samples, dates)
    }

    /// Builds the feature table of `samples` and slices it once per window.
    pub fn window_feature_tables(
        &self,
        samples: &SampleSet,
        output: &AlignmentOutput,
    ) -> Result<Vec<DataFrame>> {
        if self.config.selection.layout != SelectionLayout::TimeSeries {
            anyhow::bail!(
                "Feature tables need the time_series selection layout, got {:?}",
                self.config.selection.layout
            );
        }

        let df = build_feature_table(samples, output.info.timeline(), output.info.bands())
            .context("Failed to build feature table")?;
        slice_windows(&df, &output.masks).context("Failed to slice feature table")
    }

    /// Validation report of `dates` and `samples`; empty when validation is disabled
    fn validate(
        &self,
        samples: &SampleSet,
        dates: &[NaiveDate],
        timeline: &Timeline,
    ) -> Result<ValidationResult> {
        if !self.config.validation.enabled {
            return Ok(ValidationResult::new());
        }

        let validator = TimelineValidator::new(self.config.validation.max_reported_issues);
        let mut validation = validator.validate_dates(dates);
        validation.merge(validator.validate_samples(samples, timeline));

        for warning in &validation.warnings {
            warn!("{}", warning);
        }
        if !validation.is_valid {
            anyhow::bail!("Validation failed: {}", validation.errors.join("; "));
        }

        Ok(validation)
    }
}

impl Default for AlignmentPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to align a samples file against a coverage file
///
/// Reads `alignment.toml` from `config_path` when given, otherwise from the
/// default locations, falling back to defaults.
pub fn align_files(
    samples_path: &Path,
    timeline_path: &Path,
    config_path: Option<&Path>,
) -> Result<AlignmentOutput> {
    let config = match config_path {
        Some(path) => AlignmentConfig::from_file(path)?,
        None => AlignmentConfig::from_default_location_or_default()?,
    };

    AlignmentPipeline::with_config(config).process_files(samples_path, timeline_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlignmentError;
    use chrono::{Days, NaiveDate};

    fn timeline_json(count: u64) -> String {
        let first = NaiveDate::from_ymd_opt(2000, 2, 18).unwrap();
        let dates: Vec<String> = (0..count)
            .map(|i| format!("\"{}\"", first + Days::new(16 * i)))
            .collect();
        format!(r#"{{"timeline": [{}]}}"#, dates.join(", "))
    }

    const SAMPLES: &str = r#"[
        {
            "start_date": "2000-09-13",
            "end_date": "2001-08-29",
            "label": "Forest",
            "time_series": {
                "index": ["2000-09-13", "2000-09-29"],
                "bands": [
                    {"name": "ndvi", "values": [0.8, 0.7]},
                    {"name": "evi", "values": [0.5, 0.4]}
                ]
            }
        },
        {
            "start_date": "2000-09-13",
            "end_date": "2001-08-29",
            "label": "Pasture",
            "time_series": {
                "index": ["2000-09-13", "2000-09-29"],
                "bands": [
                    {"name": "ndvi", "values": [0.4, 0.3]},
                    {"name": "evi", "values": [0.2, 0.1]}
                ]
            }
        }
    ]"#;

    #[test]
    fn test_process_json_str_basic() {
        let pipeline = AlignmentPipeline::new();
        let output = pipeline.process_json_str(SAMPLES, &timeline_json(92)).unwrap();

        assert!(output.validation.is_valid);
        assert_eq!(output.info.num_samples(), 23);
        assert_eq!(output.info.num_windows(), 3);
        assert_eq!(output.time_indexes.len(), 3);
        assert_eq!(output.masks.len(), 3);
        for mask in &output.masks {
            assert_eq!(mask.len(), 2 + 2 * 92);
            assert_eq!(mask.selected_count(), 2 + 2 * 23);
        }
    }

    #[test]
    fn test_raster_layout_has_no_metadata() {
        let mut config = AlignmentConfig::default();
        config.selection.layout = SelectionLayout::Raster;
        let pipeline = AlignmentPipeline::with_config(config);

        let output = pipeline.process_json_str(SAMPLES, &timeline_json(92)).unwrap();
        assert!(output.masks.iter().all(|mask| mask.len() == 2 * 92));
        assert!(output.masks.iter().all(|mask| mask.selected_count() == 2 * 23));
    }

    #[test]
    fn test_window_feature_tables() {
        let pipeline = AlignmentPipeline::new();
        let samples = SamplesLoader::load_from_str(SAMPLES).unwrap();
        let timeline = TimelineLoader::load_from_str(&timeline_json(92)).unwrap();
        let output = pipeline.process(&samples, timeline).unwrap();

        let tables = pipeline.window_feature_tables(&samples, &output).unwrap();
        assert_eq!(tables.len(), 3);
        assert!(tables.iter().all(|df| df.width() == 2 + 2 * 23 && df.height() == 2));
    }

    #[test]
    fn test_overflow_surfaces_alignment_error() {
        let pipeline = AlignmentPipeline::new();
        // 20 dates cannot hold a 12 month window starting in September
        let err = pipeline.process_json_str(SAMPLES, &timeline_json(20)).unwrap_err();
        assert!(err.downcast_ref::<AlignmentError>().is_some());
    }

    #[test]
    fn test_validation_errors_stop_processing() {
        let samples = r#"[
            {"start_date": "2000-09-13", "end_date": "2001-08-29", "label": "Forest",
             "time_series": {"index": ["2000-09-13"], "bands": [{"name": "ndvi", "values": [0.8]}]}},
            {"start_date": "2000-09-13", "end_date": "2001-08-29", "label": "Forest",
             "time_series": {"index": ["2000-09-13"], "bands": [{"name": "evi", "values": [0.5]}]}}
        ]"#;

        let err = AlignmentPipeline::new()
            .process_json_str(samples, &timeline_json(92))
            .unwrap_err();
        assert!(err.to_string().contains("Validation failed"));
    }

    #[test]
    fn test_raw_timeline_issues_are_reported() {
        let first = NaiveDate::from_ymd_opt(2000, 2, 18).unwrap();
        let mut dates: Vec<String> = (0..92)
            .map(|i| format!("\"{}\"", first + Days::new(16 * i)))
            .collect();
        dates.swap(0, 1);
        dates.push(dates[10].clone());
        let timeline_with_issues = format!(r#"{{"timeline": [{}]}}"#, dates.join(", "));

        let output = AlignmentPipeline::new()
            .process_json_str(SAMPLES, &timeline_with_issues)
            .unwrap();
        assert!(output.validation.is_valid);
        assert_eq!(output.validation.stats.total_dates, 93);
        assert_eq!(output.validation.stats.duplicate_dates, 1);
        assert!(output.validation.warnings.iter().any(|w| w.contains("ascending order")));
        assert_eq!(output.info.timeline().len(), 92);
    }

    #[test]
    fn test_validation_can_be_disabled() {
        let mut config = AlignmentConfig::default();
        config.validation.enabled = false;

        let output = AlignmentPipeline::with_config(config)
            .process_json_str(SAMPLES, &timeline_json(92))
            .unwrap();
        assert_eq!(output.validation.stats.total_dates, 0);
    }
}
