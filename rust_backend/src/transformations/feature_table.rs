//! Wide feature tables and per-window column slicing.
//!
//! Each row is one sample: an `original_row` id, the `reference` label, then
//! every band's value at every timeline step named `<band><t>` with `t`
//! counted from 1. Steps the sample does not cover are null.

use std::collections::HashMap;

use log::debug;
use polars::prelude::*;

use super::layout::{FlatLayout, SelectionLayout};
use super::selection::SelectionMask;
use crate::core::domain::Timeline;
use crate::core::samples::SampleSet;
use crate::error::{AlignmentError, AlignmentResult};

pub const ORIGINAL_ROW_COLUMN: &str = "original_row";
pub const REFERENCE_COLUMN: &str = "reference";

/// Column name of `band` at 0-based `time_step`.
pub fn feature_column_name(band: &str, time_step: usize) -> String {
    format!("{}{}", band, time_step + 1)
}

/// Builds the time-series feature table of `samples` over `timeline`.
pub fn build_feature_table(
    samples: &SampleSet,
    timeline: &Timeline,
    bands: &[String],
) -> AlignmentResult<DataFrame> {
    let layout = FlatLayout::new(bands.len(), timeline.len(), SelectionLayout::TimeSeries);
    let rows = samples.len();

    let mut values: Vec<Vec<Option<f64>>> = vec![vec![None; rows]; bands.len() * timeline.len()];
    let mut original_rows = Vec::with_capacity(rows);
    let mut references = Vec::with_capacity(rows);

    for (row, sample) in samples.samples().iter().enumerate() {
        original_rows.push(original_row_id(row)?);
        references.push(sample.label.clone());

        let steps: Vec<Option<usize>> = sample
            .time_series
            .index
            .iter()
            .map(|date| timeline.position(*date))
            .collect();
        let by_name: HashMap<&str, &[f64]> = sample
            .time_series
            .bands
            .iter()
            .map(|band| (band.name.as_str(), band.values.as_slice()))
            .collect();

        for (band, name) in bands.iter().enumerate() {
            let Some(series) = by_name.get(name.as_str()) else {
                continue;
            };
            for (step, value) in steps.iter().zip(series.iter()) {
                if let Some(step) = step {
                    values[layout.flat_index(band, *step)][row] = Some(*value);
                }
            }
        }
    }

    let mut columns = Vec::with_capacity(layout.width());
    columns.push(Column::new(ORIGINAL_ROW_COLUMN.into(), original_rows));
    columns.push(Column::new(REFERENCE_COLUMN.into(), references));
    for (band, name) in bands.iter().enumerate() {
        for step in 0..timeline.len() {
            let column_values = std::mem::take(&mut values[layout.flat_index(band, step)]);
            columns.push(Column::new(
                feature_column_name(name, step).into(),
                column_values,
            ));
        }
    }

    let df = DataFrame::new(columns)?;
    debug!(
        "Built feature table with {} rows and {} columns",
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Keeps the columns of `df` selected by `mask`, in order.
pub fn slice_features(df: &DataFrame, mask: &SelectionMask) -> AlignmentResult<DataFrame> {
    if df.width() != mask.len() {
        return Err(AlignmentError::MaskWidthMismatch {
            mask: mask.len(),
            table: df.width(),
        });
    }

    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .zip(mask.as_slice())
        .filter(|(_, selected)| **selected)
        .map(|(column, _)| column.clone())
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// 1-based `original_row` id of the sample at `row`.
fn original_row_id(row: usize) -> AlignmentResult<u32> {
    row.checked_add(1)
        .and_then(|id| u32::try_from(id).ok())
        .ok_or_else(|| {
            AlignmentError::FeatureTable(PolarsError::ComputeError(
                format!("sample row {} exceeds the u32 row id range", row).into(),
            ))
        })
}

/// One sliced table per mask.
pub fn slice_windows(df: &DataFrame, masks: &[SelectionMask]) -> AlignmentResult<Vec<DataFrame>> {
    masks.iter().map(|mask| slice_features(df, mask)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::samples::{BandValues, TimeSeries, TrainingSample};
    use crate::transformations::build_selection_masks;
    use crate::transformations::TimeIndex;
    use chrono::{Days, NaiveDate};

    #[test]
    fn test_original_row_id_is_checked() {
        assert_eq!(original_row_id(0).unwrap(), 1);
        assert_eq!(original_row_id(u32::MAX as usize - 1).unwrap(), u32::MAX);
        assert!(matches!(
            original_row_id(u32::MAX as usize),
            Err(AlignmentError::FeatureTable(_))
        ));
    }

    fn timeline() -> Timeline {
        let first = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        Timeline::new((0..4).map(|i| first + Days::new(16 * i)).collect()).unwrap()
    }

    fn sample(label: &str, offset: u64, ndvi: Vec<f64>) -> TrainingSample {
        let first = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let index: Vec<NaiveDate> = (0..ndvi.len() as u64)
            .map(|i| first + Days::new(16 * (i + offset)))
            .collect();
        TrainingSample {
            longitude: 0.0,
            latitude: 0.0,
            start_date: index[0],
            end_date: index[index.len() - 1],
            label: label.to_string(),
            coverage: String::new(),
            time_series: TimeSeries {
                index,
                bands: vec![BandValues {
                    name: "ndvi".to_string(),
                    values: ndvi,
                }],
            },
        }
    }

    #[test]
    fn test_feature_table_layout() {
        let samples = SampleSet::new(vec![
            sample("Forest", 0, vec![0.1, 0.2, 0.3, 0.4]),
            sample("Pasture", 2, vec![0.5, 0.6]),
        ]);
        let df = build_feature_table(&samples, &timeline(), &["ndvi".to_string()]).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(
            df.get_column_names_str(),
            vec!["original_row", "reference", "ndvi1", "ndvi2", "ndvi3", "ndvi4"]
        );

        let ndvi1 = df.column("ndvi1").unwrap().as_materialized_series().f64().unwrap();
        assert_eq!(ndvi1.get(0), Some(0.1));
        assert_eq!(ndvi1.get(1), None);

        let ndvi3 = df.column("ndvi3").unwrap().as_materialized_series().f64().unwrap();
        assert_eq!(ndvi3.get(1), Some(0.5));
    }

    #[test]
    fn test_slice_features_keeps_selected_columns() {
        let df = df!(
            "original_row" => [1u32, 2],
            "reference" => ["Forest", "Pasture"],
            "ndvi1" => [0.1, 0.5],
            "ndvi2" => [0.2, 0.6],
            "ndvi3" => [0.3, 0.7],
        )
        .unwrap();
        let masks = build_selection_masks(&[TimeIndex::from(vec![1, 2])], 1, 3).unwrap();

        let sliced = slice_features(&df, &masks[0]).unwrap();
        assert_eq!(
            sliced.get_column_names_str(),
            vec!["original_row", "reference", "ndvi2", "ndvi3"]
        );
        assert_eq!(sliced.height(), 2);
    }

    #[test]
    fn test_slice_features_rejects_width_mismatch() {
        let df = df!(
            "original_row" => [1u32],
            "reference" => ["Forest"],
            "ndvi1" => [0.1],
        )
        .unwrap();
        let masks = build_selection_masks(&[TimeIndex::from(vec![0, 1])], 1, 2).unwrap();

        let err = slice_features(&df, &masks[0]).unwrap_err();
        assert!(matches!(
            err,
            AlignmentError::MaskWidthMismatch { mask: 4, table: 3 }
        ));
    }
}
