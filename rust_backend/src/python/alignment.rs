use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::algorithms;
use crate::config::AlignmentConfig;
use crate::core::domain::{DateWindow, IndexWindow, Timeline};
use crate::error::AlignmentError;
use crate::preprocessing::AlignmentPipeline;
use crate::time::Interval;
use crate::transformations::{build_selection_masks, TimeIndex};

/// Alignment errors surface in Python as `ValueError("<Kind>: <message>")`.
pub(crate) fn to_py_err(err: AlignmentError) -> PyErr {
    PyValueError::new_err(format!("{}: {}", err.kind(), err))
}

fn timeline_from(dates: Vec<NaiveDate>) -> PyResult<Timeline> {
    Timeline::new(dates).map_err(to_py_err)
}

fn interval_from(interval: &str) -> PyResult<Interval> {
    interval.parse().map_err(to_py_err)
}

/// Number of timeline dates covered by one interval (PyO3 binding)
#[pyfunction]
#[pyo3(signature = (timeline, interval = "12 months"))]
pub fn num_samples(timeline: Vec<NaiveDate>, interval: &str) -> PyResult<usize> {
    let timeline = timeline_from(timeline)?;
    algorithms::num_samples(&timeline, &interval_from(interval)?).map_err(to_py_err)
}

/// Whether a window may start at `date` (PyO3 binding)
#[pyfunction]
pub fn is_valid_start_date(date: NaiveDate, timeline: Vec<NaiveDate>) -> PyResult<bool> {
    Ok(algorithms::is_valid_start_date(date, &timeline_from(timeline)?))
}

/// Whether a window may end at `date` (PyO3 binding)
#[pyfunction]
pub fn is_valid_end_date(date: NaiveDate, timeline: Vec<NaiveDate>) -> PyResult<bool> {
    Ok(algorithms::is_valid_end_date(date, &timeline_from(timeline)?))
}

/// Tile the timeline into (start, end) date windows (PyO3 binding)
#[pyfunction]
#[pyo3(signature = (timeline, ref_start_date, ref_end_date, interval = "12 months"))]
pub fn match_timeline(
    timeline: Vec<NaiveDate>,
    ref_start_date: NaiveDate,
    ref_end_date: NaiveDate,
    interval: &str,
) -> PyResult<Vec<(NaiveDate, NaiveDate)>> {
    let timeline = timeline_from(timeline)?;
    let windows = algorithms::match_timeline(
        &timeline,
        ref_start_date,
        ref_end_date,
        &interval_from(interval)?,
    )
    .map_err(to_py_err)?;

    Ok(windows.iter().map(|w| (w.start, w.end)).collect())
}

/// Convert date windows to 0-based (start, end) index windows (PyO3 binding)
#[pyfunction]
pub fn match_indexes(
    timeline: Vec<NaiveDate>,
    windows: Vec<(NaiveDate, NaiveDate)>,
) -> PyResult<Vec<(usize, usize)>> {
    let timeline = timeline_from(timeline)?;
    let windows: Vec<DateWindow> = windows
        .into_iter()
        .map(|(start, end)| DateWindow::new(start, end))
        .collect();

    let indexes = algorithms::match_indexes(&timeline, &windows).map_err(to_py_err)?;
    Ok(indexes
        .iter()
        .map(|w: &IndexWindow| (w.start, w.end))
        .collect())
}

/// Build one time-series selection mask per time index (PyO3 binding)
///
/// Each time index is the flat `[b0_start, b0_end, b1_start, b1_end, ...]` list.
#[pyfunction]
pub fn selection_masks(
    time_indexes: Vec<Vec<usize>>,
    num_bands: usize,
    num_time_steps: usize,
) -> PyResult<Vec<Vec<bool>>> {
    let time_indexes: Vec<TimeIndex> = time_indexes.into_iter().map(TimeIndex::from).collect();
    let masks =
        build_selection_masks(&time_indexes, num_bands, num_time_steps).map_err(to_py_err)?;
    Ok(masks.iter().map(|mask| mask.as_slice().to_vec()).collect())
}

/// Run the full alignment on JSON inputs and return the result as JSON (PyO3 binding)
#[pyfunction]
#[pyo3(signature = (samples_json, timeline_json, config_toml = None))]
pub fn align_json(
    samples_json: &str,
    timeline_json: &str,
    config_toml: Option<&str>,
) -> PyResult<String> {
    let config = match config_toml {
        Some(toml) => toml.parse::<AlignmentConfig>().map_err(to_py_err)?,
        None => AlignmentConfig::default(),
    };

    let output = AlignmentPipeline::with_config(config)
        .process_json_str(samples_json, timeline_json)
        .map_err(|e| PyValueError::new_err(format!("Alignment failed: {:#}", e)))?;

    serde_json::to_string(&output)
        .map_err(|e| PyValueError::new_err(format!("Failed to serialise output: {}", e)))
}
