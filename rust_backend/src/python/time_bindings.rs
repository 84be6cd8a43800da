use chrono::NaiveDate;
use pyo3::prelude::*;

use super::alignment::to_py_err;
use crate::parsing::timeline_parser::parse_timeline_str;
use crate::time::Interval;

/// Add an interval such as "12 months" or "16 days" to a date (PyO3 binding)
///
/// Month and year steps clamp to the end of shorter months.
#[pyfunction]
pub fn add_interval(date: NaiveDate, interval: &str) -> PyResult<NaiveDate> {
    let interval: Interval = interval.parse().map_err(to_py_err)?;
    interval.advance(date).map_err(to_py_err)
}

/// Normalise an interval string, e.g. "1 Year" -> "1 year" (PyO3 binding)
#[pyfunction]
pub fn normalize_interval(interval: &str) -> PyResult<String> {
    let interval: Interval = interval.parse().map_err(to_py_err)?;
    Ok(interval.to_string())
}

/// Extract the sorted, de-duplicated timeline of a JSON descriptor (PyO3 binding)
#[pyfunction]
pub fn timeline_from_json(json_str: &str) -> PyResult<Vec<NaiveDate>> {
    let timeline = parse_timeline_str(json_str).map_err(to_py_err)?;
    Ok(timeline.dates().to_vec())
}
