use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::core::domain::Timeline;
use crate::core::samples::{TimeSeries, TrainingSample};
use crate::error::{AlignmentError, AlignmentResult};
use crate::time::parse_date;

/// Candidate keys holding a coverage-style timeline
const TIMELINE_KEYS: &[&str] = &["timeline", "Timeline", "dates", "time_line"];

/// Candidate keys holding an embedded time series
const TIME_SERIES_KEYS: &[&str] = &["time_series", "timeSeries", "TimeSeries", "ts"];

/// Candidate keys for the date column of a time series
const INDEX_KEYS: &[&str] = &["index", "Index", "date", "Date", "dates"];

/// Where a timeline is read from.
#[derive(Debug, Clone, Copy)]
pub enum TimelineSource<'a> {
    /// A JSON coverage descriptor or sample record.
    Descriptor(&'a Value),
    /// An already-parsed time series.
    TimeSeries(&'a TimeSeries),
    /// The time series of a training sample.
    Sample(&'a TrainingSample),
}

/// Extracts the ordered, de-duplicated timeline of `source`.
///
/// Descriptors are searched for a coverage timeline first, then for a time
/// series with a date column. A coverage timeline given as one date list per
/// tile yields the first tile's list only.
pub fn extract_timeline(source: TimelineSource<'_>) -> AlignmentResult<Timeline> {
    Timeline::new(extract_dates(source)?)
}

/// Dates of `source` as they appear in the input, before sorting or de-duplication.
pub fn extract_dates(source: TimelineSource<'_>) -> AlignmentResult<Vec<NaiveDate>> {
    let dates = match source {
        TimelineSource::Descriptor(value) => descriptor_dates(value)?,
        TimelineSource::TimeSeries(series) => series.index.clone(),
        TimelineSource::Sample(sample) => sample.time_series.index.clone(),
    };

    if dates.is_empty() {
        return Err(AlignmentError::InvalidTimeline(
            "no dates found in the timeline source".to_string(),
        ));
    }

    Ok(dates)
}

/// Parse a timeline from a JSON descriptor string
pub fn parse_timeline_str(json_str: &str) -> AlignmentResult<Timeline> {
    Timeline::new(parse_dates_str(json_str)?)
}

/// Parse the raw dates of a JSON descriptor string
pub fn parse_dates_str(json_str: &str) -> AlignmentResult<Vec<NaiveDate>> {
    let value: Value = serde_json::from_str(json_str)?;
    extract_dates(TimelineSource::Descriptor(&value))
}

fn descriptor_dates(payload: &Value) -> AlignmentResult<Vec<NaiveDate>> {
    // A bare array is taken as the timeline itself
    if payload.is_array() {
        return coverage_dates(payload);
    }

    let obj = payload.as_object().ok_or_else(|| {
        AlignmentError::InvalidTimeline("descriptor must be a JSON object or array".to_string())
    })?;

    if let Some(timeline) = find_value_by_keys(obj, TIMELINE_KEYS) {
        return coverage_dates(timeline);
    }

    if let Some(series) = find_value_by_keys(obj, TIME_SERIES_KEYS) {
        return time_series_dates(series);
    }

    Err(AlignmentError::InvalidTimeline(
        "descriptor has neither a timeline nor a time series field".to_string(),
    ))
}

/// Dates of a coverage timeline, taking the first entry of a per-tile list.
fn coverage_dates(timeline: &Value) -> AlignmentResult<Vec<NaiveDate>> {
    match timeline {
        Value::Array(entries) => match entries.first() {
            Some(first @ Value::Array(_)) => collect_dates(first, "timeline"),
            _ => collect_dates(timeline, "timeline"),
        },
        other => collect_dates(other, "timeline"),
    }
}

/// Dates of a time series given as `{"index": [...]}` or as a list of rows.
fn time_series_dates(series: &Value) -> AlignmentResult<Vec<NaiveDate>> {
    match series {
        Value::Object(obj) => match find_value_by_keys(obj, INDEX_KEYS) {
            Some(index) => collect_dates(index, "time series index"),
            None => Err(AlignmentError::InvalidTimeline(
                "time series has no index column".to_string(),
            )),
        },
        Value::Array(rows) => {
            let mut dates = Vec::with_capacity(rows.len());
            for row in rows {
                dates.extend(time_series_row_dates(row)?);
            }
            Ok(dates)
        }
        Value::Null => Err(AlignmentError::InvalidTimeline(
            "time series is null".to_string(),
        )),
        other => Err(AlignmentError::InvalidTimeline(format!(
            "unsupported time series value: {}",
            other
        ))),
    }
}

fn time_series_row_dates(row: &Value) -> AlignmentResult<Vec<NaiveDate>> {
    match row {
        // Row of a flat table
        Value::Object(obj) => match find_value_by_keys(obj, INDEX_KEYS) {
            Some(index) => collect_dates(index, "time series row"),
            None => Ok(Vec::new()),
        },
        // One nested table per sample
        Value::Array(_) => time_series_dates(row),
        _ => Ok(Vec::new()),
    }
}

/// Collects dates from a string or a flat array of strings.
fn collect_dates(value: &Value, field: &str) -> AlignmentResult<Vec<NaiveDate>> {
    match value {
        Value::Null => Err(AlignmentError::InvalidTimeline(format!("{} is null", field))),
        Value::String(s) => Ok(vec![parse_date_value(s, field)?]),
        Value::Array(items) => {
            let mut dates = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Null => continue,
                    Value::String(s) => dates.push(parse_date_value(s, field)?),
                    other => {
                        return Err(AlignmentError::InvalidTimeline(format!(
                            "unsupported {} entry: {}",
                            field, other
                        )))
                    }
                }
            }
            Ok(dates)
        }
        other => Err(AlignmentError::InvalidTimeline(format!(
            "unsupported {} value: {}",
            field, other
        ))),
    }
}

fn parse_date_value(value: &str, field: &str) -> AlignmentResult<NaiveDate> {
    parse_date(value).ok_or_else(|| {
        AlignmentError::InvalidTimeline(format!("unrecognised date '{}' in {}", value, field))
    })
}

/// Find a value in an object by trying multiple keys
fn find_value_by_keys<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_dates_takes_first_tile() {
        let value = serde_json::json!([["2000-01-17", "2000-01-01", null], ["2005-01-01"]]);
        let dates = coverage_dates(&value).unwrap();
        assert_eq!(dates.len(), 2);
    }

    #[test]
    fn test_collect_dates_rejects_nested_lists() {
        let value = serde_json::json!(["2000-01-01", ["2000-01-17"]]);
        let err = collect_dates(&value, "timeline").unwrap_err();
        assert!(matches!(err, AlignmentError::InvalidTimeline(_)));
    }

    #[test]
    fn test_find_value_by_keys_respects_order() {
        let value = serde_json::json!({"dates": ["2000-01-01"], "timeline": ["2001-01-01"]});
        let obj = value.as_object().unwrap();
        let found = find_value_by_keys(obj, TIMELINE_KEYS).unwrap();
        assert_eq!(found, &serde_json::json!(["2001-01-01"]));
    }
}
