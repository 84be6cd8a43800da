use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::core::samples::{SampleSet, TrainingSample};
use crate::error::{AlignmentError, AlignmentResult};

/// Wrapped form: `{"samples": [...]}`
#[derive(Debug, Deserialize)]
struct SamplesDocument {
    samples: Vec<TrainingSample>,
}

/// Parse training samples from a JSON string.
///
/// Accepts a bare array of samples or an object with a `samples` array.
/// Field errors report the JSON path of the offending value, e.g.
/// `samples[3].start_date`.
pub fn parse_samples_str(json_str: &str) -> AlignmentResult<SampleSet> {
    let value: Value = serde_json::from_str(json_str)?;
    parse_samples_value(value)
}

/// Parse training samples from an already-decoded JSON value.
pub fn parse_samples_value(value: Value) -> AlignmentResult<SampleSet> {
    let samples: Vec<TrainingSample> = if value.is_array() {
        serde_path_to_error::deserialize(value)?
    } else if value.get("samples").is_some() {
        let document: SamplesDocument = serde_path_to_error::deserialize(value)?;
        document.samples
    } else {
        return Err(AlignmentError::Parse {
            path: ".".to_string(),
            message: "expected an array of samples or an object with a 'samples' field"
                .to_string(),
        });
    };

    debug!("Parsed {} training samples", samples.len());
    Ok(SampleSet::new(samples))
}
