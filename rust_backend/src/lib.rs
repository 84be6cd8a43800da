//! Timeline alignment for satellite image time-series classification.
//!
//! Given the acquisition timeline of a coverage and a labelled training
//! sample set, this crate tiles the timeline into classification windows of
//! the same length and phase as the training samples, maps those windows to
//! timeline indexes, and builds per-window column masks over a flattened
//! (bands × time) feature table.
//!
//! # Modules
//!
//! - [`core`]: timelines, windows, samples and the per-job [`core::ClassificationInfo`]
//! - [`time`]: calendar helpers and interval arithmetic
//! - [`parsing`]: timeline and sample parsers
//! - [`algorithms`]: validity checks, window counting, matching and index mapping
//! - [`transformations`]: time indexes, selection masks and feature tables
//! - [`preprocessing`]: validation and the end-to-end alignment pipeline
//! - [`io`]: file loaders
//! - [`config`]: TOML configuration
//! - [`error`]: error types

pub mod algorithms;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod time;
pub mod transformations;

#[cfg(feature = "python")]
pub mod python;

pub use config::AlignmentConfig;
pub use core::{ClassificationInfo, DateWindow, IndexWindow, SampleSet, Timeline};
pub use error::{AlignmentError, AlignmentResult};
pub use preprocessing::{AlignmentOutput, AlignmentPipeline};
pub use time::Interval;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// SITS timeline alignment
#[cfg(feature = "python")]
#[pymodule]
fn sits_timeline(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Alignment
    m.add_function(wrap_pyfunction!(python::num_samples, m)?)?;
    m.add_function(wrap_pyfunction!(python::is_valid_start_date, m)?)?;
    m.add_function(wrap_pyfunction!(python::is_valid_end_date, m)?)?;
    m.add_function(wrap_pyfunction!(python::match_timeline, m)?)?;
    m.add_function(wrap_pyfunction!(python::match_indexes, m)?)?;
    m.add_function(wrap_pyfunction!(python::selection_masks, m)?)?;
    m.add_function(wrap_pyfunction!(python::align_json, m)?)?;

    // Time helpers
    m.add_function(wrap_pyfunction!(python::add_interval, m)?)?;
    m.add_function(wrap_pyfunction!(python::normalize_interval, m)?)?;
    m.add_function(wrap_pyfunction!(python::timeline_from_json, m)?)?;

    Ok(())
}
