use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;

use crate::core::domain::Timeline;
use crate::core::samples::SampleSet;
use crate::parsing::{samples_parser, timeline_parser};

fn read_json_file(path: &Path, what: &str) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .context("File has no extension")?;

    if !extension.eq_ignore_ascii_case("json") {
        anyhow::bail!("Unsupported {} file format: {}", what, extension);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file: {}", what, path.display()))
}

/// Loads labelled training samples from JSON
pub struct SamplesLoader;

impl SamplesLoader {
    pub fn load_from_file(path: &Path) -> Result<SampleSet> {
        let content = read_json_file(path, "samples")?;
        Self::load_from_str(&content)
            .with_context(|| format!("Failed to parse samples file: {}", path.display()))
    }

    pub fn load_from_str(json_str: &str) -> Result<SampleSet> {
        samples_parser::parse_samples_str(json_str).context("Failed to parse samples JSON")
    }
}

/// Loads a timeline from a coverage descriptor or sample record
pub struct TimelineLoader;

impl TimelineLoader {
    pub fn load_from_file(path: &Path) -> Result<Timeline> {
        let content = read_json_file(path, "timeline")?;
        Self::load_from_str(&content)
            .with_context(|| format!("Failed to parse timeline file: {}", path.display()))
    }

    pub fn load_from_str(json_str: &str) -> Result<Timeline> {
        timeline_parser::parse_timeline_str(json_str).context("Failed to extract timeline")
    }

    /// Raw dates of a descriptor file, in input order
    pub fn load_dates_from_file(path: &Path) -> Result<Vec<NaiveDate>> {
        let content = read_json_file(path, "timeline")?;
        Self::load_dates_from_str(&content)
            .with_context(|| format!("Failed to parse timeline file: {}", path.display()))
    }

    pub fn load_dates_from_str(json_str: &str) -> Result<Vec<NaiveDate>> {
        timeline_parser::parse_dates_str(json_str).context("Failed to extract timeline dates")
    }
}
