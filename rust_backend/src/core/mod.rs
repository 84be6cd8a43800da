//! Core domain models for timeline alignment.
//!
//! This module defines the data structures shared by every stage of the
//! alignment: timelines and windows, training samples, and the
//! per-job [`ClassificationInfo`] aggregate.

pub mod classification;
pub mod domain;
pub mod samples;

pub use classification::ClassificationInfo;
pub use domain::{DateWindow, IndexWindow, ReferenceWindow, Timeline};
pub use samples::{BandValues, ReferencePolicy, SampleSet, TimeSeries, TrainingSample};
