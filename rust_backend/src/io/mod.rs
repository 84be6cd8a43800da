//! File loading for samples and timelines.
//!
//! These loaders wrap the parsers with file handling and error context.
//! Alignment errors stay reachable through `anyhow::Error::downcast_ref`.
//!
//! # Example
//!
//! ```no_run
//! use sits_timeline::io::loaders::{SamplesLoader, TimelineLoader};
//! use std::path::Path;
//!
//! let samples = SamplesLoader::load_from_file(Path::new("samples.json"))
//!     .expect("Failed to load samples");
//! let timeline = TimelineLoader::load_from_file(Path::new("coverage.json"))
//!     .expect("Failed to load timeline");
//! println!("{} samples over {} dates", samples.len(), timeline.len());
//! ```

pub mod loaders;

#[cfg(test)]
mod loaders_tests;

pub use loaders::{SamplesLoader, TimelineLoader};
