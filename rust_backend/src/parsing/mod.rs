//! Parsers for timeline and training-sample inputs.
//!
//! # Parsers
//!
//! - [`timeline_parser`]: Extract a timeline from a coverage descriptor or a time series
//! - [`samples_parser`]: Parse labelled training samples from JSON
//!
//! # Example
//!
//! ```no_run
//! use sits_timeline::parsing::timeline_parser::parse_timeline_str;
//!
//! let timeline = parse_timeline_str(r#"{"timeline": ["2000-02-18", "2000-03-05"]}"#)
//!     .expect("Failed to parse timeline");
//! ```

pub mod samples_parser;
pub mod timeline_parser;

#[cfg(test)]
mod timeline_parser_tests;

pub use samples_parser::{parse_samples_str, parse_samples_value};
pub use timeline_parser::{
    extract_dates, extract_timeline, parse_dates_str, parse_timeline_str, TimelineSource,
};
