//! Python bindings for timeline alignment.
//!
//! Built only with the `python` feature. Dates cross the boundary as
//! `datetime.date`, windows as tuples and masks as lists of booleans.
//!
//! # Modules
//!
//! - [`alignment`]: window counting, matching, index mapping and selection masks
//! - [`time_bindings`]: interval arithmetic and timeline extraction
//!
//! # Python API
//!
//! All functions are available in the `sits_timeline` Python module after installation.

pub mod alignment;
pub mod time_bindings;

pub use alignment::*;
pub use time_bindings::*;
