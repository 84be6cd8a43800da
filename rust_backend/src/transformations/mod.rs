//! From index windows to per-window column selections.
//!
//! # Modules
//!
//! - [`layout`]: flattened (band × time) column geometry
//! - [`time_index`]: per-band flat index ranges of each window
//! - [`selection`]: boolean masks over a feature row, built in parallel
//! - [`feature_table`]: polars feature tables and mask slicing
//!
//! # Example
//!
//! ```no_run
//! use sits_timeline::core::ClassificationInfo;
//! use sits_timeline::transformations::{selection_masks_for, SelectionLayout, SelectionOptions};
//!
//! # fn example(info: &ClassificationInfo) -> sits_timeline::error::AlignmentResult<()> {
//! let masks = selection_masks_for(info, SelectionLayout::TimeSeries, &SelectionOptions::default())?;
//! for mask in &masks {
//!     println!("{} columns selected", mask.selected_count());
//! }
//! # Ok(())
//! # }
//! ```

pub mod feature_table;
pub mod layout;
pub mod selection;
pub mod time_index;

pub use feature_table::{build_feature_table, slice_features, slice_windows};
pub use layout::{FlatLayout, SelectionLayout, TIME_SERIES_METADATA_COLUMNS};
pub use selection::{
    build_masks, build_selection_masks, raster_columns, selection_masks_for, SelectionMask,
    SelectionOptions,
};
pub use time_index::{build_time_index, time_indexes_for, TimeIndex};
