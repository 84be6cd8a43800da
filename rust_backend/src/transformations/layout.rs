//! Flattened (band × time) column layout of a wide feature table.
//!
//! A feature row holds `metadata_columns` leading columns followed by the
//! full timeline of band 0, then the full timeline of band 1, and so on:
//!
//! ```text
//! | meta... | b0:t0 .. b0:tN-1 | b1:t0 .. b1:tN-1 | ... |
//! ```
//!
//! [`FlatLayout`] is the only place that turns a (band, time step) pair into
//! a position in that row.

use serde::{Deserialize, Serialize};

/// Leading identifier/label columns of a time-series feature table.
pub const TIME_SERIES_METADATA_COLUMNS: usize = 2;

/// Which feature table a selection is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionLayout {
    /// Sample feature tables: two metadata columns, then band values.
    #[default]
    TimeSeries,
    /// Raster blocks: band values only.
    Raster,
}

impl SelectionLayout {
    pub fn metadata_columns(self) -> usize {
        match self {
            SelectionLayout::TimeSeries => TIME_SERIES_METADATA_COLUMNS,
            SelectionLayout::Raster => 0,
        }
    }
}

/// Geometry of a flattened feature row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatLayout {
    pub num_bands: usize,
    pub timeline_len: usize,
    pub metadata_columns: usize,
}

impl FlatLayout {
    pub fn new(num_bands: usize, timeline_len: usize, layout: SelectionLayout) -> Self {
        Self {
            num_bands,
            timeline_len,
            metadata_columns: layout.metadata_columns(),
        }
    }

    /// Offset of (`band`, `time_step`) among the band values, metadata excluded.
    pub fn flat_index(&self, band: usize, time_step: usize) -> usize {
        band * self.timeline_len + time_step
    }

    /// Column of (`band`, `time_step`) in the full row, metadata included.
    pub fn column(&self, band: usize, time_step: usize) -> usize {
        self.metadata_columns + self.flat_index(band, time_step)
    }

    /// Column of a value already expressed as a flat index.
    pub fn column_of_flat(&self, flat_index: usize) -> usize {
        self.metadata_columns + flat_index
    }

    /// Total row width.
    pub fn width(&self) -> usize {
        self.metadata_columns + self.num_bands * self.timeline_len
    }
}
