//! Boolean column masks selecting one classification window from a wide feature row.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::layout::{FlatLayout, SelectionLayout};
use super::time_index::{time_indexes_for, TimeIndex};
use crate::core::ClassificationInfo;
use crate::error::{AlignmentError, AlignmentResult};

/// Column mask for one window: metadata columns plus each band's window range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionMask(Vec<bool>);

impl SelectionMask {
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selected columns.
    pub fn selected_count(&self) -> usize {
        self.0.iter().filter(|selected| **selected).count()
    }

    /// Positions of the selected columns, ascending.
    pub fn selected_columns(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(column, selected)| selected.then_some(column))
            .collect()
    }
}

/// When mask construction fans out over a thread pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOptions {
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default = "default_min_parallel_windows")]
    pub min_parallel_windows: usize,
}

fn default_parallel() -> bool {
    true
}

fn default_min_parallel_windows() -> usize {
    8
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            min_parallel_windows: default_min_parallel_windows(),
        }
    }
}

/// Masks over a time-series feature table (two leading metadata columns).
///
/// Each mask has `num_bands · num_time_steps + 2` entries; columns 0 and 1
/// are always selected, then each band's time-index range shifted past the
/// metadata.
///
/// # Examples
///
/// ```
/// use sits_timeline::transformations::{build_selection_masks, TimeIndex};
///
/// // Two bands over a 5-step timeline, window covering steps 1..=2
/// let index = TimeIndex::from(vec![1, 2, 6, 7]);
/// let masks = build_selection_masks(&[index], 2, 5).unwrap();
///
/// assert_eq!(masks[0].len(), 12);
/// assert_eq!(masks[0].selected_columns(), vec![0, 1, 3, 4, 8, 9]);
/// ```
pub fn build_selection_masks(
    time_indexes: &[TimeIndex],
    num_bands: usize,
    num_time_steps: usize,
) -> AlignmentResult<Vec<SelectionMask>> {
    let layout = FlatLayout::new(num_bands, num_time_steps, SelectionLayout::TimeSeries);
    build_masks(time_indexes, &layout, &SelectionOptions::default())
}

/// Masks for every window of a classification job under `layout`.
pub fn selection_masks_for(
    info: &ClassificationInfo,
    layout: SelectionLayout,
    options: &SelectionOptions,
) -> AlignmentResult<Vec<SelectionMask>> {
    let flat = FlatLayout::new(info.bands().len(), info.timeline().len(), layout);
    build_masks(&time_indexes_for(info), &flat, options)
}

/// Masks for arbitrary time indexes over an explicit layout.
pub fn build_masks(
    time_indexes: &[TimeIndex],
    layout: &FlatLayout,
    options: &SelectionOptions,
) -> AlignmentResult<Vec<SelectionMask>> {
    let build = |(window, time_index): (usize, &TimeIndex)| build_mask(window, time_index, layout);

    if options.parallel && time_indexes.len() >= options.min_parallel_windows {
        debug!(
            "Building {} selection masks of width {} on {} threads",
            time_indexes.len(),
            layout.width(),
            rayon::current_num_threads()
        );
        time_indexes.par_iter().enumerate().map(build).collect()
    } else {
        time_indexes.iter().enumerate().map(build).collect()
    }
}

fn build_mask(
    window: usize,
    time_index: &TimeIndex,
    layout: &FlatLayout,
) -> AlignmentResult<SelectionMask> {
    let width = layout.width();
    let mut selected = vec![false; width];
    let metadata = layout.metadata_columns.min(width);
    selected[..metadata].fill(true);

    for range in time_index.band_ranges() {
        let first = layout.column_of_flat(*range.start());
        let last = layout.column_of_flat(*range.end());
        if last >= width {
            return Err(AlignmentError::SelectionOutOfBounds {
                window,
                column: last,
                width,
            });
        }
        if first <= last {
            selected[first..=last].fill(true);
        }
    }

    Ok(SelectionMask(selected))
}

/// Flat band-value positions selected by one raster window, in band order.
///
/// Raster blocks carry no metadata columns, so these positions index the
/// concatenated band layers directly.
pub fn raster_columns(time_index: &TimeIndex) -> Vec<usize> {
    time_index.band_ranges().flatten().collect()
}
