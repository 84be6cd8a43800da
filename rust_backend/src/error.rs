//! Error types for timeline alignment and column selection.
//!
//! Every failure here is a deterministic mismatch between the training
//! samples and the coverage being classified, so none of them is retryable.
//! Callers abort the classification job and report the message as-is.

use chrono::NaiveDate;

/// Result type for alignment operations
pub type AlignmentResult<T> = Result<T, AlignmentError>;

/// Error type for alignment operations
#[derive(Debug, thiserror::Error)]
pub enum AlignmentError {
    /// The descriptor carried no usable timeline.
    #[error("Invalid timeline: {0}")]
    InvalidTimeline(String),

    /// The first window would start too far outside the timeline.
    #[error(
        "Misaligned start date {date}: outside timeline [{first}, {last}] by more than one cadence step ({cadence_days} days)"
    )]
    MisalignedStart {
        date: NaiveDate,
        first: NaiveDate,
        last: NaiveDate,
        cadence_days: i64,
    },

    /// The end date of the last window is too far outside the timeline.
    #[error(
        "Misaligned end date {date}: outside timeline [{first}, {last}] by more than one cadence step ({cadence_days} days)"
    )]
    MisalignedEnd {
        date: NaiveDate,
        first: NaiveDate,
        last: NaiveDate,
        cadence_days: i64,
    },

    /// A window starting at `start_date` needs more entries than the timeline holds.
    #[error(
        "Window starting at {start_date} (index {start_index}) needs {num_samples} samples but the timeline has only {timeline_len}; compare the timeline with the sample dates"
    )]
    WindowOverflow {
        start_date: NaiveDate,
        start_index: usize,
        num_samples: usize,
        timeline_len: usize,
    },

    /// A window date is not an entry of the timeline.
    #[error("Date {date} of window {window} not found in timeline")]
    DateNotFound { date: NaiveDate, window: usize },

    #[error("Invalid interval '{input}': {reason}")]
    InvalidInterval { input: String, reason: String },

    #[error("Sample set is empty: {0}")]
    EmptySamples(String),

    /// A time index points past the flattened feature layout.
    #[error("Window {window}: column {column} is outside a mask of {width} columns")]
    SelectionOutOfBounds {
        window: usize,
        column: usize,
        width: usize,
    },

    #[error("Selection mask has {mask} columns but the feature table has {table}")]
    MaskWidthMismatch { mask: usize, table: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed JSON input, with the path to the offending field.
    #[error("Parse error at '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("Feature table error: {0}")]
    FeatureTable(#[from] polars::prelude::PolarsError),
}

impl AlignmentError {
    /// Short, stable name of the error kind, used in logs and Python exceptions.
    pub fn kind(&self) -> &'static str {
        match self {
            AlignmentError::InvalidTimeline(_) => "InvalidTimelineError",
            AlignmentError::MisalignedStart { .. } => "MisalignedStartError",
            AlignmentError::MisalignedEnd { .. } => "MisalignedEndError",
            AlignmentError::WindowOverflow { .. } => "WindowOverflowError",
            AlignmentError::DateNotFound { .. } => "DateNotFoundError",
            AlignmentError::InvalidInterval { .. } => "InvalidIntervalError",
            AlignmentError::EmptySamples(_) => "EmptySamplesError",
            AlignmentError::SelectionOutOfBounds { .. } => "SelectionOutOfBoundsError",
            AlignmentError::MaskWidthMismatch { .. } => "MaskWidthMismatchError",
            AlignmentError::Configuration(_) => "ConfigurationError",
            AlignmentError::Parse { .. } => "ParseError",
            AlignmentError::FeatureTable(_) => "FeatureTableError",
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for AlignmentError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        AlignmentError::Parse {
            path: err.path().to_string(),
            message: err.into_inner().to_string(),
        }
    }
}

impl From<serde_json::Error> for AlignmentError {
    fn from(err: serde_json::Error) -> Self {
        AlignmentError::Parse {
            path: ".".to_string(),
            message: err.to_string(),
        }
    }
}
