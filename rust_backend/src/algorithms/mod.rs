//! Timeline alignment algorithms.
//!
//! These functions turn a full observation timeline and a reference window
//! into the list of classification windows that tile it.
//!
//! # Components
//!
//! - [`validity`]: start/end date tolerance checks against the timeline bounds
//! - [`window_count`]: number of samples in one reference interval
//! - [`matching`]: tiling the timeline with date windows
//! - [`indexes`]: date windows to index windows
//!
//! # Example
//!
//! ```
//! use sits_timeline::algorithms::{match_indexes, match_timeline};
//! use sits_timeline::core::domain::Timeline;
//! use sits_timeline::time::Interval;
//! use chrono::{Days, NaiveDate};
//!
//! let first = NaiveDate::from_ymd_opt(2000, 2, 18).unwrap();
//! let timeline = Timeline::new((0..92).map(|i| first + Days::new(16 * i)).collect()).unwrap();
//! let interval: Interval = "12 months".parse().unwrap();
//!
//! let dates = match_timeline(
//!     &timeline,
//!     NaiveDate::from_ymd_opt(2000, 9, 13).unwrap(),
//!     NaiveDate::from_ymd_opt(2001, 8, 29).unwrap(),
//!     &interval,
//! )
//! .unwrap();
//! let indexes = match_indexes(&timeline, &dates).unwrap();
//! assert_eq!(dates.len(), indexes.len());
//! ```

pub mod indexes;
pub mod matching;
pub mod validity;
pub mod window_count;

pub use indexes::match_indexes;
pub use matching::match_timeline;
pub use validity::{is_valid_end_date, is_valid_start_date};
pub use window_count::num_samples;
