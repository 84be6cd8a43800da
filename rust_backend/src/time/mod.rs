pub mod calendar;
pub mod interval;

pub use calendar::{date_with_phase, days_between, parse_date};
pub use interval::{Interval, IntervalUnit};
