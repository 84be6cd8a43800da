use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{AlignmentError, AlignmentResult};

/// Calendar unit of an [`Interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalUnit {
    Day,
    Week,
    Month,
    Year,
}

impl IntervalUnit {
    fn parse(unit: &str) -> Option<Self> {
        match unit.to_lowercase().as_str() {
            "d" | "day" | "days" => Some(IntervalUnit::Day),
            "w" | "week" | "weeks" => Some(IntervalUnit::Week),
            "m" | "month" | "months" => Some(IntervalUnit::Month),
            "y" | "year" | "years" => Some(IntervalUnit::Year),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            IntervalUnit::Day => "day",
            IntervalUnit::Week => "week",
            IntervalUnit::Month => "month",
            IntervalUnit::Year => "year",
        }
    }
}

/// Repeat cadence between successive classification windows.
///
/// Parsed from strings such as `"12 months"`, `"1 year"` or `"16 days"`.
/// Month and year steps are calendar steps: adding one month to Jan 31
/// lands on the last day of February.
///
/// # Examples
///
/// ```
/// use sits_timeline::time::Interval;
/// use chrono::NaiveDate;
///
/// let interval: Interval = "12 months".parse().unwrap();
/// let start = NaiveDate::from_ymd_opt(2000, 8, 13).unwrap();
/// assert_eq!(
///     interval.add_to(start).unwrap(),
///     NaiveDate::from_ymd_opt(2001, 8, 13).unwrap()
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Interval {
    count: u32,
    unit: IntervalUnit,
}

impl Interval {
    pub fn new(count: u32, unit: IntervalUnit) -> AlignmentResult<Self> {
        if count == 0 {
            return Err(AlignmentError::InvalidInterval {
                input: format!("0 {}", unit.name()),
                reason: "interval must be positive".to_string(),
            });
        }
        Ok(Self { count, unit })
    }

    pub fn months(count: u32) -> AlignmentResult<Self> {
        Self::new(count, IntervalUnit::Month)
    }

    pub fn days(count: u32) -> AlignmentResult<Self> {
        Self::new(count, IntervalUnit::Day)
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn unit(&self) -> IntervalUnit {
        self.unit
    }

    /// Adds the interval to `date`, or `None` when the result leaves chrono's range.
    pub fn add_to(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self.unit {
            IntervalUnit::Day => date.checked_add_days(Days::new(u64::from(self.count))),
            IntervalUnit::Week => date.checked_add_days(Days::new(7 * u64::from(self.count))),
            IntervalUnit::Month => date.checked_add_months(Months::new(self.count)),
            IntervalUnit::Year => date.checked_add_months(Months::new(self.count.checked_mul(12)?)),
        }
    }

    /// Like [`Interval::add_to`], but reports overflow as an error.
    pub fn advance(&self, date: NaiveDate) -> AlignmentResult<NaiveDate> {
        self.add_to(date).ok_or_else(|| AlignmentError::InvalidInterval {
            input: self.to_string(),
            reason: format!("adding the interval to {} leaves the calendar range", date),
        })
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self {
            count: 12,
            unit: IntervalUnit::Month,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.count == 1 { "" } else { "s" };
        write!(f, "{} {}{}", self.count, self.unit.name(), plural)
    }
}

impl FromStr for Interval {
    type Err = AlignmentError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| AlignmentError::InvalidInterval {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let split_at = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| invalid("missing unit (expected e.g. '12 months')"))?;
        let (digits, unit) = trimmed.split_at(split_at);

        if digits.is_empty() {
            return Err(invalid("missing count (expected e.g. '12 months')"));
        }
        let count: u32 = digits.parse().map_err(|_| invalid("count is not a number"))?;
        let unit = IntervalUnit::parse(unit.trim())
            .ok_or_else(|| invalid("unknown unit (use day, week, month or year)"))?;

        Interval::new(count, unit).map_err(|_| invalid("interval must be positive"))
    }
}

impl TryFrom<String> for Interval {
    type Error = AlignmentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.to_string()
    }
}
