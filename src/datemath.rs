//! Calendar arithmetic on plain dates.
//!
//! Months are 0-based everywhere in this crate (January = 0). All functions
//! here are pure; the only wall-clock access is [`today`], which goes through
//! [`SystemClock`](crate::clock::SystemClock).

use chrono::{Datelike, Duration, Month, NaiveDate};
use num_traits::FromPrimitive;
use serde_with::DeserializeFromStr;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, ErrorKind};

/// Names indexed by 0-based month.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// Wider than the whole representable date range.
const MAX_SPAN_DAYS: i64 = 200_000_000;

/// Column labels of a Sunday-first week.
pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// A date without time of day.
///
/// Ordering is lexicographic on (year, month, day), which is exactly the
/// chronological order of the wrapped `NaiveDate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, DeserializeFromStr)]
pub struct CalendarDate(NaiveDate);

/// The displayed month of a picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

// One year of slack on both ends keeps whole-grid arithmetic (which reaches
// into adjacent months) inside the representable range.
fn clamp_year(year: i64) -> i32 {
    let min = NaiveDate::MIN.year() as i64 + 1;
    let max = NaiveDate::MAX.year() as i64 - 1;
    year.clamp(min, max) as i32
}

fn first_of(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .expect("year is clamped and month is in 0..12")
}

impl CalendarDate {
    /// Builds a date from already valid components. Returns `None` for
    /// impossible combinations such as February 30th.
    pub fn from_ymd_opt(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month.checked_add(1)?, day).map(CalendarDate)
    }

    /// Builds a date, carrying out-of-range months and days into the next
    /// unit: day 32 of January is February 1st, month 12 is January of the
    /// following year, day 0 is the last day of the previous month.
    pub fn from_ymd_normalized(year: i32, month: i32, day: i32) -> Self {
        let cursor = MonthCursor::new(year, month);
        add_days(start_of_month(cursor), day as i64 - 1)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// 0-based month.
    pub fn month(&self) -> u32 {
        self.0.month0()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The month this date falls into.
    pub fn cursor(&self) -> MonthCursor {
        MonthCursor::new(self.year(), self.month() as i32)
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate(date)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Parses ISO `YYYY-MM-DD`.
impl FromStr for CalendarDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CalendarDate(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?))
    }
}

impl MonthCursor {
    /// Creates a cursor, wrapping months outside `0..12` into the adjacent
    /// years.
    pub fn new(year: i32, month: i32) -> Self {
        let year = year as i64 + month.div_euclid(12) as i64;
        MonthCursor {
            year: clamp_year(year),
            month: month.rem_euclid(12) as u32,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 0-based month.
    pub fn month0(&self) -> u32 {
        self.month
    }

    pub fn month(&self) -> Month {
        Month::from_u32(self.month + 1).unwrap_or(Month::January)
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize]
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

/// Parses `YYYY-MM` with a 1-based month, as written by people.
impl FromStr for MonthCursor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::new(ErrorKind::DateParse, &format!("'{}' is not YYYY-MM", s));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: i32 = month.parse().map_err(|_| invalid())?;

        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(MonthCursor::new(year, month - 1))
    }
}

pub fn start_of_month(cursor: MonthCursor) -> CalendarDate {
    CalendarDate(first_of(cursor.year, cursor.month))
}

pub fn days_of_month(cursor: MonthCursor) -> u32 {
    let next = add_months(cursor, 1);

    first_of(next.year, next.month)
        .signed_duration_since(first_of(cursor.year, cursor.month))
        .num_days() as u32
}

pub fn end_of_month(cursor: MonthCursor) -> CalendarDate {
    add_days(start_of_month(cursor), days_of_month(cursor) as i64 - 1)
}

pub fn add_months(cursor: MonthCursor, delta: i32) -> MonthCursor {
    let total = cursor.month as i64 + delta as i64;
    MonthCursor {
        year: clamp_year(cursor.year as i64 + total.div_euclid(12)),
        month: total.rem_euclid(12) as u32,
    }
}

/// Moves `date` by `delta` days. Saturates at the ends of the representable
/// range instead of overflowing.
pub fn add_days(date: CalendarDate, delta: i64) -> CalendarDate {
    let saturated = if delta < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    };

    if !(-MAX_SPAN_DAYS..=MAX_SPAN_DAYS).contains(&delta) {
        return CalendarDate(saturated);
    }

    date.0
        .checked_add_signed(Duration::days(delta))
        .map_or(CalendarDate(saturated), CalendarDate)
}

/// 0 = Sunday, 6 = Saturday.
pub fn day_of_week(date: CalendarDate) -> u32 {
    date.0.weekday().num_days_from_sunday()
}

pub fn compare(a: &CalendarDate, b: &CalendarDate) -> Ordering {
    a.cmp(b)
}

pub fn same_date(a: &CalendarDate, b: &CalendarDate) -> bool {
    compare(a, b) == Ordering::Equal
}

/// Today according to the system's local time zone.
pub fn today() -> CalendarDate {
    SystemClock.today()
}
