//! Month-key calendar
//!
//! A month key is the canonical `YYYY-MM` identifier of a calendar month. All
//! monthly reports select records through the half-open range `[start, end)`
//! of a key, where `end` is the first instant of the following month.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MONTH_KEY_PATTERN: &str = r"^\d{4}-(0[1-9]|1[0-2])$";

const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

fn month_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MONTH_KEY_PATTERN).expect("valid regex"))
}

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

/// Half-open timestamp interval covering one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl MonthRange {
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start && ts < self.end
    }
}

impl MonthKey {
    /// Build a key from a year and 1-based month
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::InvalidMonthKey(format!("{:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// The month a date or timestamp falls in
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing `now`
    pub fn current(now: NaiveDateTime) -> Self {
        Self::from_date(&now)
    }

    /// Resolve a caller-supplied key.
    ///
    /// `None` falls back to the current month. A supplied key that does not
    /// match `YYYY-MM` is rejected, never coerced.
    pub fn resolve(key: Option<&str>, now: NaiveDateTime) -> Result<Self> {
        match key {
            Some(key) => key.parse(),
            None => Ok(Self::current(now)),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("month key holds a valid month")
    }

    /// First day of the following month, past the last supported key if need be
    fn end_day(&self) -> NaiveDate {
        self.first_day() + Months::new(1)
    }

    /// `[first instant of this month, first instant of the next month)`
    pub fn range(&self) -> MonthRange {
        MonthRange {
            start: self.first_day().and_time(chrono::NaiveTime::MIN),
            end: self.end_day().and_time(chrono::NaiveTime::MIN),
        }
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.range().contains(ts)
    }

    /// The month before this one; `0000-01` has no predecessor and returns itself
    pub fn previous(&self) -> Self {
        if self.year == MIN_YEAR && self.month == 1 {
            return *self;
        }
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The month after this one; `9999-12` has no successor and returns itself
    pub fn next(&self) -> Self {
        if self.year == MAX_YEAR && self.month == 12 {
            return *self;
        }
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Number of calendar days, accounting for leap years
    pub fn days_in_month(&self) -> u32 {
        (self.end_day() - self.first_day()).num_days() as u32
    }

    /// The `count` months ending with this one, oldest first.
    ///
    /// Stops early at `0000-01`.
    pub fn trailing(&self, count: usize) -> Vec<Self> {
        let mut months = Vec::with_capacity(count);
        let mut cursor = *self;
        for _ in 0..count {
            months.push(cursor);
            let previous = cursor.previous();
            if previous == cursor {
                break;
            }
            cursor = previous;
        }
        months.reverse();
        months
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if !month_key_regex().is_match(s) {
            return Err(Error::InvalidMonthKey(s.to_string()));
        }
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| Error::InvalidMonthKey(s.to_string()))?;
        let year = year
            .parse()
            .map_err(|_| Error::InvalidMonthKey(s.to_string()))?;
        let month = month
            .parse()
            .map_err(|_| Error::InvalidMonthKey(s.to_string()))?;
        Ok(Self { year, month })
    }
}

impl TryFrom<String> for MonthKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Month key of `date`, or of `now` when no date is given
pub fn month_key(date: Option<NaiveDateTime>, now: NaiveDateTime) -> String {
    MonthKey::current(date.unwrap_or(now)).to_string()
}

/// Half-open range of a `YYYY-MM` key
pub fn month_range(key: &str) -> Result<MonthRange> {
    Ok(key.parse::<MonthKey>()?.range())
}

/// Key of the month before `key`, rolling January back to December
pub fn previous_month_key(key: &str) -> Result<String> {
    Ok(key.parse::<MonthKey>()?.previous().to_string())
}
