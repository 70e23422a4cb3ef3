//! Report calendar: validated dates in the report timezone and Thai (Buddhist era) formatting.
//!
//! All report dates are wall-clock values in Asia/Bangkok (UTC+7, no DST).
//! Instants from other zones are shifted into that zone on construction.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Offset of the report timezone (Asia/Bangkok) from UTC, in seconds.
pub const REPORT_UTC_OFFSET_SECONDS: i64 = 7 * 3600;

/// Years between the Common Era and the Buddhist Era.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

const THAI_MONTH_ABBREVIATIONS: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.", "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.",
    "ธ.ค.",
];

/// A date value that cannot be resolved to a real calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDateError {
    #[error("cannot parse '{0}' as a date")]
    Unparseable(String),

    #[error("month {0} is outside 1-12")]
    MonthOutOfRange(u32),

    #[error("{year:04}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidDay { year: i32, month: u32, day: u32 },

    #[error("{hour:02}:{minute:02}:{second:02} is not a valid time of day")]
    InvalidTime { hour: u32, minute: u32, second: u32 },
}

/// A Gregorian date, optionally with a time of day, in the report timezone.
///
/// Only valid dates can be constructed, so formatting never sees a month
/// outside 1-12 unless it is handed a raw month number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDate {
    date: NaiveDate,
    time: Option<NaiveTime>,
}

impl CalendarDate {
    /// Builds a date-only value.
    ///
    /// # Errors
    ///
    /// [`InvalidDateError::MonthOutOfRange`] for month 0 or above 12,
    /// [`InvalidDateError::InvalidDay`] for days that do not exist (e.g. Feb 30).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, InvalidDateError> {
        if !(1..=12).contains(&month) {
            return Err(InvalidDateError::MonthOutOfRange(month));
        }

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(InvalidDateError::InvalidDay { year, month, day })?;

        Ok(Self { date, time: None })
    }

    /// Attaches a time of day.
    ///
    /// # Errors
    ///
    /// [`InvalidDateError::InvalidTime`] when the components are out of range.
    pub fn with_hms(self, hour: u32, minute: u32, second: u32) -> Result<Self, InvalidDateError> {
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or(
            InvalidDateError::InvalidTime {
                hour,
                minute,
                second,
            },
        )?;

        Ok(self.with_time(time))
    }

    pub fn with_time(self, time: NaiveTime) -> Self {
        Self {
            time: Some(time),
            ..self
        }
    }

    pub fn from_naive_date(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    /// Wraps a wall-clock value already expressed in the report timezone.
    pub fn from_naive_datetime(datetime: NaiveDateTime) -> Self {
        Self {
            date: datetime.date(),
            time: Some(datetime.time()),
        }
    }

    /// Converts an instant from any timezone into report-local wall-clock time.
    pub fn from_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        let local = instant.naive_utc() + TimeDelta::seconds(REPORT_UTC_OFFSET_SECONDS);
        Self::from_naive_datetime(local)
    }

    /// Current wall-clock time in the report timezone.
    pub fn now() -> Self {
        Self::from_instant(&Utc::now())
    }

    /// Parses the date formats produced by analytics sources and config files.
    ///
    /// Accepted inputs:
    ///
    /// - `20211231` (analytics date dimension)
    /// - `2021-12-31`
    /// - `2021-12-31 09:05`, `2021-12-31 09:05:00`, `2021-12-31 09:05:00.250`
    ///   (space or `T` separator)
    /// - RFC 3339 with offset, e.g. `2021-12-31T02:05:00Z` (shifted to UTC+7)
    ///
    /// # Errors
    ///
    /// [`InvalidDateError::Unparseable`] when the text matches none of the
    /// formats; range errors from [`CalendarDate::from_ymd`] when it does but
    /// the components are invalid.
    pub fn parse(input: &str) -> Result<Self, InvalidDateError> {
        let input = input.trim();
        let unparseable = || InvalidDateError::Unparseable(input.to_string());

        if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
            return Ok(Self::from_instant(&instant));
        }

        let (date_part, time_part) = match input.split_once([' ', 'T']) {
            Some((date, time)) => (date, Some(time.trim())),
            None => (input, None),
        };

        let (year, month, day) = split_date(date_part).ok_or_else(unparseable)?;
        let date = Self::from_ymd(year, month, day)?;

        match time_part {
            None => Ok(date),
            Some(time) => {
                let time = NaiveTime::parse_from_str(time, "%H:%M:%S%.f")
                    .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
                    .map_err(|_| unparseable())?;
                Ok(date.with_time(time))
            }
        }
    }

    /// The calendar day, without time of day.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Day-granularity equality; time of day is ignored.
    pub fn same_day(&self, other: &CalendarDate) -> bool {
        self.date == other.date
    }
}

/// Splits `YYYYMMDD` or `YYYY-MM-DD` into numeric components without range checks.
fn split_date(text: &str) -> Option<(i32, u32, u32)> {
    if text.len() == 8 && text.bytes().all(|b| b.is_ascii_digit()) {
        return Some((
            text[..4].parse().ok()?,
            text[4..6].parse().ok()?,
            text[6..].parse().ok()?,
        ));
    }

    let mut parts = text.splitn(3, '-');
    let year = parts.next()?.parse().ok()?;
    let month = parts.next()?.parse().ok()?;
    let day = parts.next()?.parse().ok()?;
    Some((year, month, day))
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d"))?;
        if let Some(time) = self.time {
            write!(f, " {}", time.format("%H:%M:%S%.f"))?;
        }
        Ok(())
    }
}

impl FromStr for CalendarDate {
    type Err = InvalidDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Thai abbreviated month name for a 1-based month number.
///
/// # Errors
///
/// [`InvalidDateError::MonthOutOfRange`] for 0 or anything above 12.
pub fn thai_month_abbrev(month: u32) -> Result<&'static str, InvalidDateError> {
    match month {
        1..=12 => Ok(THAI_MONTH_ABBREVIATIONS[(month - 1) as usize]),
        _ => Err(InvalidDateError::MonthOutOfRange(month)),
    }
}

/// Formats a date as `"{day} {month} {year BE}"`, e.g. `31 ธ.ค. 2564`.
///
/// With `include_time`, appends ` เวลา HH:MM` (24-hour). A date without a
/// time of day is shown as midnight.
///
/// # Errors
///
/// Propagates [`InvalidDateError`] from the month lookup.
pub fn to_thai_date(date: &CalendarDate, include_time: bool) -> Result<String, InvalidDateError> {
    let month = thai_month_abbrev(date.month())?;
    let year_be = date.year() + BUDDHIST_ERA_OFFSET;

    let mut formatted = format!("{} {} {}", date.day(), month, year_be);

    if include_time {
        let time = date.time().unwrap_or_default();
        formatted.push_str(&format!(" เวลา {:02}:{:02}", time.hour(), time.minute()));
    }

    Ok(formatted)
}

/// Parses `input` with [`CalendarDate::parse`] and formats it with [`to_thai_date`].
pub fn to_thai_date_str(input: &str, include_time: bool) -> Result<String, InvalidDateError> {
    let date = CalendarDate::parse(input)?;
    to_thai_date(&date, include_time)
}
