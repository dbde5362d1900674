//! Expansion of partial datetime strings into concrete instant ranges.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Serialize, Serializer};
use std::{fmt::Display, str::FromStr};

const MONTH_DAYS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A resolved datetime range.
///
/// `end` is `None` only when the range came from a single full timestamp or a
/// single instant. Partial dates always expand to a concrete end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatetimeRange {
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
}

impl DatetimeRange {
    /// Creates a range from a start and an optional end.
    ///
    /// If the end is before the start, the two are swapped.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use stac_search::DatetimeRange;
    ///
    /// let early = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
    /// let late = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    /// let range = DatetimeRange::new(late, Some(early));
    /// assert_eq!(range.start(), early);
    /// assert_eq!(range.end(), Some(late));
    /// ```
    pub fn new(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> DatetimeRange {
        match end {
            Some(end) if end < start => {
                tracing::warn!(
                    "invalid datetime range, start={start} is after end={end}, switching values"
                );
                DatetimeRange {
                    start: end,
                    end: Some(start),
                }
            }
            _ => DatetimeRange { start, end },
        }
    }

    /// Returns the start of this range.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the end of this range, if there is one.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }
}

impl FromStr for DatetimeRange {
    type Err = Error;

    /// Parses either a single component or a `start/end` range.
    fn from_str(s: &str) -> Result<DatetimeRange> {
        if s.contains('/') {
            resolve_range(s)
        } else {
            let (start, end) = resolve_component(s)?;
            Ok(DatetimeRange { start, end })
        }
    }
}

impl Display for DatetimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", to_utc_string(&self.start))?;
        if let Some(end) = self.end.as_ref() {
            write!(f, "/{}", to_utc_string(end))?;
        }
        Ok(())
    }
}

impl Serialize for DatetimeRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Formats an instant as RFC 3339 in UTC with a `Z` suffix.
///
/// Fractional seconds are only written when they are non-zero.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
///
/// let datetime = Utc.with_ymd_and_hms(2022, 3, 15, 12, 30, 45).unwrap();
/// assert_eq!(stac_search::datetime::to_utc_string(&datetime), "2022-03-15T12:30:45Z");
/// ```
pub fn to_utc_string(datetime: &DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Resolves one datetime component into a start and an optional end.
///
/// - `YYYY` expands to the whole year
/// - `YYYY-MM` expands to the whole month
/// - `YYYY-MM-DD` expands to the whole day
/// - `YYYY-MM-DDThh:mm:ss[.fff][Z|±hh:mm]` is an exact instant with no end,
///   assumed to be UTC when no offset is given
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use stac_search::datetime::resolve_component;
///
/// let (start, end) = resolve_component("2022-03").unwrap();
/// assert_eq!(start, Utc.with_ymd_and_hms(2022, 3, 1, 0, 0, 0).unwrap());
/// assert_eq!(end, Some(Utc.with_ymd_and_hms(2022, 3, 31, 23, 59, 59).unwrap()));
/// ```
pub fn resolve_component(component: &str) -> Result<(DateTime<Utc>, Option<DateTime<Utc>>)> {
    let invalid = || Error::InvalidDatetimeComponent(component.to_string());
    if !component.is_ascii() {
        return Err(invalid());
    }
    let (date, time) = match component.find(['T', 't']) {
        Some(index) => (&component[..index], Some(&component[index + 1..])),
        None => (component, None),
    };

    let mut parts = date.split('-');
    let year = parts
        .next()
        .filter(|s| is_digits(s, 4))
        .ok_or_else(invalid)?;
    let month = parts.next().map(|s| digits(s, 2).ok_or_else(invalid)).transpose()?;
    let day = parts.next().map(|s| digits(s, 2).ok_or_else(invalid)).transpose()?;
    if parts.next().is_some() {
        return Err(invalid());
    }

    if let Some(time) = time {
        if day.is_none() || !is_time(time) {
            return Err(invalid());
        }
        return parse_timestamp(component)
            .map(|instant| (instant, None))
            .ok_or_else(invalid);
    }

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let midnight = |month: u32, day: u32| {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|datetime| datetime.and_utc())
            .ok_or_else(invalid)
    };
    let (start, days) = match (month, day) {
        (Some(month), Some(day)) => (midnight(month, day)?, 1),
        (Some(month), None) => (midnight(month, 1)?, days_in_month(year, month)),
        _ => (midnight(1, 1)?, if is_leap_year(year) { 366 } else { 365 }),
    };
    let end = start + TimeDelta::days(days) - TimeDelta::seconds(1);
    Ok((start, Some(end)))
}

/// Resolves a `start/end` string into a range.
///
/// Each side is resolved with [resolve_component]. The range starts at the
/// start of the first side and ends at the end of the second side. If the
/// second side starts before the first one, the sides are switched.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use stac_search::datetime::resolve_range;
///
/// let range = resolve_range("2019/2018").unwrap();
/// assert_eq!(range.start(), Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap());
/// assert_eq!(range.end(), Some(Utc.with_ymd_and_hms(2019, 12, 31, 23, 59, 59).unwrap()));
/// ```
pub fn resolve_range(s: &str) -> Result<DatetimeRange> {
    let components: Vec<&str> = s.split('/').collect();
    let [first, second] = components.as_slice() else {
        return Err(Error::InvalidDatetimeRange(components.len()));
    };
    let (start, first_end) = resolve_component(first)?;
    let (second_start, end) = resolve_component(second)?;
    if second_start < start {
        tracing::warn!("invalid datetime range {s}, start must be before end, switching values");
        Ok(DatetimeRange {
            start: second_start,
            end: Some(first_end.unwrap_or(start)),
        })
    } else {
        Ok(DatetimeRange {
            start,
            end: Some(end.unwrap_or(second_start)),
        })
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.to_ascii_uppercase();
    DateTime::parse_from_rfc3339(&s)
        .map(|datetime| datetime.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|datetime| datetime.and_utc())
        })
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> i64 {
    let days = MONTH_DAYS[(month as usize - 1) % 12];
    if month == 2 && is_leap_year(year) {
        days + 1
    } else {
        days
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

fn digits(s: &str, len: usize) -> Option<u32> {
    if is_digits(s, len) { s.parse().ok() } else { None }
}

/// `hh:mm:ss[.f+][Z|z|±hh:mm]`
fn is_time(time: &str) -> bool {
    fn is_clock(s: &str, fields: usize) -> bool {
        s.len() == fields * 3 - 1 && s.split(':').all(|part| is_digits(part, 2))
    }

    if time.len() < 8 || !is_clock(&time[..8], 3) {
        return false;
    }
    let mut rest = &time[8..];
    if let Some(fraction) = rest.strip_prefix('.') {
        let len = fraction
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(fraction.len());
        if len == 0 {
            return false;
        }
        rest = &fraction[len..];
    }
    match rest {
        "" | "Z" | "z" => true,
        offset => {
            (offset.starts_with('+') || offset.starts_with('-')) && is_clock(&offset[1..], 2)
        }
    }
}
