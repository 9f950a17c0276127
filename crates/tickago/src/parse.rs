//! Date input normalization.
//!
//! Every public entry point funnels its date arguments through [`parse_date`],
//! which turns an already-structured value, an epoch in milliseconds, or a
//! date string into an [`Instant`] on the host's local wall clock. Anything
//! that cannot be resolved to a real calendar instant is rejected with
//! [`TickError::InvalidDate`]; nothing is silently defaulted.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use tracing::{debug, trace};

use crate::error::{Result, TickError};

/// Largest epoch offset (in milliseconds) accepted from numeric input: ±100,000,000 days.
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// Wall-clock formats tried (in order) when a string carries no UTC offset.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Offset-bearing forms RFC 3339 rejects because the seconds are missing.
/// A trailing `Z` is rewritten to `+00:00` before these are tried.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

/// Date-only formats, resolved to local midnight.
const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

// ── Instant ─────────────────────────────────────────────────────────────────

/// An immutable point in time, viewed through the host's local timezone.
///
/// Calendar accessors (`year`, `month`, ...) return local wall-clock fields;
/// ordering and subtraction operate on the underlying absolute instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(DateTime<Local>);

impl Instant {
    /// The current instant from the system clock.
    pub fn now() -> Self {
        Instant(Local::now())
    }

    /// Wrap any chrono datetime, converting it to local time.
    pub fn from_datetime<Tz: TimeZone>(dt: DateTime<Tz>) -> Self {
        Instant(dt.with_timezone(&Local))
    }

    /// Interpret a wall-clock datetime in the local timezone.
    ///
    /// A time skipped by a DST transition is rejected; a repeated one
    /// resolves to its earlier occurrence.
    pub fn from_local_naive(naive: NaiveDateTime) -> Result<Self> {
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(Instant)
            .ok_or_else(|| {
                TickError::InvalidDate(format!("'{naive}' does not exist in the local timezone"))
            })
    }

    /// Build an instant from milliseconds since the Unix epoch.
    pub fn from_epoch_millis(millis: i64) -> Result<Self> {
        Utc.timestamp_millis_opt(millis)
            .single()
            .map(Instant::from_datetime)
            .ok_or_else(|| TickError::InvalidDate(format!("epoch {millis}ms is out of range")))
    }

    /// Milliseconds since the Unix epoch.
    pub fn to_epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Signed milliseconds from `earlier` to `self`.
    pub fn millis_since(&self, earlier: &Instant) -> i64 {
        (self.0 - earlier.0).num_milliseconds()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of the year, 1-12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of the month, 1-31.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn millisecond(&self) -> u32 {
        self.0.timestamp_subsec_millis()
    }

    /// The local wall-clock reading of this instant.
    pub fn naive_local(&self) -> NaiveDateTime {
        self.0.naive_local()
    }

    pub fn as_datetime(&self) -> &DateTime<Local> {
        &self.0
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Instant {
    fn from(dt: DateTime<Tz>) -> Self {
        Instant::from_datetime(dt)
    }
}

// ── DateInput ───────────────────────────────────────────────────────────────

/// Any value [`parse_date`] knows how to turn into an [`Instant`].
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Already canonical; passed through unchanged.
    Instant(Instant),
    /// A wall-clock datetime in the local timezone.
    Naive(NaiveDateTime),
    /// Milliseconds since the Unix epoch.
    EpochMillis(f64),
    /// A date string (RFC 3339, RFC 2822, or an ISO-like local form).
    Text(String),
}

impl From<Instant> for DateInput {
    fn from(instant: Instant) -> Self {
        DateInput::Instant(instant)
    }
}

impl From<&Instant> for DateInput {
    fn from(instant: &Instant) -> Self {
        DateInput::Instant(*instant)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(dt: DateTime<Tz>) -> Self {
        DateInput::Instant(Instant::from_datetime(dt))
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(naive: NaiveDateTime) -> Self {
        DateInput::Naive(naive)
    }
}

impl From<i64> for DateInput {
    fn from(millis: i64) -> Self {
        DateInput::EpochMillis(millis as f64)
    }
}

impl From<f64> for DateInput {
    fn from(millis: f64) -> Self {
        DateInput::EpochMillis(millis)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Text(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Text(s)
    }
}

impl From<&String> for DateInput {
    fn from(s: &String) -> Self {
        DateInput::Text(s.clone())
    }
}

// ── parse_date ──────────────────────────────────────────────────────────────

/// Resolve a date input into an [`Instant`].
///
/// # Errors
///
/// Returns [`TickError::InvalidDate`] for unparsable strings, non-finite or
/// out-of-range epochs, and wall-clock times that do not exist locally.
///
/// # Examples
///
/// ```
/// use tickago::parse_date;
///
/// let instant = parse_date("2024-03-01T10:30:00").unwrap();
/// assert_eq!((instant.year(), instant.month(), instant.day()), (2024, 3, 1));
/// assert_eq!(instant.hour(), 10);
///
/// assert!(parse_date("not a date").is_err());
/// assert!(parse_date(f64::NAN).is_err());
/// ```
pub fn parse_date(input: impl Into<DateInput>) -> Result<Instant> {
    let result = match input.into() {
        DateInput::Instant(instant) => Ok(instant),
        DateInput::Naive(naive) => Instant::from_local_naive(naive),
        DateInput::EpochMillis(millis) => parse_epoch_millis(millis),
        DateInput::Text(text) => parse_text(&text),
    };
    if let Err(e) = &result {
        debug!(error = %e, "date input rejected");
    }
    result
}

/// Resolve a date string using a field pattern such as `DD/MM/YYYY`.
///
/// The pattern is split on `-`, `/`, `.` and whitespace; the digit runs of
/// `input` are assigned to the resulting tokens in order. `YYYY`, `MM`, `DD`,
/// `HH`, `mm` and `ss` are recognized; a missing month or day defaults to 1
/// and missing time fields to 0. When the pattern does not yield a valid
/// date, the generic parser of [`parse_date`] is tried instead. Non-string
/// inputs ignore the pattern.
///
/// # Errors
///
/// Returns [`TickError::InvalidDate`] if the input string contains no digits,
/// or if neither the pattern nor the generic parser can resolve it.
///
/// # Examples
///
/// ```
/// use tickago::parse_date_with_format;
///
/// let instant = parse_date_with_format("15/03/2024", "DD/MM/YYYY").unwrap();
/// assert_eq!((instant.year(), instant.month(), instant.day()), (2024, 3, 15));
/// ```
pub fn parse_date_with_format(input: impl Into<DateInput>, format: &str) -> Result<Instant> {
    let input = input.into();
    if let DateInput::Text(text) = &input {
        if let Some(instant) = parse_with_pattern(text, format)? {
            return Ok(instant);
        }
        trace!(input = %text, format, "pattern did not match, using generic parser");
    }
    parse_date(input)
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn parse_epoch_millis(millis: f64) -> Result<Instant> {
    if !millis.is_finite() {
        return Err(TickError::InvalidDate(format!("epoch {millis} is not finite")));
    }
    if millis.abs() > MAX_EPOCH_MILLIS {
        return Err(TickError::InvalidDate(format!(
            "epoch {millis}ms is out of range"
        )));
    }
    Instant::from_epoch_millis(millis.trunc() as i64)
}

fn parse_text(text: &str) -> Result<Instant> {
    let s = text.trim();
    if s.is_empty() {
        return Err(TickError::InvalidDate("empty date string".to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        trace!(input = s, "parsed as RFC 3339");
        return Ok(Instant::from_datetime(dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        trace!(input = s, "parsed as RFC 2822");
        return Ok(Instant::from_datetime(dt));
    }
    let zulu = match s.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => s.to_string(),
    };
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zulu, fmt) {
            trace!(input = s, fmt, "parsed as offset datetime");
            return Ok(Instant::from_datetime(dt));
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            trace!(input = s, fmt, "parsed as local datetime");
            return Instant::from_local_naive(naive);
        }
    }
    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            trace!(input = s, fmt, "parsed as local date");
            let naive = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
                TickError::InvalidDate(format!("'{s}' has no local midnight"))
            })?;
            return Instant::from_local_naive(naive);
        }
    }
    if let Some(date) = parse_reduced_date(s) {
        trace!(input = s, "parsed as reduced date");
        let naive = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
            TickError::InvalidDate(format!("'{s}' has no local midnight"))
        })?;
        return Instant::from_local_naive(naive);
    }

    Err(TickError::InvalidDate(format!("cannot parse '{s}'")))
}

/// ISO 8601 reduced precision: `YYYY` is January 1, `YYYY-MM` the 1st of the month.
fn parse_reduced_date(s: &str) -> Option<NaiveDate> {
    let all_digits = |part: &str, len: usize| {
        part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
    };
    match s.split_once('-') {
        None if all_digits(s, 4) => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        Some((year, month)) if all_digits(year, 4) && all_digits(month, 2) => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        _ => None,
    }
}

/// `Ok(None)` means "pattern did not produce a date, try the generic parser".
fn parse_with_pattern(text: &str, format: &str) -> Result<Option<Instant>> {
    let parts: Vec<Option<u32>> = text
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse().ok())
        .collect();
    if parts.is_empty() {
        return Err(TickError::InvalidDate(format!("no digits in '{}'", text.trim())));
    }

    let fields: HashMap<&str, u32> = format
        .split(|c: char| matches!(c, '-' | '/' | '.') || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .zip(parts)
        .filter_map(|(token, value)| value.map(|v| (token, v)))
        .collect();

    let Some(year) = fields.get("YYYY").and_then(|&y| i32::try_from(y).ok()) else {
        return Ok(None);
    };
    let month = fields.get("MM").copied().unwrap_or(1);
    let day = fields.get("DD").copied().unwrap_or(1);
    let hour = fields.get("HH").copied().unwrap_or(0);
    let minute = fields.get("mm").copied().unwrap_or(0);
    let second = fields.get("ss").copied().unwrap_or(0);

    let Some(naive) = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
    else {
        return Ok(None);
    };
    Instant::from_local_naive(naive).map(Some)
}

// ── Tests ───────────────────────────────────────────────────────────────────
