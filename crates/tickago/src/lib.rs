//! # tickago
//!
//! Calendar-correct date differences and human-readable relative time.
//!
//! tickago answers two questions about a pair of instants: how far apart are
//! they in calendar terms (years, months, days, hours, minutes, seconds, with
//! real month lengths and leap years), and how should that read to a person
//! ("3 months ago", "in 2 days", "just now").
//!
//! ## Modules
//!
//! - [`parse`] — date strings, epochs and chrono values → [`Instant`]
//! - [`diff`] — field-wise calendar difference with borrowing, plus a continuous raw view
//! - [`format`] — unit selection and template rendering with [`Labels`]
//! - [`calendar`] — Gregorian leap-year and month-length helpers
//! - [`error`] — Error types
//!
//! All computation happens on the host's local wall clock. Apart from
//! [`moment`] and [`moment_with_format`], which read the system clock, every
//! function is a pure function of its arguments.

pub mod calendar;
pub mod diff;
pub mod error;
pub mod format;
pub mod parse;

pub use diff::{compare_instants, CalendarDiff, RawDiff};
pub use error::{Result, TickError};
pub use format::{
    default_plural, format_diff, select_unit, Labels, PluralFn, Unit, DEFAULT_FUTURE,
    DEFAULT_NOW, DEFAULT_PAST,
};
pub use parse::{parse_date, parse_date_with_format, DateInput, Instant};

/// Calendar difference between two date inputs.
///
/// `is_future` is true when `date2` is after `date1`.
///
/// # Errors
///
/// Returns [`TickError::InvalidDate`] if either argument cannot be parsed.
///
/// # Examples
///
/// ```
/// let diff = tickago::compare("2023-03-01", "2024-03-01").unwrap();
/// assert_eq!((diff.years, diff.months, diff.days), (1, 0, 0));
/// assert!(diff.is_future);
/// ```
pub fn compare(date1: impl Into<DateInput>, date2: impl Into<DateInput>) -> Result<CalendarDiff> {
    let a = parse_date(date1)?;
    let b = parse_date(date2)?;
    Ok(compare_instants(&a, &b))
}

/// [`compare`] with both arguments parsed through a field pattern such as
/// `DD/MM/YYYY` (see [`parse_date_with_format`]).
///
/// # Errors
///
/// Returns [`TickError::InvalidDate`] if either argument cannot be parsed.
pub fn compare_with_format(
    date1: impl Into<DateInput>,
    date2: impl Into<DateInput>,
    format: &str,
) -> Result<CalendarDiff> {
    let a = parse_date_with_format(date1, format)?;
    let b = parse_date_with_format(date2, format)?;
    Ok(compare_instants(&a, &b))
}

/// Describe `timestamp` relative to the current time.
///
/// # Errors
///
/// Returns [`TickError::InvalidDate`] if `timestamp` cannot be parsed.
pub fn moment(timestamp: impl Into<DateInput>, labels: &Labels) -> Result<String> {
    moment_at(Instant::now(), timestamp, labels)
}

/// Describe `timestamp` relative to an explicit `now`.
///
/// # Errors
///
/// Returns [`TickError::InvalidDate`] if either argument cannot be parsed.
///
/// # Examples
///
/// ```
/// use tickago::{moment_at, Labels};
///
/// let now = "2024-06-15T12:00:00";
/// let labels = Labels::new();
/// assert_eq!(moment_at(now, "2024-06-15T11:59:15", &labels).unwrap(), "45 seconds ago");
/// assert_eq!(moment_at(now, "2024-06-17T12:00:00", &labels).unwrap(), "in 2 days");
/// assert_eq!(moment_at(now, now, &labels).unwrap(), "just now");
/// ```
pub fn moment_at(
    now: impl Into<DateInput>,
    timestamp: impl Into<DateInput>,
    labels: &Labels,
) -> Result<String> {
    let diff = compare(now, timestamp)?;
    Ok(format_diff(&diff, labels))
}

/// [`moment`] with `timestamp` parsed through a field pattern such as
/// `DD/MM/YYYY` (see [`parse_date_with_format`]).
///
/// # Errors
///
/// Returns [`TickError::InvalidDate`] if `timestamp` cannot be parsed.
pub fn moment_with_format(
    timestamp: impl Into<DateInput>,
    format: &str,
    labels: &Labels,
) -> Result<String> {
    moment_at_with_format(Instant::now(), timestamp, format, labels)
}

/// [`moment_at`] with both `now` and `timestamp` parsed through `format`.
///
/// # Errors
///
/// Returns [`TickError::InvalidDate`] if either argument cannot be parsed.
///
/// # Examples
///
/// ```
/// use tickago::{moment_at_with_format, Labels};
///
/// let out = moment_at_with_format("15/06/2024", "01/03/2024", "DD/MM/YYYY", &Labels::new());
/// assert_eq!(out.unwrap(), "3 months ago");
/// ```
pub fn moment_at_with_format(
    now: impl Into<DateInput>,
    timestamp: impl Into<DateInput>,
    format: &str,
    labels: &Labels,
) -> Result<String> {
    let diff = compare_with_format(now, timestamp, format)?;
    Ok(format_diff(&diff, labels))
}
