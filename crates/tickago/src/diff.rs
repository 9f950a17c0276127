//! Calendar-correct differences between two instants.
//!
//! The breakdown is computed by field-wise subtraction of the local calendar
//! fields with borrowing, not by dividing a duration by fixed unit lengths.
//! That keeps month and year boundaries exact: Jan 31 → Mar 1 is "1 month,
//! 1 day", and Mar 1 2023 → Mar 1 2024 is "1 year" despite the leap day.

use serde::Serialize;

use crate::calendar::days_in_month;
use crate::parse::Instant;

const MILLIS_PER_SECOND: f64 = 1_000.0;
const MILLIS_PER_MINUTE: f64 = 60_000.0;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;
/// Average Gregorian month: 365.25 / 12 days.
const MILLIS_PER_AVG_MONTH: f64 = MILLIS_PER_DAY * 365.25 / 12.0;

/// Field-wise difference between two instants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDiff {
    pub years: u32,
    /// 0-11.
    pub months: u32,
    /// 0-30, not bounded by the start month's length: Feb 1 → Mar 31 is
    /// 1 month and 30 days.
    pub days: u32,
    /// 0-23.
    pub hours: u32,
    /// 0-59.
    pub minutes: u32,
    /// 0-59.
    pub seconds: u32,
    /// The same duration as continuous totals per unit.
    pub raw: RawDiff,
    /// Whether the second compared instant lies after the first.
    pub is_future: bool,
}

/// Total elapsed time expressed in each unit, undiscretized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RawDiff {
    pub milliseconds: f64,
    pub seconds: f64,
    pub minutes: f64,
    pub hours: f64,
    pub days: f64,
    /// Based on an average month of 365.25 / 12 days.
    pub months: f64,
}

impl RawDiff {
    fn from_millis(millis: i64) -> Self {
        let ms = millis as f64;
        RawDiff {
            milliseconds: ms,
            seconds: ms / MILLIS_PER_SECOND,
            minutes: ms / MILLIS_PER_MINUTE,
            hours: ms / MILLIS_PER_HOUR,
            days: ms / MILLIS_PER_DAY,
            months: ms / MILLIS_PER_AVG_MONTH,
        }
    }
}

impl CalendarDiff {
    /// True when every calendar field is zero.
    pub fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
    }
}

/// Compare two instants.
///
/// Field magnitudes are independent of argument order; only `is_future`
/// (`b > a`) reflects direction. Never fails.
///
/// Fields come from local wall-clock readings while `raw` and `is_future`
/// come from the absolute instants. Inside a DST fall-back fold two instants
/// an hour apart can read the same wall clock; their fields are then all
/// zero even though `raw.hours` is 1.
///
/// # Examples
///
/// ```
/// use tickago::{compare_instants, parse_date};
///
/// let a = parse_date("2024-01-31T00:00:00").unwrap();
/// let b = parse_date("2024-03-01T00:00:00").unwrap();
/// let diff = compare_instants(&a, &b);
/// assert_eq!((diff.months, diff.days), (1, 1));
/// assert!(diff.is_future);
/// ```
pub fn compare_instants(a: &Instant, b: &Instant) -> CalendarDiff {
    let (earlier, later) = if a <= b { (a, b) } else { (b, a) };

    // Across a DST fall-back the later instant can read an earlier wall
    // clock; subtract fields in wall-clock order so none go negative.
    let (start, end) = if earlier.naive_local() <= later.naive_local() {
        (earlier, later)
    } else {
        (later, earlier)
    };
    let fields = borrow_fields(start, end);

    CalendarDiff {
        years: fields[0],
        months: fields[1],
        days: fields[2],
        hours: fields[3],
        minutes: fields[4],
        seconds: fields[5],
        raw: RawDiff::from_millis(later.millis_since(earlier)),
        is_future: b > a,
    }
}

/// Subtract `start`'s calendar fields from `end`'s, borrowing from the
/// next-larger unit wherever a field underflows. Requires `start <= end` on
/// the wall clock.
fn borrow_fields(start: &Instant, end: &Instant) -> [u32; 6] {
    let mut years = i64::from(end.year()) - i64::from(start.year());
    let mut months = i64::from(end.month()) - i64::from(start.month());
    let mut days = i64::from(end.day()) - i64::from(start.day());
    let mut hours = i64::from(end.hour()) - i64::from(start.hour());
    let mut minutes = i64::from(end.minute()) - i64::from(start.minute());
    let mut seconds = i64::from(end.second()) - i64::from(start.second());

    if seconds < 0 {
        seconds += 60;
        minutes -= 1;
    }
    if minutes < 0 {
        minutes += 60;
        hours -= 1;
    }
    if hours < 0 {
        hours += 24;
        days -= 1;
    }
    if days < 0 {
        months -= 1;
        // `start.month()` is always 1-12.
        days += i64::from(days_in_month(start.year(), start.month()).unwrap_or(31));
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    [years, months, days, hours, minutes, seconds].map(|field| {
        debug_assert!(field >= 0, "borrowed field underflow: {field}");
        u32::try_from(field).unwrap_or(0)
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
