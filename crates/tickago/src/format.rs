//! Relative-time rendering.
//!
//! [`format_diff`] picks the coarsest non-zero unit of a [`CalendarDiff`] and
//! fills a past or future template with the value, the unit label and a
//! plural suffix. Everything textual is configurable through [`Labels`];
//! whatever a caller leaves unset falls back to English defaults.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::diff::CalendarDiff;
use crate::error::{Result, TickError};

pub const DEFAULT_PAST: &str = "{value} {unit}{plural} ago";
pub const DEFAULT_FUTURE: &str = "in {value} {unit}{plural}";
pub const DEFAULT_NOW: &str = "just now";

const PLACEHOLDERS: [&str; 3] = ["{value}", "{unit}", "{plural}"];

// ── Unit ────────────────────────────────────────────────────────────────────

/// A calendar unit of a [`CalendarDiff`], coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Unit {
    /// All units in selection order.
    pub const ALL: [Unit; 6] = [
        Unit::Year,
        Unit::Month,
        Unit::Day,
        Unit::Hour,
        Unit::Minute,
        Unit::Second,
    ];

    /// The singular English name, also the default label.
    pub fn name(self) -> &'static str {
        match self {
            Unit::Year => "year",
            Unit::Month => "month",
            Unit::Day => "day",
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
        }
    }

    /// This unit's field in `diff`.
    pub fn value_in(self, diff: &CalendarDiff) -> u32 {
        match self {
            Unit::Year => diff.years,
            Unit::Month => diff.months,
            Unit::Day => diff.days,
            Unit::Hour => diff.hours,
            Unit::Minute => diff.minutes,
            Unit::Second => diff.seconds,
        }
    }

    /// Smallest value for which this unit is chosen. A one-second
    /// difference still reads as "now".
    fn threshold(self) -> u32 {
        match self {
            Unit::Second => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = TickError;

    /// Accepts singular or plural names ("day" / "days").
    fn from_str(s: &str) -> Result<Self> {
        let unit = match s {
            "year" | "years" => Unit::Year,
            "month" | "months" => Unit::Month,
            "day" | "days" => Unit::Day,
            "hour" | "hours" => Unit::Hour,
            "minute" | "minutes" => Unit::Minute,
            "second" | "seconds" => Unit::Second,
            _ => return Err(TickError::InvalidConfig(format!("unknown unit '{s}'"))),
        };
        Ok(unit)
    }
}

// ── Labels ──────────────────────────────────────────────────────────────────

/// Maps a value and its unit to a plural suffix (or any text placed at `{plural}`).
pub type PluralFn = dyn Fn(u32, Unit) -> String + Send + Sync;

/// Formatter configuration.
///
/// Templates use the placeholders `{value}`, `{unit}` and `{plural}`. A
/// template missing any of the three is ignored in favour of the default.
///
/// # Examples
///
/// ```
/// use tickago::{Labels, Unit};
///
/// let labels = Labels::new()
///     .past("{value} {unit}{plural} back")
///     .unit(Unit::Day, "jour")
///     .plural(|v, _| if v == 1 { String::new() } else { "s".to_string() });
/// ```
#[derive(Clone, Default)]
pub struct Labels {
    past: Option<String>,
    future: Option<String>,
    now: Option<String>,
    units: BTreeMap<Unit, String>,
    plural: Option<Arc<PluralFn>>,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Template for instants before "now".
    pub fn past(mut self, template: impl Into<String>) -> Self {
        self.past = Some(template.into());
        self
    }

    /// Template for instants after "now".
    pub fn future(mut self, template: impl Into<String>) -> Self {
        self.future = Some(template.into());
        self
    }

    /// Text returned verbatim when no unit qualifies.
    pub fn now(mut self, text: impl Into<String>) -> Self {
        self.now = Some(text.into());
        self
    }

    /// Singular label for one unit; other units keep their defaults.
    pub fn unit(mut self, unit: Unit, label: impl Into<String>) -> Self {
        self.units.insert(unit, label.into());
        self
    }

    pub fn plural<F>(mut self, plural: F) -> Self
    where
        F: Fn(u32, Unit) -> String + Send + Sync + 'static,
    {
        self.plural = Some(Arc::new(plural));
        self
    }

    /// Build labels from a JSON object.
    ///
    /// Recognized keys are `past`, `future`, `now` (strings), `units` (an
    /// object of unit name → label) and `plural`. Since JSON cannot carry a
    /// function, `plural` is either a suffix string used for every value
    /// other than 1, or an object `{"one": "...", "other": "..."}`. `null`
    /// means "use the default"; unrecognized keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::InvalidConfig`] if `value` is not an object or
    /// any recognized key has the wrong shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use tickago::Labels;
    ///
    /// let labels = Labels::from_json(&json!({
    ///     "past": "{value} {unit}{plural} back",
    ///     "plural": { "one": "", "other": "s" }
    /// }))
    /// .unwrap();
    ///
    /// assert!(Labels::from_json(&json!({ "plural": 42 })).is_err());
    /// assert!(Labels::from_json(&json!("labels")).is_err());
    /// ```
    pub fn from_json(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            TickError::InvalidConfig(format!(
                "labels must be an object, got {}",
                json_type(value)
            ))
        })?;

        let mut labels = Labels::new();
        for (key, v) in map {
            if v.is_null() {
                continue;
            }
            match key.as_str() {
                "past" => labels.past = Some(expect_string(key, v)?),
                "future" => labels.future = Some(expect_string(key, v)?),
                "now" => labels.now = Some(expect_string(key, v)?),
                "units" => {
                    let units = v.as_object().ok_or_else(|| {
                        TickError::InvalidConfig(format!(
                            "'units' must be an object, got {}",
                            json_type(v)
                        ))
                    })?;
                    for (name, label) in units {
                        let unit: Unit = name.parse()?;
                        let label = expect_string(&format!("units.{name}"), label)?;
                        labels.units.insert(unit, label);
                    }
                }
                "plural" => labels.plural = Some(plural_from_json(v)?),
                other => trace!(key = other, "ignoring unknown label key"),
            }
        }
        Ok(labels)
    }

    fn template_for(&self, is_future: bool) -> &str {
        let (custom, default) = if is_future {
            (self.future.as_deref(), DEFAULT_FUTURE)
        } else {
            (self.past.as_deref(), DEFAULT_PAST)
        };
        match custom {
            Some(template) if has_all_placeholders(template) => template,
            Some(template) => {
                debug!(template, "template is missing a placeholder, using default");
                default
            }
            None => default,
        }
    }

    fn unit_label(&self, unit: Unit) -> &str {
        self.units
            .get(&unit)
            .map(String::as_str)
            .unwrap_or_else(|| unit.name())
    }

    fn plural_suffix(&self, value: u32, unit: Unit) -> String {
        match &self.plural {
            Some(plural) => plural(value, unit),
            None => default_plural(value, unit),
        }
    }
}

impl fmt::Debug for Labels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Labels")
            .field("past", &self.past)
            .field("future", &self.future)
            .field("now", &self.now)
            .field("units", &self.units)
            .field("plural", &self.plural.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// English pluralization: no suffix for exactly one, "s" otherwise.
pub fn default_plural(value: u32, _unit: Unit) -> String {
    if value == 1 {
        String::new()
    } else {
        "s".to_string()
    }
}

// ── format_diff ─────────────────────────────────────────────────────────────

/// The coarsest unit that qualifies for display, with its value.
///
/// Units are scanned from years down to seconds; the first non-zero one
/// wins, except that seconds need a value of at least 2.
pub fn select_unit(diff: &CalendarDiff) -> Option<(Unit, u32)> {
    Unit::ALL
        .into_iter()
        .map(|unit| (unit, unit.value_in(diff)))
        .find(|(unit, value)| *value >= unit.threshold())
}

/// Render `diff` as a relative-time string.
///
/// # Examples
///
/// ```
/// use tickago::{format_diff, CalendarDiff, Labels};
///
/// let diff = CalendarDiff { days: 3, ..Default::default() };
/// assert_eq!(format_diff(&diff, &Labels::new()), "3 days ago");
///
/// let diff = CalendarDiff { hours: 1, is_future: true, ..Default::default() };
/// assert_eq!(format_diff(&diff, &Labels::new()), "in 1 hour");
///
/// assert_eq!(format_diff(&CalendarDiff::default(), &Labels::new()), "just now");
/// ```
pub fn format_diff(diff: &CalendarDiff, labels: &Labels) -> String {
    let Some((unit, value)) = select_unit(diff) else {
        return labels.now.as_deref().unwrap_or(DEFAULT_NOW).to_string();
    };
    trace!(%unit, value, is_future = diff.is_future, "selected unit");

    let plural = labels.plural_suffix(value, unit);
    labels
        .template_for(diff.is_future)
        .replacen("{value}", &value.to_string(), 1)
        .replacen("{unit}", labels.unit_label(unit), 1)
        .replacen("{plural}", &plural, 1)
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn has_all_placeholders(template: &str) -> bool {
    PLACEHOLDERS.into_iter().all(|p| template.contains(p))
}

fn expect_string(key: &str, value: &Value) -> Result<String> {
    value.as_str().map(str::to_string).ok_or_else(|| {
        TickError::InvalidConfig(format!(
            "'{key}' must be a string, got {}",
            json_type(value)
        ))
    })
}

fn plural_from_json(value: &Value) -> Result<Arc<PluralFn>> {
    match value {
        Value::String(suffix) => {
            let suffix = suffix.clone();
            Ok(Arc::new(move |v: u32, _: Unit| {
                if v == 1 {
                    String::new()
                } else {
                    suffix.clone()
                }
            }))
        }
        Value::Object(forms) => {
            let form = |key: &str, default: &str| -> Result<String> {
                match forms.get(key) {
                    None | Some(Value::Null) => Ok(default.to_string()),
                    Some(v) => expect_string(&format!("plural.{key}"), v),
                }
            };
            let one = form("one", "")?;
            let other = form("other", "s")?;
            Ok(Arc::new(move |v: u32, _: Unit| {
                if v == 1 {
                    one.clone()
                } else {
                    other.clone()
                }
            }))
        }
        other => Err(TickError::InvalidConfig(format!(
            "'plural' must be callable (a suffix string or a {{\"one\", \"other\"}} object), got {}",
            json_type(other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
