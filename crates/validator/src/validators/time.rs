//! Date and time predicates: `timestamp`, `dateBefore`, `dateAfter`.
//!
//! Dates are parsed by [`parse_datetime`] and compared as naive UTC
//! date-times against a bound resolved from the run's reference time.

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::foundation::{EvalContext, Record};
use crate::rules::Arg;

// Layout used for the `timestamp` round trip.
const ROUND_TRIP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d.%m.%Y", "%m/%d/%Y"];

// ============================================================================
// PARSING
// ============================================================================

/// Parses a date or date-time expression relative to `now`.
///
/// Accepted forms, tried in order:
/// - keywords `now`, `today`, `tomorrow`, `yesterday` (the last three at
///   midnight)
/// - `@<unix seconds>`
/// - relative offsets such as `+1 day`, `-2 weeks`, `3 hours ago`
/// - RFC 3339 and RFC 2822, converted to UTC
/// - common date-time and date layouts (`2024-01-31 10:00:00`,
///   `31-01-2024`, `01/31/2024`, ...); dates alone mean midnight
///
/// Returns `None` for anything else.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fieldcheck_validator::validators::time::parse_datetime;
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 10)
///     .unwrap()
///     .and_hms_opt(15, 30, 0)
///     .unwrap();
///
/// let today = parse_datetime("today", now).unwrap();
/// assert_eq!(today.to_string(), "2024-03-10 00:00:00");
///
/// let parsed = parse_datetime("2024-01-31", now).unwrap();
/// assert_eq!(parsed.to_string(), "2024-01-31 00:00:00");
///
/// assert!(parse_datetime("not a date", now).is_none());
/// ```
pub fn parse_datetime(input: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let midnight = now.date().and_time(NaiveTime::MIN);
    match input.to_ascii_lowercase().as_str() {
        "now" => return Some(now),
        "today" | "midnight" => return Some(midnight),
        "tomorrow" => return midnight.checked_add_signed(TimeDelta::days(1)),
        "yesterday" => return midnight.checked_sub_signed(TimeDelta::days(1)),
        _ => {}
    }

    if let Some(seconds) = input.strip_prefix('@') {
        return seconds
            .parse::<i64>()
            .ok()
            .and_then(|s| DateTime::from_timestamp(s, 0))
            .map(|dt| dt.naive_utc());
    }

    if let Some(shifted) = parse_relative(input, now) {
        return Some(shifted);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

// "+N unit", "-N unit", "N unit ago"; units may be plural.
fn parse_relative(input: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let mut words = input.split_whitespace();
    let amount = words.next()?;
    let unit = words.next()?;
    let ago = match words.next() {
        None => false,
        Some(word) if word.eq_ignore_ascii_case("ago") => true,
        Some(_) => return None,
    };
    if words.next().is_some() {
        return None;
    }

    let signed = amount.starts_with(['+', '-']);
    if !signed && !ago {
        return None;
    }
    let mut amount: i64 = amount.parse().ok()?;
    if ago {
        amount = amount.checked_neg()?;
    }

    let unit = unit.to_ascii_lowercase();
    let unit = unit.strip_suffix('s').unwrap_or(&unit);
    let delta = match unit {
        "sec" | "second" => TimeDelta::try_seconds(amount)?,
        "min" | "minute" => TimeDelta::try_minutes(amount)?,
        "hour" => TimeDelta::try_hours(amount)?,
        "day" => TimeDelta::try_days(amount)?,
        "week" => TimeDelta::try_weeks(amount)?,
        "month" => return shift_months(now, amount),
        "year" => return shift_months(now, amount.checked_mul(12)?),
        _ => return None,
    };
    now.checked_add_signed(delta)
}

fn shift_months(now: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        now.checked_add_months(magnitude)
    } else {
        now.checked_sub_months(magnitude)
    }
}

// ============================================================================
// PREDICATES
// ============================================================================

/// Numeric value that survives a format/parse cycle as Unix seconds.
///
/// Fractional values are truncated before the round trip.
pub fn timestamp(record: &Record, field: &str, _arg: &Arg, _ctx: &EvalContext<'_>) -> bool {
    let Some(n) = record.value(field).as_number() else {
        return false;
    };
    if n < i64::MIN as f64 || n >= i64::MAX as f64 {
        return false;
    }
    let seconds = n.trunc() as i64;

    let Some(formatted) = DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.naive_utc().format(ROUND_TRIP_FORMAT).to_string())
    else {
        return false;
    };

    NaiveDateTime::parse_from_str(&formatted, ROUND_TRIP_FORMAT)
        .is_ok_and(|parsed| parsed.and_utc().timestamp() == seconds)
}

fn compare_date(
    record: &Record,
    field: &str,
    arg: &Arg,
    ctx: &EvalContext<'_>,
    ordered: impl Fn(NaiveDateTime, NaiveDateTime) -> bool,
) -> bool {
    let Arg::Date(bound) = arg else {
        return false;
    };
    let Some(text) = record.value(field).as_str() else {
        return false;
    };
    let (Some(value), Some(bound)) = (parse_datetime(text, ctx.now()), bound.resolve(ctx.now()))
    else {
        return false;
    };
    ordered(value, bound)
}

/// Date strictly before the bound.
pub fn date_before(record: &Record, field: &str, arg: &Arg, ctx: &EvalContext<'_>) -> bool {
    compare_date(record, field, arg, ctx, |value, bound| value < bound)
}

/// Date strictly after the bound.
pub fn date_after(record: &Record, field: &str, arg: &Arg, ctx: &EvalContext<'_>) -> bool {
    compare_date(record, field, arg, ctx, |value, bound| value > bound)
}
