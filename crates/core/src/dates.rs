//! Calendar-day normalization for date fields.
//!
//! Projects and modules persist their start/end dates as instant-like
//! strings, while date-picking controls work with bare `YYYY-MM-DD`
//! calendar dates. Converting between the two naively (taking the UTC date
//! of an instant, or sending a bare date that the server reads as UTC
//! midnight) shifts the rendered day by one for any zone behind UTC.
//!
//! Every conversion here is relative to an explicit [`TimeZone`] so the
//! same calendar day `D` survives `from_input_date(to_input_date(x))` and
//! every display path. The `*_local` wrappers use the system zone.

use chrono::{
    DateTime, Local, Locale, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};

use crate::error::CoreError;

/// Format used by date-picking controls.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Long, human-readable rendering, e.g. `miércoles, 20 de noviembre de 2024`.
pub const DISPLAY_DATE_FORMAT: &str = "%A, %-d de %B de %Y";

/// Locale for weekday and month names in [`DISPLAY_DATE_FORMAT`].
pub const DISPLAY_LOCALE: Locale = Locale::es_ES;

/// Local hour at which a calendar day is pinned when persisted.
///
/// Noon never falls inside a DST gap and stays on the same UTC day for any
/// offset within twelve hours.
const PINNED_HOUR: u32 = 12;

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Resolve the calendar day a stored date denotes in `tz`.
///
/// Accepts RFC 3339 instants (converted into `tz`), naive date-times (their
/// date part) and bare `YYYY-MM-DD` dates (taken as-is).
pub fn calendar_day<Tz: TimeZone>(stored: &str, tz: &Tz) -> Result<NaiveDate, CoreError> {
    let stored = stored.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(stored) {
        return Ok(instant.with_timezone(tz).date_naive());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(stored, format) {
            return Ok(naive.date());
        }
    }

    NaiveDate::parse_from_str(stored, INPUT_DATE_FORMAT)
        .map_err(|_| CoreError::InvalidDate(format!("unrecognized date '{stored}'")))
}

/// Convert a stored date into the `YYYY-MM-DD` value a date control shows.
pub fn to_input_date<Tz: TimeZone>(stored: &str, tz: &Tz) -> Result<String, CoreError> {
    Ok(calendar_day(stored, tz)?
        .format(INPUT_DATE_FORMAT)
        .to_string())
}

/// Convert a `YYYY-MM-DD` control value back into the persisted form.
///
/// The result is local noon of that day in `tz`, expressed in UTC with
/// millisecond precision (`2024-03-10T16:00:00.000Z`).
pub fn from_input_date<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<String, CoreError> {
    let input = input.trim();
    let day = NaiveDate::parse_from_str(input, INPUT_DATE_FORMAT).map_err(|_| {
        CoreError::InvalidDate(format!("expected YYYY-MM-DD, got '{input}'"))
    })?;

    let noon = NaiveTime::from_hms_opt(PINNED_HOUR, 0, 0)
        .ok_or_else(|| CoreError::InvalidDate("invalid pinned hour".to_string()))?;
    let local = day.and_time(noon);

    let instant = match tz.from_local_datetime(&local).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&local),
    };

    Ok(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Render a stored date for humans, on the calendar day it denotes in `tz`.
pub fn display_date<Tz: TimeZone>(stored: &str, tz: &Tz) -> Result<String, CoreError> {
    Ok(calendar_day(stored, tz)?
        .format_localized(DISPLAY_DATE_FORMAT, DISPLAY_LOCALE)
        .to_string())
}

/// [`to_input_date`] in the system time zone.
pub fn to_input_date_local(stored: &str) -> Result<String, CoreError> {
    to_input_date(stored, &Local)
}

/// [`from_input_date`] in the system time zone.
pub fn from_input_date_local(input: &str) -> Result<String, CoreError> {
    from_input_date(input, &Local)
}

/// [`display_date`] in the system time zone.
pub fn display_date_local(stored: &str) -> Result<String, CoreError> {
    display_date(stored, &Local)
}
