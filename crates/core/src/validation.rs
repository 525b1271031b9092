//! Field rules shared by the project, module and phase drafts.
//!
//! Used as `#[validate(custom(function = ...))]` targets so each draft
//! declares its rules next to its fields.

use chrono::Local;
use validator::ValidationError;

use crate::dates;

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Reject empty or whitespace-only text.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule_error("blank", "must not be blank"));
    }
    Ok(())
}

/// Require a `#RRGGBB` hex color.
pub fn hex_color(value: &str) -> Result<(), ValidationError> {
    let valid = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(rule_error("hex_color", "must be a #RRGGBB color"));
    }
    Ok(())
}

/// Require a date the normalizer understands.
pub fn known_date(value: &str) -> Result<(), ValidationError> {
    non_blank(value)?;
    dates::calendar_day(value, &Local)
        .map(|_| ())
        .map_err(|_| rule_error("date", "must be a date"))
}

/// Require `end` to fall on or after `start`, compared as local calendar days.
///
/// Unparseable dates pass here; [`known_date`] reports them per field.
pub fn ordered_dates(start: &str, end: &str) -> Result<(), ValidationError> {
    let (Ok(start), Ok(end)) = (
        dates::calendar_day(start, &Local),
        dates::calendar_day(end, &Local),
    ) else {
        return Ok(());
    };
    if end < start {
        return Err(rule_error(
            "date_range",
            "end date must not be before start date",
        ));
    }
    Ok(())
}
