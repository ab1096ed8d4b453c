//! Calendar-date parsing and sanity checks.

use chrono::{Datelike, NaiveDate};

use crate::error::CoreError;

/// Earliest year accepted for any calendar date.
pub const MIN_YEAR: i32 = 1900;
/// Latest year accepted for any calendar date.
pub const MAX_YEAR: i32 = 2100;

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// Rejects impossible dates (`2024-02-30`), years outside
/// [`MIN_YEAR`]..=[`MAX_YEAR`], and non-canonical spellings (`2024-2-5`):
/// the formatted value must round-trip to the input.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = value.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!(
            "Invalid calendar date '{trimmed}'. Expected YYYY-MM-DD"
        ))
    })?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(CoreError::Validation(format!(
            "Calendar date '{trimmed}' is out of range. Year must be between {MIN_YEAR} and {MAX_YEAR}"
        )));
    }

    if date.format("%Y-%m-%d").to_string() != trimmed {
        return Err(CoreError::Validation(format!(
            "Invalid calendar date '{trimmed}'. Expected YYYY-MM-DD"
        )));
    }

    Ok(date)
}
