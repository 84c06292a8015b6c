use chrono::NaiveDate;

use crate::errors::{Result, ValidationError};

/// Parses a boundary date string.
///
/// Accepts ISO `YYYY-MM-DD` and the legacy `MM-DD-YYYY` form.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(iso_err) => NaiveDate::parse_from_str(trimmed, "%m-%d-%Y")
            .map_err(|_| ValidationError::DateParse(iso_err).into()),
    }
}
