//! Shared helpers for calendar dates on the wire and in labels.

use chrono::NaiveDate;

use crate::TesseraError;

/// Wire format of calendar days in every source payload.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parse a `YYYY-MM-DD` day.
///
/// # Errors
/// Returns `Err(TesseraError::Data)` if `s` is not a valid calendar day in that format.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, TesseraError> {
    NaiveDate::parse_from_str(s.trim(), ISO_DATE_FORMAT)
        .map_err(|e| TesseraError::Data(format!("invalid date '{s}': {e}")))
}

/// Short English name of a 1-based month number; empty for out-of-range input.
#[must_use]
pub fn month_abbr(month: u32) -> &'static str {
    usize::try_from(month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|i| MONTH_ABBR.get(i))
        .copied()
        .unwrap_or("")
}
