//! Date and period formatting shared by every report surface

use chrono::{Datelike, NaiveDate};

/// Render a date as `dd/mm/yyyy`, zero-padded. Dates are deliberately not
/// localized: every language gets the same fixed rendering.
pub fn format_date_dmy(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// Render an optional date; an absent date becomes an empty field
pub fn format_optional_date_dmy(date: Option<NaiveDate>) -> String {
    date.map(format_date_dmy).unwrap_or_default()
}

/// Calendar month key (`YYYY-MM`) used by the auto-export idempotency guard
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}
