//! Calendar-date handling for the journal.
//!
//! Every entry is keyed by a plain `YYYY-MM-DD` calendar day. "Today" is the
//! server's local clock (see DESIGN.md for the timezone trade-off).

use chrono::{Local, NaiveDate};

use crate::error::{AppError, AppResult};

/// The server-local calendar day.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a strict `YYYY-MM-DD` date parameter. Anything else, including
/// non-zero-padded or impossible dates, is a validation failure and must be
/// rejected before any query runs.
pub fn parse_date_param(raw: &str) -> AppResult<NaiveDate> {
    if !is_ymd_shape(raw) {
        return Err(AppError::Validation(
            "Date must be YYYY-MM-DD format".into(),
        ));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid calendar date".into()))
}

/// Normalize a client-supplied entry date. Richer timestamp strings
/// (e.g. `2024-03-05T12:00:00Z`) are accepted by taking the date-only prefix.
pub fn normalize_entry_date(raw: &str) -> AppResult<NaiveDate> {
    let head = raw.get(..10).unwrap_or(raw);
    parse_date_param(head)
}

fn is_ymd_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}
