use std::fmt::Write;

use chrono::{DateTime, Utc};

/// Separator placed before every curve value in the cursor read-out.
pub const READOUT_VALUE_SEPARATOR: &str = "  ";
/// Separator appended after every legend title.
pub const LEGEND_TITLE_SEPARATOR: &str = "   ";

/// Grid label for a tick value, truncated to an integer.
#[must_use]
pub fn format_tick_label(value: f64) -> String {
    format!("{}", value.trunc() as i64)
}

/// Cursor read-out value, rounded to one decimal place.
#[must_use]
pub fn format_readout_value(value: f64) -> String {
    format!("{READOUT_VALUE_SEPARATOR}{value:.1}")
}

/// Formats a sample timestamp with a `chrono` strftime pattern.
///
/// Falls back to RFC 3339 if the pattern cannot be rendered.
#[must_use]
pub fn format_sample_time(timestamp: DateTime<Utc>, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", timestamp.format(pattern)).is_err() {
        return timestamp.to_rfc3339();
    }
    out
}
