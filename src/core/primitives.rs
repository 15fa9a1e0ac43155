use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Fractional seconds elapsed from `older` to `newer` (negative when reversed).
#[must_use]
pub fn seconds_between(newer: DateTime<Utc>, older: DateTime<Utc>) -> f64 {
    let delta = newer - older;
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0,
    }
}

/// Whole seconds from `older` to `newer`, truncated toward zero.
#[must_use]
pub fn truncated_seconds_between(newer: DateTime<Utc>, older: DateTime<Utc>) -> i64 {
    (newer - older).num_seconds()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;

    #[test]
    fn truncation_rounds_toward_zero_in_both_directions() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let later = t0 + TimeDelta::milliseconds(61_900);
        assert_eq!(truncated_seconds_between(later, t0), 61);
        assert_eq!(truncated_seconds_between(t0, later), -61);
    }

    #[test]
    fn fractional_seconds_keep_sub_second_precision() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let later = t0 + TimeDelta::milliseconds(2_500);
        assert!((seconds_between(later, t0) - 2.5).abs() <= 1e-12);
    }
}
