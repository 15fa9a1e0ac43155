use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// Relative slack applied when counting ticks so exact multiples of the step
/// do not produce a spurious extra tick from float noise.
const TICK_COUNT_EPSILON: f64 = 1e-9;

/// Upper bound on generated ticks; a tiny step over a wide range is a caller
/// configuration problem, not something to paint line by line.
const MAX_TICKS: usize = 10_000;

/// Time window and Y-axis bounds of a strip chart.
///
/// `y_min`/`y_max` start at the configured values and only grow through
/// [`AxisConfig::expand`]; they never shrink until the next `set_axes`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub window_seconds: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub tick_step: f64,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            window_seconds: 60.0,
            y_min: 0.0,
            y_max: 100.0,
            tick_step: 10.0,
        }
    }
}

impl AxisConfig {
    /// Creates a validated axis configuration.
    pub fn new(window_seconds: f64, y_min: f64, y_max: f64, tick_step: f64) -> ChartResult<Self> {
        Self {
            window_seconds,
            y_min,
            y_max,
            tick_step,
        }
        .validate()
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.window_seconds.is_finite() || self.window_seconds <= 0.0 {
            return Err(ChartError::InvalidAxis(
                "window duration must be finite and > 0".to_owned(),
            ));
        }
        if !self.y_min.is_finite() || !self.y_max.is_finite() {
            return Err(ChartError::InvalidAxis(
                "y bounds must be finite".to_owned(),
            ));
        }
        if self.y_max <= self.y_min {
            return Err(ChartError::DegenerateAxis {
                y_min: self.y_min,
                y_max: self.y_max,
            });
        }
        if !self.tick_step.is_finite() || self.tick_step <= 0.0 {
            return Err(ChartError::InvalidAxis(
                "tick step must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.y_max - self.y_min
    }

    /// Grows the Y bounds so `candidate_max`/`candidate_min` fit, snapped to ticks.
    ///
    /// A maximum above `y_max` moves to the next tick strictly above it
    /// (`25` with step `5` becomes `30`); a minimum below `y_min` moves to the
    /// tick at or below it. Non-finite candidates are ignored, which covers the
    /// `(+inf, -inf)` sentinels of empty curves. Returns `true` when a bound moved.
    pub fn expand(&mut self, candidate_max: f64, candidate_min: f64) -> bool {
        let mut changed = false;
        if candidate_max.is_finite() && candidate_max > self.y_max {
            let previous = self.y_max;
            self.y_max =
                candidate_max - floored_mod(candidate_max, self.tick_step) + self.tick_step;
            debug!(previous, y_max = self.y_max, candidate_max, "expand y max");
            changed = true;
        }
        if candidate_min.is_finite() && candidate_min < self.y_min {
            let previous = self.y_min;
            self.y_min = candidate_min - floored_mod(candidate_min, self.tick_step);
            debug!(previous, y_min = self.y_min, candidate_min, "expand y min");
            changed = true;
        }
        changed
    }

    /// Tick values from `y_min` upward, ending with the first tick `>= y_max`.
    #[must_use]
    pub fn tick_positions(self) -> Vec<f64> {
        let steps = (self.span() / self.tick_step - TICK_COUNT_EPSILON).ceil();
        let count = if steps.is_finite() && steps >= 0.0 {
            (steps as usize).min(MAX_TICKS)
        } else {
            0
        };
        (0..=count)
            .map(|index| self.y_min + index as f64 * self.tick_step)
            .collect()
    }
}

/// Floored modulo: the result takes the sign of the (positive) divisor.
///
/// `-3 mod 5 == 2`, so negative values round down away from zero. This is
/// `f64::rem_euclid` for positive divisors, not the truncating `%` operator.
#[must_use]
pub fn floored_mod(value: f64, divisor: f64) -> f64 {
    value - divisor * (value / divisor).floor()
}
