use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::primitives::decimal_to_f64;
use crate::core::{AppendOutcome, AxisConfig};
use crate::error::ChartResult;
use crate::render::{Color, Renderer};

use super::StripChart;

impl<R: Renderer> StripChart<R> {
    /// Replaces window duration and Y-axis bounds.
    ///
    /// The bounds are a starting point: later samples may widen them, they
    /// never narrow again until the next `set_axes`.
    pub fn set_axes(
        &mut self,
        window_seconds: f64,
        y_min: f64,
        y_max: f64,
        tick_step: f64,
    ) -> ChartResult<()> {
        let axis = AxisConfig::new(window_seconds, y_min, y_max, tick_step)?;
        self.store.set_window_seconds(axis.window_seconds)?;
        self.axis = axis;
        debug!(window_seconds, y_min, y_max, tick_step, "set axes");
        self.invalidate_full();
        Ok(())
    }

    /// Defines a new curve and returns its index.
    ///
    /// Curves receive values positionally, in the order they were added.
    pub fn add_curve(&mut self, title: impl Into<String>, color: Color) -> ChartResult<usize> {
        let index = self.store.add_curve(title, color)?;
        self.invalidate_full();
        Ok(index)
    }

    /// Records one value per curve at `timestamp`.
    ///
    /// Fails without touching any buffer when the value count does not match
    /// the curve count, when no curve exists, when a value is not finite or
    /// when `timestamp` is older than the newest sample.
    pub fn add_values(
        &mut self,
        timestamp: DateTime<Utc>,
        values: &[f64],
    ) -> ChartResult<AppendOutcome> {
        let outcome = self.store.add_values(timestamp, values)?;
        if self.axis.expand(outcome.max, outcome.min) {
            trace!(y_min = self.axis.y_min, y_max = self.axis.y_max, "axis expanded");
        }
        if outcome.evicted {
            trace!(len = outcome.len, "evicted oldest sample");
        }
        self.invalidate_full();
        Ok(outcome)
    }

    /// `add_values` for exact decimal readings.
    pub fn add_decimal_values(
        &mut self,
        timestamp: DateTime<Utc>,
        values: &[Decimal],
    ) -> ChartResult<AppendOutcome> {
        let converted = values
            .iter()
            .map(|value| decimal_to_f64(*value, "curve value"))
            .collect::<ChartResult<SmallVec<[f64; 4]>>>()?;
        self.add_values(timestamp, &converted)
    }

    /// Drops all samples; curve definitions and axes are kept.
    pub fn clear(&mut self) {
        self.store.clear();
        self.invalidate_full();
    }
}
