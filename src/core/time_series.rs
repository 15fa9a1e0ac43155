use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::core::Curve;
use crate::core::primitives::{seconds_between, truncated_seconds_between};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Result of one accepted `add_values` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppendOutcome {
    /// `true` when the oldest sample was dropped to make room.
    pub evicted: bool,
    /// Sample count after insertion.
    pub len: usize,
    /// Largest running max across all curves after insertion.
    pub max: f64,
    /// Smallest running min across all curves after insertion.
    pub min: f64,
}

/// Windowed multi-curve sample store.
///
/// Timestamps are kept newest first and `timestamps[i]` lines up with
/// `curves[*].values()[i]` for every curve. All curves advance together, one
/// sample per `add_values` call.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesStore {
    timestamps: VecDeque<DateTime<Utc>>,
    curves: Vec<Curve>,
    window_seconds: f64,
}

impl Default for TimeSeriesStore {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl TimeSeriesStore {
    #[must_use]
    pub fn new(window_seconds: f64) -> Self {
        Self {
            timestamps: VecDeque::new(),
            curves: Vec::new(),
            window_seconds,
        }
    }

    #[must_use]
    pub fn window_seconds(&self) -> f64 {
        self.window_seconds
    }

    pub fn set_window_seconds(&mut self, window_seconds: f64) -> ChartResult<()> {
        if !window_seconds.is_finite() || window_seconds <= 0.0 {
            return Err(ChartError::InvalidAxis(
                "window duration must be finite and > 0".to_owned(),
            ));
        }
        self.window_seconds = window_seconds;
        Ok(())
    }

    /// Appends a curve with an empty buffer and returns its index.
    ///
    /// Curves must be defined before the first sample arrives.
    pub fn add_curve(&mut self, title: impl Into<String>, color: Color) -> ChartResult<usize> {
        if !self.timestamps.is_empty() {
            return Err(ChartError::CurvesLocked {
                samples: self.timestamps.len(),
            });
        }
        color.validate()?;
        let curve = Curve::new(title, color);
        debug!(title = curve.title(), index = self.curves.len(), "add curve");
        self.curves.push(curve);
        Ok(self.curves.len() - 1)
    }

    /// Inserts one sample per curve at `timestamp`.
    ///
    /// Eviction compares whole seconds truncated toward zero: the oldest sample
    /// is dropped when `trunc(timestamp - oldest) > trunc(window)`. At most one
    /// sample is evicted per call, so a long gap shrinks the buffer gradually.
    ///
    /// The call is atomic: on error no buffer is touched.
    pub fn add_values(
        &mut self,
        timestamp: DateTime<Utc>,
        values: &[f64],
    ) -> ChartResult<AppendOutcome> {
        self.validate_sample(timestamp, values)?;

        let evict = self.oldest().is_some_and(|oldest| {
            truncated_seconds_between(timestamp, oldest) > self.window_seconds.trunc() as i64
        });

        for (curve, value) in self.curves.iter_mut().zip(values) {
            if evict {
                curve.evict_oldest();
            }
            curve.push_newest(*value);
            curve.recompute_extrema();
        }
        if evict {
            self.timestamps.pop_back();
        }
        self.timestamps.push_front(timestamp);

        let (min, max) = self.extrema();
        trace!(
            len = self.timestamps.len(),
            evicted = evict,
            %timestamp,
            "append sample"
        );
        Ok(AppendOutcome {
            evicted: evict,
            len: self.timestamps.len(),
            max,
            min,
        })
    }

    /// Drops every sample and resets curve extrema; curve definitions survive.
    pub fn clear(&mut self) {
        self.timestamps.clear();
        for curve in &mut self.curves {
            curve.reset();
        }
        debug!(curves = self.curves.len(), "clear samples");
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Timestamps ordered newest first.
    #[must_use]
    pub fn timestamps(&self) -> &VecDeque<DateTime<Utc>> {
        &self.timestamps
    }

    #[must_use]
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    #[must_use]
    pub fn curve(&self, index: usize) -> Option<&Curve> {
        self.curves.get(index)
    }

    #[must_use]
    pub fn newest(&self) -> Option<DateTime<Utc>> {
        self.timestamps.front().copied()
    }

    #[must_use]
    pub fn oldest(&self) -> Option<DateTime<Utc>> {
        self.timestamps.back().copied()
    }

    /// Age of sample `index` relative to the newest sample, in seconds.
    #[must_use]
    pub fn age_seconds(&self, index: usize) -> Option<f64> {
        let newest = self.newest()?;
        let sample = self.timestamps.get(index)?;
        Some(seconds_between(newest, *sample))
    }

    /// Newest minus oldest timestamp in seconds, `0.0` when empty.
    #[must_use]
    pub fn span_seconds(&self) -> f64 {
        match (self.newest(), self.oldest()) {
            (Some(newest), Some(oldest)) => seconds_between(newest, oldest),
            _ => 0.0,
        }
    }

    /// Combined `(min, max)` over every curve's running extrema.
    #[must_use]
    pub fn extrema(&self) -> (f64, f64) {
        self.curves.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), curve| (min.min(curve.running_min()), max.max(curve.running_max())),
        )
    }

    fn validate_sample(&self, timestamp: DateTime<Utc>, values: &[f64]) -> ChartResult<()> {
        if self.curves.is_empty() {
            return Err(ChartError::NoCurves);
        }
        if values.len() != self.curves.len() {
            return Err(ChartError::ValueCountMismatch {
                expected: self.curves.len(),
                got: values.len(),
            });
        }
        if let Some(position) = values.iter().position(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "value for curve `{}` must be finite",
                self.curves[position].title()
            )));
        }
        if let Some(newest) = self.newest() {
            if timestamp < newest {
                return Err(ChartError::OutOfOrderTimestamp {
                    timestamp: timestamp.to_rfc3339(),
                    newest: newest.to_rfc3339(),
                });
            }
        }
        Ok(())
    }
}
