use serde::{Deserialize, Serialize};

use crate::core::{AxisConfig, TimeSeriesStore, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{FontExtents, FontSpec, TextMeasurer};

/// Fixed gap between the plot area and the right edge of the viewport.
pub const PLOT_RIGHT_MARGIN_PX: f64 = 5.0;

/// Slack allowed when deciding whether the cursor instant lies inside the
/// sampled range; pixel round-trips lose a few ulps.
const CURSOR_RANGE_TOLERANCE_SECONDS: f64 = 1e-6;

/// Pixel rectangle that holds grid and curves.
///
/// Left margin reserves room for Y labels, top and bottom margins reserve one
/// text line each for the legend and the cursor read-out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Derives the plot rectangle from viewport size and measured text.
    pub fn measure(
        viewport: Viewport,
        measurer: &impl TextMeasurer,
        font: &FontSpec,
        axis: AxisConfig,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let extents = measurer.font_extents(font);
        let label_width = measurer
            .text_width(&format_axis_bound(axis.y_max), font)
            .max(measurer.text_width(&format_axis_bound(axis.y_min), font));
        Ok(Self::from_margins(viewport, extents, label_width))
    }

    #[must_use]
    pub fn from_margins(viewport: Viewport, extents: FontExtents, label_width: f64) -> Self {
        let left = extents.max_x_advance + label_width;
        let top = extents.height;
        let width = f64::from(viewport.width) - left - PLOT_RIGHT_MARGIN_PX;
        let height = f64::from(viewport.height) - top - extents.height;
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn is_drawable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Text used to size the left margin for a Y bound.
#[must_use]
pub fn format_axis_bound(value: f64) -> String {
    format!("{value}")
}

/// Time/value to pixel transforms for one draw pass.
///
/// Built fresh on every frame from the current axis and plot area; nothing is
/// cached across draws so resizes and axis growth need no bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    area: PlotArea,
    axis: AxisConfig,
}

impl CoordinateMapper {
    pub fn new(area: PlotArea, axis: AxisConfig) -> ChartResult<Self> {
        if !area.is_drawable() {
            return Err(ChartError::InvalidData(
                "plot area must have positive width and height".to_owned(),
            ));
        }
        if !axis.window_seconds.is_finite() || axis.window_seconds <= 0.0 {
            return Err(ChartError::InvalidAxis(
                "window duration must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self { area, axis })
    }

    #[must_use]
    pub fn area(self) -> PlotArea {
        self.area
    }

    #[must_use]
    pub fn axis(self) -> AxisConfig {
        self.axis
    }

    /// X pixel for a sample `age_seconds` older than the newest sample.
    #[must_use]
    pub fn time_to_x(self, age_seconds: f64) -> f64 {
        self.area.right() - age_seconds * self.area.width / self.axis.window_seconds
    }

    /// Seconds before the newest sample that `pixel_x` points at.
    #[must_use]
    pub fn x_to_age_seconds(self, pixel_x: f64) -> f64 {
        (self.area.right() - pixel_x) * self.axis.window_seconds / self.area.width
    }

    /// Y pixel for `value`. Requires `y_max > y_min`.
    pub fn value_to_y(self, value: f64) -> ChartResult<f64> {
        let span = self.axis.span();
        if !span.is_finite() || span <= 0.0 {
            return Err(ChartError::DegenerateAxis {
                y_min: self.axis.y_min,
                y_max: self.axis.y_max,
            });
        }
        Ok(self.area.bottom() - (value - self.axis.y_min) * self.area.height / span)
    }

    /// Index of the sample closest in time to the instant under `pixel_x`.
    ///
    /// Returns `None` when the store is empty or the instant falls outside
    /// `[oldest, newest]`. Ties resolve to the newer sample (lower index).
    #[must_use]
    pub fn x_to_nearest_sample_index(self, pixel_x: f64, store: &TimeSeriesStore) -> Option<usize> {
        if !pixel_x.is_finite() || store.is_empty() {
            return None;
        }
        let cursor_age = self.x_to_age_seconds(pixel_x);
        let oldest_age = store.span_seconds();
        if cursor_age < -CURSOR_RANGE_TOLERANCE_SECONDS
            || cursor_age > oldest_age + CURSOR_RANGE_TOLERANCE_SECONDS
        {
            return None;
        }

        let mut nearest = None;
        let mut best_distance = f64::INFINITY;
        for index in 0..store.len() {
            let Some(age) = store.age_seconds(index) else {
                break;
            };
            let distance = (age - cursor_age).abs();
            if distance < best_distance {
                best_distance = distance;
                nearest = Some(index);
            }
        }
        nearest
    }
}
