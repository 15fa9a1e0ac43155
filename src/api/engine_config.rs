use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::{AxisConfig, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::FontSpec;

/// How samples of every curve are painted.
///
/// The style applies to the whole chart; curves cannot override it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CurveStyle {
    /// Connected polyline, newest sample at the right edge.
    #[default]
    Line,
    /// One small filled circle per sample.
    Points,
}

pub const DEFAULT_FONT_SIZE_PX: f64 = 11.0;
pub const DEFAULT_TIME_LABEL_FORMAT: &str = "%x %H:%M:%S";

/// Public chart bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripChartConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub curve_style: CurveStyle,
    #[serde(default)]
    pub font_family: String,
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
    /// `chrono` format string for the cursor read-out timestamp.
    #[serde(default = "default_time_label_format")]
    pub time_label_format: String,
    #[serde(default)]
    pub axis: AxisConfig,
}

impl StripChartConfig {
    /// Creates a config with line style, default font and default axes.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            curve_style: CurveStyle::default(),
            font_family: String::new(),
            font_size_px: default_font_size_px(),
            time_label_format: default_time_label_format(),
            axis: AxisConfig::default(),
        }
    }

    #[must_use]
    pub fn with_curve_style(mut self, style: CurveStyle) -> Self {
        self.curve_style = style;
        self
    }

    #[must_use]
    pub fn with_font(mut self, family: impl Into<String>, size_px: f64) -> Self {
        self.font_family = family.into();
        self.font_size_px = size_px;
        self
    }

    #[must_use]
    pub fn with_time_label_format(mut self, format: impl Into<String>) -> Self {
        self.time_label_format = format.into();
        self
    }

    /// Sets the initial window and Y axis (`set_axes` at construction time).
    #[must_use]
    pub fn with_axes(
        mut self,
        window_seconds: f64,
        y_min: f64,
        y_max: f64,
        tick_step: f64,
    ) -> Self {
        self.axis = AxisConfig {
            window_seconds,
            y_min,
            y_max,
            tick_step,
        };
        self
    }

    #[must_use]
    pub fn font(&self) -> FontSpec {
        FontSpec::new(self.font_family.clone(), self.font_size_px)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if self.time_label_format.trim().is_empty()
            || StrftimeItems::new(&self.time_label_format).any(|item| matches!(item, Item::Error))
        {
            return Err(ChartError::InvalidData(format!(
                "time label format `{}` is not a valid strftime pattern",
                self.time_label_format
            )));
        }
        self.axis.validate()?;
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }
}

fn default_font_size_px() -> f64 {
    DEFAULT_FONT_SIZE_PX
}

fn default_time_label_format() -> String {
    DEFAULT_TIME_LABEL_FORMAT.to_owned()
}
