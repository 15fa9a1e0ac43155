use serde::{Deserialize, Serialize};

/// Font face and size used for every label of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size_px: f64,
}

impl FontSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
        }
    }
}

/// Vertical metrics of a font plus its widest glyph advance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontExtents {
    pub ascent: f64,
    pub descent: f64,
    /// Recommended line height.
    pub height: f64,
    pub max_x_advance: f64,
}

/// Text measurement half of the canvas capability.
///
/// Layout (margins, legend runs, cursor read-out placement) depends on real
/// glyph metrics, so measurement comes from the same backend that paints.
pub trait TextMeasurer {
    fn font_extents(&self, font: &FontSpec) -> FontExtents;

    fn text_width(&self, text: &str, font: &FontSpec) -> f64;
}

/// Backend-free measurer with fixed per-glyph ratios.
///
/// Headless rendering and tests use it; numbers approximate a proportional
/// sans face closely enough for layout decisions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EstimatedTextMeasurer;

impl EstimatedTextMeasurer {
    pub const GLYPH_WIDTH_RATIO: f64 = 0.6;
    pub const ASCENT_RATIO: f64 = 0.9;
    pub const DESCENT_RATIO: f64 = 0.25;
    pub const LINE_HEIGHT_RATIO: f64 = 1.2;
    pub const MAX_ADVANCE_RATIO: f64 = 1.0;
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn font_extents(&self, font: &FontSpec) -> FontExtents {
        FontExtents {
            ascent: font.size_px * Self::ASCENT_RATIO,
            descent: font.size_px * Self::DESCENT_RATIO,
            height: font.size_px * Self::LINE_HEIGHT_RATIO,
            max_x_advance: font.size_px * Self::MAX_ADVANCE_RATIO,
        }
    }

    fn text_width(&self, text: &str, font: &FontSpec) -> f64 {
        text.chars().count() as f64 * font.size_px * Self::GLYPH_WIDTH_RATIO
    }
}
