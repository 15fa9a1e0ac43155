use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::TAU;
use tracing::warn;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, EstimatedTextMeasurer, FontExtents, FontSpec, LayerPrimitives, RenderFrame, Renderer,
    TextMeasurer,
};

/// Glyph used to approximate the widest advance of a font.
const WIDE_GLYPH_PROBE: &str = "W";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub polylines_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
///
/// Text is measured with Pango against the offscreen surface in both modes.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn measure_layout(&self, text: &str, font: &FontSpec) -> ChartResult<pango::Layout> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create measuring context", err))?;
        let layout = pangocairo::functions::create_layout(&context);
        layout.set_font_description(Some(&font_description(&font.family, font.size_px)));
        layout.set_text(text);
        Ok(layout)
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for layer in &frame.layers {
            paint_layer(context, layer, &frame.font_family, &mut stats)?;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl TextMeasurer for CairoRenderer {
    fn font_extents(&self, font: &FontSpec) -> FontExtents {
        match self.measure_layout(WIDE_GLYPH_PROBE, font) {
            Ok(layout) => {
                let metrics = layout.context().metrics(
                    Some(&font_description(&font.family, font.size_px)),
                    None,
                );
                let scale = f64::from(pango::SCALE);
                let ascent = f64::from(metrics.ascent()) / scale;
                let descent = f64::from(metrics.descent()) / scale;
                let (probe_width, _) = layout.pixel_size();
                FontExtents {
                    ascent,
                    descent,
                    height: ascent + descent,
                    max_x_advance: f64::from(probe_width),
                }
            }
            Err(err) => {
                warn!(error = %err, "falling back to estimated font extents");
                EstimatedTextMeasurer.font_extents(font)
            }
        }
    }

    fn text_width(&self, text: &str, font: &FontSpec) -> f64 {
        match self.measure_layout(text, font) {
            Ok(layout) => f64::from(layout.pixel_size().0),
            Err(err) => {
                warn!(error = %err, "falling back to estimated text width");
                EstimatedTextMeasurer.text_width(text, font)
            }
        }
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn paint_layer(
    context: &Context,
    layer: &LayerPrimitives,
    font_family: &str,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    for rect in &layer.rects {
        apply_color(context, rect.fill_color);
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        stats.rects_drawn += 1;
    }

    for line in &layer.lines {
        apply_color(context, line.color);
        context.set_line_width(line.stroke_width);
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        stats.lines_drawn += 1;
    }

    for polyline in &layer.polylines {
        let Some(((first_x, first_y), rest)) = polyline.points.split_first() else {
            continue;
        };
        apply_color(context, polyline.color);
        context.set_line_width(polyline.stroke_width);
        context.move_to(*first_x, *first_y);
        for (x, y) in rest {
            context.line_to(*x, *y);
        }
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
        stats.polylines_drawn += 1;
    }

    for circle in &layer.circles {
        apply_color(context, circle.color);
        context.new_sub_path();
        context.arc(circle.x, circle.y, circle.radius, 0.0, TAU);
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill circle", err))?;
        stats.circles_drawn += 1;
    }

    for text in &layer.texts {
        let layout = pangocairo::functions::create_layout(context);
        layout.set_font_description(Some(&font_description(font_family, text.font_size_px)));
        layout.set_text(&text.text);

        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);

        apply_color(context, text.color);
        context.move_to(text.x, text.y - baseline);
        pangocairo::functions::show_layout(context, &layout);
        stats.texts_drawn += 1;
    }

    Ok(())
}

fn font_description(family: &str, size_px: f64) -> FontDescription {
    let mut description = FontDescription::new();
    if !family.is_empty() {
        description.set_family(family);
    }
    description.set_absolute_size(size_px * f64::from(pango::SCALE));
    description
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
