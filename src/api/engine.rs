use tracing::debug;

use crate::core::{AxisConfig, CoordinateMapper, PlotArea, TimeSeriesStore, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::CursorState;
use crate::render::{RenderFrame, Renderer};

use super::invalidation::InvalidationState;
use super::render_frame_builder::{FrameInputs, build_strip_chart_frame};
use super::{CurveStyle, StripChartConfig};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `StripChart` owns the sample store, the live Y axis, cursor state and the
/// renderer. Mutations mark the chart dirty; `render` paints whatever the
/// state is at that moment.
pub struct StripChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: StripChartConfig,
    pub(super) store: TimeSeriesStore,
    pub(super) axis: AxisConfig,
    pub(super) cursor: CursorState,
    pub(super) invalidation: InvalidationState,
}

impl<R: Renderer> StripChart<R> {
    /// Creates a chart with no curves; axes come from `config.axis`.
    pub fn new(renderer: R, config: StripChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let axis = config.axis;
        let mut chart = Self {
            renderer,
            store: TimeSeriesStore::new(axis.window_seconds),
            axis,
            cursor: CursorState::default(),
            invalidation: InvalidationState::default(),
            config,
        };
        debug!(
            width = chart.config.viewport.width,
            height = chart.config.viewport.height,
            style = ?chart.config.curve_style,
            "create strip chart"
        );
        chart.invalidate_full();
        Ok(chart)
    }

    #[must_use]
    pub fn config(&self) -> &StripChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    /// Follows a host resize; layout is recomputed on the next render.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if viewport != self.config.viewport {
            self.config.viewport = viewport;
            self.invalidate_full();
        }
        Ok(())
    }

    #[must_use]
    pub fn curve_style(&self) -> CurveStyle {
        self.config.curve_style
    }

    pub fn set_curve_style(&mut self, style: CurveStyle) {
        if style != self.config.curve_style {
            self.config.curve_style = style;
            self.invalidate_full();
        }
    }

    /// Current live axis, including any auto-expansion.
    #[must_use]
    pub fn axis(&self) -> AxisConfig {
        self.axis
    }

    #[must_use]
    pub fn store(&self) -> &TimeSeriesStore {
        &self.store
    }

    #[must_use]
    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    /// Plot rectangle the next render would use.
    pub fn plot_area(&self) -> ChartResult<PlotArea> {
        PlotArea::measure(
            self.config.viewport,
            &self.renderer,
            &self.config.font(),
            self.axis,
        )
    }

    /// Coordinate mapper for the current layout.
    pub fn mapper(&self) -> ChartResult<CoordinateMapper> {
        CoordinateMapper::new(self.plot_area()?, self.axis)
    }

    /// Builds the frame for the current state without painting it.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        build_strip_chart_frame(self.frame_inputs(), &self.renderer)
    }

    /// Paints the current state and clears any pending redraw request.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)?;
        let consumed = self.invalidation.take();
        debug!(samples = self.store.len(), invalidation = ?consumed, "render frame");
        Ok(())
    }

    /// Renders the frame into an external cairo context.
    ///
    /// This path is used by GTK draw callbacks while keeping the renderer
    /// implementation decoupled from GTK-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)?;
        let consumed = self.invalidation.take();
        debug!(
            samples = self.store.len(),
            invalidation = ?consumed,
            "render frame on cairo context"
        );
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub(super) fn frame_inputs(&self) -> FrameInputs<'_> {
        FrameInputs {
            store: &self.store,
            axis: self.axis,
            cursor: self.cursor,
            config: &self.config,
        }
    }
}
