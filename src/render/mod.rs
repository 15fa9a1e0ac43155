mod frame;
mod layer_stack;
mod null_renderer;
mod primitives;
mod text;

pub use frame::RenderFrame;
pub use layer_stack::{CanvasLayerKind, LayerPrimitives};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, RectPrimitive, TextPrimitive,
};
pub use text::{EstimatedTextMeasurer, FontExtents, FontSpec, TextMeasurer};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends measure text for layout and then receive a fully materialized,
/// deterministic `RenderFrame`, so drawing code stays isolated from the
/// sample store and cursor logic.
pub trait Renderer: TextMeasurer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
