//! strip-chart: scrolling multi-curve strip chart engine.
//!
//! Samples for several curves share one newest-first timestamp sequence that
//! ages out over a fixed window. Each draw pass turns the current state into a
//! backend-agnostic `RenderFrame`; backends implement `render::Renderer`.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{CurveStyle, StripChart, StripChartConfig};
pub use error::{ChartError, ChartResult};
