pub mod axis;
pub mod curve;
pub mod mapper;
pub mod primitives;
pub mod time_series;
pub mod types;

pub use axis::{AxisConfig, floored_mod};
pub use curve::Curve;
pub use mapper::{CoordinateMapper, PLOT_RIGHT_MARGIN_PX, PlotArea, format_axis_bound};
pub use time_series::{AppendOutcome, TimeSeriesStore};
pub use types::Viewport;
