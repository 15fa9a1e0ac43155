mod data_controller;
mod engine;
mod engine_config;
mod engine_snapshot;
mod interaction_controller;
mod invalidation;
mod label_format;
mod render_frame_builder;

pub use engine::StripChart;
pub use engine_config::{
    CurveStyle, DEFAULT_FONT_SIZE_PX, DEFAULT_TIME_LABEL_FORMAT, StripChartConfig,
};
pub use engine_snapshot::{
    CurveSnapshot, STRIP_CHART_SNAPSHOT_JSON_SCHEMA_V1, StripChartSnapshot,
    StripChartSnapshotJsonContractV1,
};
pub use invalidation::{InvalidationLevel, InvalidationState};
pub use label_format::{
    LEGEND_TITLE_SEPARATOR, READOUT_VALUE_SEPARATOR, format_readout_value, format_sample_time,
    format_tick_label,
};
pub use render_frame_builder::CursorReadout;
