use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid axis configuration: {0}")]
    InvalidAxis(String),

    #[error("degenerate value axis: y_min={y_min}, y_max={y_max}")]
    DegenerateAxis { y_min: f64, y_max: f64 },

    #[error("expected {expected} values (one per curve), got {got}")]
    ValueCountMismatch { expected: usize, got: usize },

    #[error("no curves defined; call add_curve before add_values")]
    NoCurves,

    #[error("sample timestamp {timestamp} is older than newest sample {newest}")]
    OutOfOrderTimestamp { timestamp: String, newest: String },

    #[error("curves cannot be added once samples exist ({samples} stored)")]
    CurvesLocked { samples: usize },
}
