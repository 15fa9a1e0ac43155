use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{AxisConfig, Curve, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::CursorState;
use crate::render::{Color, Renderer};

use super::{CurveStyle, StripChart};

pub const STRIP_CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Per-curve summary; extrema are `None` while the curve is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSnapshot {
    pub title: String,
    pub color: Color,
    pub len: usize,
    pub latest: Option<f64>,
    pub running_max: Option<f64>,
    pub running_min: Option<f64>,
}

impl From<&Curve> for CurveSnapshot {
    fn from(curve: &Curve) -> Self {
        let finite = |value: f64| value.is_finite().then_some(value);
        Self {
            title: curve.title().to_owned(),
            color: curve.color(),
            len: curve.len(),
            latest: curve.value_at(0),
            running_max: finite(curve.running_max()),
            running_min: finite(curve.running_min()),
        }
    }
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripChartSnapshot {
    pub viewport: Viewport,
    pub curve_style: CurveStyle,
    pub axis: AxisConfig,
    pub sample_count: usize,
    pub newest: Option<DateTime<Utc>>,
    pub oldest: Option<DateTime<Utc>>,
    pub curves: Vec<CurveSnapshot>,
    pub cursor: CursorState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: StripChartSnapshot,
}

impl StripChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = StripChartSnapshotJsonContractV1 {
            schema_version: STRIP_CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<StripChartSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: StripChartSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != STRIP_CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> StripChart<R> {
    #[must_use]
    pub fn snapshot(&self) -> StripChartSnapshot {
        StripChartSnapshot {
            viewport: self.config.viewport,
            curve_style: self.config.curve_style,
            axis: self.axis,
            sample_count: self.store.len(),
            newest: self.store.newest(),
            oldest: self.store.oldest(),
            curves: self.store.curves().iter().map(CurveSnapshot::from).collect(),
            cursor: self.cursor,
        }
    }
}
