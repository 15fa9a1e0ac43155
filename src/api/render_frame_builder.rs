use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{AxisConfig, CoordinateMapper, PlotArea, TimeSeriesStore};
use crate::error::ChartResult;
use crate::interaction::CursorState;
use crate::render::{
    CanvasLayerKind, CirclePrimitive, Color, FontExtents, FontSpec, LinePrimitive,
    PolylinePrimitive, RectPrimitive, RenderFrame, TextMeasurer, TextPrimitive,
};

use super::label_format::{
    LEGEND_TITLE_SEPARATOR, format_readout_value, format_sample_time, format_tick_label,
};
use super::{CurveStyle, StripChartConfig};

const GRID_LINE_WIDTH_PX: f64 = 0.2;
const CURSOR_LINE_WIDTH_PX: f64 = 0.8;
const CURVE_LINE_WIDTH_PX: f64 = 1.0;
const POINT_MARKER_RADIUS_PX: f64 = 1.0;
/// Ticks landing this far above the plot top are not painted.
const GRID_TOP_TOLERANCE_PX: f64 = 0.5;

/// Sample picked by the cursor and the values every curve holds there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorReadout {
    pub index: usize,
    pub pixel_x: f64,
    pub timestamp: DateTime<Utc>,
    pub time_label: String,
    pub values: SmallVec<[f64; 4]>,
}

impl CursorReadout {
    /// Full read-out line: timestamp followed by one value per curve.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = self.time_label.clone();
        for value in &self.values {
            text.push_str(&format_readout_value(*value));
        }
        text
    }
}

/// Everything one draw pass reads.
#[derive(Clone, Copy)]
pub(crate) struct FrameInputs<'a> {
    pub store: &'a TimeSeriesStore,
    pub axis: AxisConfig,
    pub cursor: CursorState,
    pub config: &'a StripChartConfig,
}

/// Resolves the cursor to the nearest sample, if the cursor is active and over data.
pub(crate) fn resolve_cursor_readout(
    mapper: CoordinateMapper,
    store: &TimeSeriesStore,
    cursor: CursorState,
    time_label_format: &str,
) -> Option<CursorReadout> {
    if !cursor.active {
        return None;
    }
    let index = mapper.x_to_nearest_sample_index(cursor.pixel_x, store)?;
    let timestamp = *store.timestamps().get(index)?;
    let values = store
        .curves()
        .iter()
        .map(|curve| curve.value_at(index))
        .collect::<Option<SmallVec<[f64; 4]>>>()?;
    Some(CursorReadout {
        index,
        pixel_x: cursor.pixel_x,
        timestamp,
        time_label: format_sample_time(timestamp, time_label_format),
        values,
    })
}

/// Builds the frame for one draw pass.
///
/// Paint order: background, grid with labels, cursor, legend, curves. Layout
/// is recomputed from the measurer on every call.
pub(crate) fn build_strip_chart_frame(
    inputs: FrameInputs<'_>,
    measurer: &impl TextMeasurer,
) -> ChartResult<RenderFrame> {
    let config = inputs.config;
    let font = config.font();
    let mut frame = RenderFrame::new(config.viewport, font.family.clone());

    let area = PlotArea::measure(config.viewport, measurer, &font, inputs.axis)?;
    if !area.is_drawable() {
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            "viewport too small for plot area"
        );
        return Ok(frame);
    }
    let mapper = CoordinateMapper::new(area, inputs.axis)?;
    let extents = measurer.font_extents(&font);

    frame.push_rect(
        CanvasLayerKind::Background,
        RectPrimitive::new(area.left, area.top, area.width, area.height, Color::BACKGROUND),
    );
    push_grid(&mut frame, mapper, extents, &font)?;
    if let Some(readout) =
        resolve_cursor_readout(mapper, inputs.store, inputs.cursor, &config.time_label_format)
    {
        push_cursor(&mut frame, &readout, inputs, mapper, extents, &font, measurer);
    }
    push_legend(&mut frame, inputs.store, area, extents, &font, measurer);
    push_curves(&mut frame, inputs.store, mapper, config.curve_style)?;

    Ok(frame)
}

fn push_grid(
    frame: &mut RenderFrame,
    mapper: CoordinateMapper,
    extents: FontExtents,
    font: &FontSpec,
) -> ChartResult<()> {
    let area = mapper.area();
    for tick in mapper.axis().tick_positions() {
        let y = mapper.value_to_y(tick)?;
        if y < area.top - GRID_TOP_TOLERANCE_PX {
            break;
        }
        frame.push_text(
            CanvasLayerKind::Grid,
            TextPrimitive::new(
                format_tick_label(tick),
                extents.max_x_advance / 2.0,
                y + extents.height / 4.0,
                font.size_px,
                Color::BLACK,
            ),
        );
        frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(area.left, y, area.right(), y, GRID_LINE_WIDTH_PX, Color::GRAY),
        );
    }
    Ok(())
}

fn push_cursor(
    frame: &mut RenderFrame,
    readout: &CursorReadout,
    inputs: FrameInputs<'_>,
    mapper: CoordinateMapper,
    extents: FontExtents,
    font: &FontSpec,
    measurer: &impl TextMeasurer,
) {
    let area = mapper.area();
    let viewport = inputs.config.viewport;
    frame.push_line(
        CanvasLayerKind::Cursor,
        LinePrimitive::new(
            readout.pixel_x,
            area.top,
            readout.pixel_x,
            area.bottom(),
            CURSOR_LINE_WIDTH_PX,
            Color::BLACK,
        ),
    );

    // Right half of the viewport: end the text at the cursor so it stays on screen.
    let block_width = measurer.text_width(&readout.text(), font);
    let mut x = if readout.pixel_x > f64::from(viewport.width) / 2.0 {
        readout.pixel_x - block_width
    } else {
        readout.pixel_x
    };
    let baseline = f64::from(viewport.height) - extents.descent;

    frame.push_text(
        CanvasLayerKind::Cursor,
        TextPrimitive::new(
            readout.time_label.clone(),
            x,
            baseline,
            font.size_px,
            Color::BLACK,
        ),
    );
    x += measurer.text_width(&readout.time_label, font);

    for (curve, value) in inputs.store.curves().iter().zip(&readout.values) {
        let run = format_readout_value(*value);
        let run_width = measurer.text_width(&run, font);
        frame.push_text(
            CanvasLayerKind::Cursor,
            TextPrimitive::new(run, x, baseline, font.size_px, curve.color()),
        );
        x += run_width;
    }
}

fn push_legend(
    frame: &mut RenderFrame,
    store: &TimeSeriesStore,
    area: PlotArea,
    extents: FontExtents,
    font: &FontSpec,
    measurer: &impl TextMeasurer,
) {
    let baseline = area.top - extents.descent;
    let mut x = area.left;
    for curve in store.curves() {
        let run = format!("{}{LEGEND_TITLE_SEPARATOR}", curve.title());
        let run_width = measurer.text_width(&run, font);
        frame.push_text(
            CanvasLayerKind::Legend,
            TextPrimitive::new(run, x, baseline, font.size_px, curve.color()),
        );
        x += run_width;
    }
}

fn push_curves(
    frame: &mut RenderFrame,
    store: &TimeSeriesStore,
    mapper: CoordinateMapper,
    style: CurveStyle,
) -> ChartResult<()> {
    if store.is_empty() {
        return Ok(());
    }
    let ages = (0..store.len())
        .filter_map(|index| store.age_seconds(index))
        .collect::<Vec<_>>();

    for curve in store.curves() {
        let mut points = Vec::with_capacity(curve.len() + 1);
        for (age, value) in ages.iter().zip(curve.values()) {
            points.push((mapper.time_to_x(*age), mapper.value_to_y(*value)?));
        }

        match style {
            CurveStyle::Line => {
                // Anchor one pixel above the newest sample so a lone sample still shows.
                if let Some(&(x, y)) = points.first() {
                    points.insert(0, (x, y - 1.0));
                }
                frame.push_polyline(
                    CanvasLayerKind::Series,
                    PolylinePrimitive::new(points, CURVE_LINE_WIDTH_PX, curve.color()),
                );
            }
            CurveStyle::Points => {
                for (x, y) in points {
                    frame.push_circle(
                        CanvasLayerKind::Series,
                        CirclePrimitive::new(x, y, POINT_MARKER_RADIUS_PX, curve.color()),
                    );
                }
            }
        }
    }
    Ok(())
}
