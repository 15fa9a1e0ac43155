use approx::assert_relative_eq;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use strip_chart::core::Viewport;
use strip_chart::render::{
    CanvasLayerKind, Color, EstimatedTextMeasurer, FontSpec, NullRenderer, RenderFrame,
    TextMeasurer,
};
use strip_chart::{CurveStyle, StripChart, StripChartConfig};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn config() -> StripChartConfig {
    StripChartConfig::new(Viewport::new(500, 250)).with_axes(60.0, 0.0, 20.0, 5.0)
}

fn weather_chart(config: StripChartConfig) -> StripChart<NullRenderer> {
    let mut chart = StripChart::new(NullRenderer::default(), config).expect("chart init");
    chart.add_curve("outdoor", Color::DODGER_BLUE).expect("outdoor");
    chart.add_curve("indoor", Color::PURPLE).expect("indoor");
    chart
}

fn fill(chart: &mut StripChart<NullRenderer>, offsets: &[i64]) {
    for offset in offsets {
        let value = *offset as f64 / 4.0;
        chart
            .add_values(t0() + TimeDelta::seconds(*offset), &[value, value + 1.0])
            .expect("sample");
    }
}

fn layer_texts(frame: &RenderFrame, kind: CanvasLayerKind) -> Vec<String> {
    frame
        .layer(kind)
        .expect("layer present")
        .texts
        .iter()
        .map(|text| text.text.clone())
        .collect()
}

#[test]
fn layers_follow_paint_order() {
    let frame = weather_chart(config()).build_render_frame().expect("frame");
    let kinds = frame.layers.iter().map(|layer| layer.kind).collect::<Vec<_>>();
    assert_eq!(kinds, CanvasLayerKind::PAINT_ORDER.to_vec());
}

#[test]
fn empty_chart_paints_background_grid_and_legend_only() {
    let chart = weather_chart(config());
    let frame = chart.build_render_frame().expect("frame");
    let area = chart.plot_area().expect("area");

    let background = frame.layer(CanvasLayerKind::Background).expect("background");
    assert_eq!(background.rects.len(), 1);
    assert_relative_eq!(background.rects[0].x, area.left);
    assert_relative_eq!(background.rects[0].width, area.width);
    assert_eq!(background.rects[0].fill_color, Color::BACKGROUND);

    let grid = frame.layer(CanvasLayerKind::Grid).expect("grid");
    assert_eq!(grid.lines.len(), 5);
    assert_eq!(layer_texts(&frame, CanvasLayerKind::Grid), ["0", "5", "10", "15", "20"]);

    assert_eq!(
        layer_texts(&frame, CanvasLayerKind::Legend),
        ["outdoor   ", "indoor   "]
    );
    assert!(frame.layer(CanvasLayerKind::Cursor).expect("cursor").is_empty());
    assert!(frame.layer(CanvasLayerKind::Series).expect("series").is_empty());
}

#[test]
fn grid_lines_span_plot_width_in_gray() {
    let chart = weather_chart(config());
    let frame = chart.build_render_frame().expect("frame");
    let area = chart.plot_area().expect("area");
    for line in &frame.layer(CanvasLayerKind::Grid).expect("grid").lines {
        assert_relative_eq!(line.x1, area.left);
        assert_relative_eq!(line.x2, area.right());
        assert_relative_eq!(line.y1, line.y2);
        assert_relative_eq!(line.stroke_width, 0.2);
        assert_eq!(line.color, Color::GRAY);
    }
}

#[test]
fn grid_stops_at_first_tick_above_plot_top() {
    let chart = weather_chart(config().with_axes(60.0, 0.0, 45.0, 10.0));
    let frame = chart.build_render_frame().expect("frame");
    assert_eq!(
        layer_texts(&frame, CanvasLayerKind::Grid),
        ["0", "10", "20", "30", "40"]
    );
}

#[test]
fn legend_runs_are_laid_out_left_to_right_above_plot() {
    let chart = weather_chart(config());
    let frame = chart.build_render_frame().expect("frame");
    let area = chart.plot_area().expect("area");
    let font = chart.config().font();
    let extents = EstimatedTextMeasurer.font_extents(&font);

    let legend = &frame.layer(CanvasLayerKind::Legend).expect("legend").texts;
    assert_relative_eq!(legend[0].x, area.left);
    assert_relative_eq!(
        legend[1].x,
        area.left + EstimatedTextMeasurer.text_width("outdoor   ", &font)
    );
    assert_relative_eq!(legend[0].y, area.top - extents.descent);
    assert_eq!(legend[0].color, Color::DODGER_BLUE);
    assert_eq!(legend[1].color, Color::PURPLE);
}

#[test]
fn line_style_emits_one_anchored_polyline_per_curve() {
    let mut chart = weather_chart(config());
    fill(&mut chart, &[0, 10, 20]);
    let frame = chart.build_render_frame().expect("frame");
    let mapper = chart.mapper().expect("mapper");

    let series = frame.layer(CanvasLayerKind::Series).expect("series");
    assert_eq!(series.polylines.len(), 2);
    assert!(series.circles.is_empty());

    let outdoor = &series.polylines[0];
    assert_eq!(outdoor.points.len(), 4);
    assert_eq!(outdoor.color, Color::DODGER_BLUE);
    // Newest sample (value 5.0) on the right edge, anchor one pixel above it.
    let newest_y = mapper.value_to_y(5.0).expect("y");
    assert_relative_eq!(outdoor.points[1].0, mapper.area().right());
    assert_relative_eq!(outdoor.points[1].1, newest_y);
    assert_relative_eq!(outdoor.points[0].0, mapper.area().right());
    assert_relative_eq!(outdoor.points[0].1, newest_y - 1.0);
    // Oldest sample 20 s back.
    assert_relative_eq!(outdoor.points[3].0, mapper.time_to_x(20.0));
    assert_relative_eq!(outdoor.points[3].1, mapper.value_to_y(0.0).expect("y"));
}

#[test]
fn single_sample_still_draws_visible_segment() {
    let mut chart = weather_chart(config());
    fill(&mut chart, &[0]);
    let frame = chart.build_render_frame().expect("frame");
    let series = frame.layer(CanvasLayerKind::Series).expect("series");
    assert_eq!(series.polylines[0].points.len(), 2);
}

#[test]
fn points_style_emits_one_circle_per_sample() {
    let mut chart = weather_chart(config().with_curve_style(CurveStyle::Points));
    fill(&mut chart, &[0, 10, 20]);
    let frame = chart.build_render_frame().expect("frame");
    let series = frame.layer(CanvasLayerKind::Series).expect("series");
    assert!(series.polylines.is_empty());
    assert_eq!(series.circles.len(), 6);
    assert_relative_eq!(series.circles[0].radius, 1.0);

    chart.set_curve_style(CurveStyle::Line);
    let frame = chart.build_render_frame().expect("frame");
    let series = frame.layer(CanvasLayerKind::Series).expect("series");
    assert_eq!(series.polylines.len(), 2);
}

#[test]
fn cursor_in_right_half_ends_readout_at_cursor() {
    let mut chart = weather_chart(config());
    fill(&mut chart, &[0, 10, 20]);
    let mapper = chart.mapper().expect("mapper");
    let x = mapper.time_to_x(10.0);
    assert!(x > 250.0);
    chart.pointer_move(x, 100.0);

    let readout = chart.cursor_readout().expect("mapper").expect("readout");
    assert_eq!(readout.index, 1);
    assert_eq!(readout.timestamp, t0() + TimeDelta::seconds(10));
    assert_eq!(readout.time_label, "05/01/24 12:00:10");
    assert_eq!(readout.text(), "05/01/24 12:00:10  2.5  3.5");

    let frame = chart.build_render_frame().expect("frame");
    let cursor = frame.layer(CanvasLayerKind::Cursor).expect("cursor");
    assert_eq!(cursor.lines.len(), 1);
    assert_relative_eq!(cursor.lines[0].x1, x);
    assert_relative_eq!(cursor.lines[0].y1, mapper.area().top);
    assert_relative_eq!(cursor.lines[0].y2, mapper.area().bottom());
    assert_relative_eq!(cursor.lines[0].stroke_width, 0.8);

    let font = chart.config().font();
    let texts = &cursor.texts;
    assert_eq!(texts.len(), 3);
    assert_eq!(texts[1].text, "  2.5");
    assert_eq!(texts[1].color, Color::DODGER_BLUE);
    assert_eq!(texts[2].color, Color::PURPLE);
    let block_width = EstimatedTextMeasurer.text_width(&readout.text(), &font);
    assert_relative_eq!(texts[0].x + block_width, x, epsilon = 1e-9);
    let baseline = 250.0 - EstimatedTextMeasurer.font_extents(&font).descent;
    assert!(texts.iter().all(|text| (text.y - baseline).abs() < 1e-9));
}

#[test]
fn cursor_in_left_half_starts_readout_at_cursor() {
    let mut chart = weather_chart(config());
    fill(&mut chart, &[0, 45]);
    let mapper = chart.mapper().expect("mapper");
    let x = mapper.time_to_x(45.0);
    assert!(x < 250.0);
    chart.pointer_move(x, 100.0);

    let frame = chart.build_render_frame().expect("frame");
    let texts = &frame.layer(CanvasLayerKind::Cursor).expect("cursor").texts;
    assert_relative_eq!(texts[0].x, x);
    assert_eq!(texts[1].text, "  0.0");
}

#[test]
fn cursor_beyond_oldest_sample_paints_nothing() {
    let mut chart = weather_chart(config());
    fill(&mut chart, &[0, 10]);
    let mapper = chart.mapper().expect("mapper");
    chart.pointer_move(mapper.time_to_x(40.0), 100.0);
    assert!(chart.cursor().active);

    let frame = chart.build_render_frame().expect("frame");
    assert!(frame.layer(CanvasLayerKind::Cursor).expect("cursor").is_empty());
    assert_eq!(chart.cursor_readout().expect("mapper"), None);
}

#[test]
fn too_small_viewport_yields_empty_frame() {
    let mut chart = weather_chart(StripChartConfig::new(Viewport::new(20, 20)));
    fill(&mut chart, &[0]);
    let frame = chart.build_render_frame().expect("frame");
    assert!(frame.is_empty());
    chart.render().expect("empty frame renders");
}

#[test]
fn render_hands_validated_frame_to_renderer() {
    let mut chart = weather_chart(config());
    fill(&mut chart, &[0, 10, 20]);
    chart.render().expect("render");

    let renderer = chart.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_line_count, 5);
    assert_eq!(renderer.last_text_count, 7);
    let frame = renderer.last_frame.as_ref().expect("frame kept");
    assert_eq!(frame, &chart.build_render_frame().expect("frame"));
}

#[test]
fn frame_font_follows_config() {
    let chart = weather_chart(config().with_font("Noto Sans", 14.0));
    let frame = chart.build_render_frame().expect("frame");
    assert_eq!(frame.font_family, "Noto Sans");
    assert!(frame.texts().all(|text| text.font_size_px == 14.0));
    assert_eq!(chart.config().font(), FontSpec::new("Noto Sans", 14.0));
}
