use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rust_decimal::Decimal;
use strip_chart::core::Viewport;
use strip_chart::render::{Color, NullRenderer};
use strip_chart::{ChartError, StripChart, StripChartConfig};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn chart() -> StripChart<NullRenderer> {
    StripChart::new(
        NullRenderer::default(),
        StripChartConfig::new(Viewport::new(500, 250)),
    )
    .expect("chart init")
}

#[test]
fn window_scenario_expands_axis_and_evicts() {
    let mut chart = chart();
    chart.set_axes(60.0, 0.0, 20.0, 5.0).expect("axes");
    chart.add_curve("temperature", Color::DODGER_BLUE).expect("curve");

    chart.add_values(t0(), &[22.0]).expect("first");
    assert_eq!(chart.axis().y_max, 25.0);
    assert_eq!(chart.axis().y_min, 0.0);

    let outcome = chart
        .add_values(t0() + TimeDelta::seconds(61), &[3.0])
        .expect("second");
    assert!(outcome.evicted);
    assert_eq!(chart.store().len(), 1);
    assert_eq!(chart.axis().y_min, 0.0);
    // Bounds never shrink, even though 22.0 aged out.
    assert_eq!(chart.axis().y_max, 25.0);
}

#[test]
fn negative_values_expand_min_down_to_tick() {
    let mut chart = chart();
    chart.set_axes(60.0, 0.0, 20.0, 5.0).expect("axes");
    chart.add_curve("temperature", Color::DODGER_BLUE).expect("curve");
    chart.add_values(t0(), &[-3.0]).expect("sample");
    assert_eq!(chart.axis().y_min, -5.0);
    assert_eq!(chart.axis().y_max, 20.0);
}

#[test]
fn set_axes_replaces_expanded_bounds() {
    let mut chart = chart();
    chart.set_axes(60.0, 0.0, 20.0, 5.0).expect("axes");
    chart.add_curve("temperature", Color::DODGER_BLUE).expect("curve");
    chart.add_values(t0(), &[42.0]).expect("sample");
    assert_eq!(chart.axis().y_max, 45.0);

    chart.set_axes(30.0, 0.0, 20.0, 5.0).expect("axes again");
    assert_eq!(chart.axis().y_max, 20.0);
    assert_eq!(chart.axis().window_seconds, 30.0);
    assert_eq!(chart.store().window_seconds(), 30.0);
    // Existing samples are kept; the next append expands again.
    assert_eq!(chart.store().len(), 1);
    chart
        .add_values(t0() + TimeDelta::seconds(1), &[1.0])
        .expect("sample");
    assert_eq!(chart.axis().y_max, 45.0);
}

#[test]
fn invalid_axes_leave_previous_configuration() {
    let mut chart = chart();
    chart.set_axes(60.0, 0.0, 20.0, 5.0).expect("axes");
    assert!(matches!(
        chart.set_axes(60.0, 10.0, 0.0, 5.0),
        Err(ChartError::DegenerateAxis { .. })
    ));
    assert!(matches!(
        chart.set_axes(-1.0, 0.0, 10.0, 5.0),
        Err(ChartError::InvalidAxis(_))
    ));
    assert_eq!(chart.axis().y_max, 20.0);
    assert_eq!(chart.store().window_seconds(), 60.0);
}

#[test]
fn mismatched_value_count_leaves_chart_untouched() {
    let mut chart = chart();
    chart.set_axes(60.0, 0.0, 20.0, 5.0).expect("axes");
    chart.add_curve("outdoor", Color::DODGER_BLUE).expect("outdoor");
    chart.add_curve("indoor", Color::PURPLE).expect("indoor");
    chart.add_values(t0(), &[1.0, 2.0]).expect("sample");

    let err = chart
        .add_values(t0() + TimeDelta::seconds(1), &[99.0])
        .expect_err("mismatch");
    assert!(matches!(err, ChartError::ValueCountMismatch { .. }));
    assert_eq!(chart.store().len(), 1);
    assert_eq!(chart.axis().y_max, 20.0);
}

#[test]
fn clear_keeps_curves_and_axes() {
    let mut chart = chart();
    chart.set_axes(60.0, 0.0, 20.0, 5.0).expect("axes");
    chart.add_curve("temperature", Color::DODGER_BLUE).expect("curve");
    chart.add_values(t0(), &[30.0]).expect("sample");
    let axis = chart.axis();

    chart.clear();
    assert!(chart.store().is_empty());
    assert_eq!(chart.store().curves().len(), 1);
    assert_eq!(chart.axis(), axis);
    chart
        .add_values(t0() - TimeDelta::seconds(100), &[1.0])
        .expect("older timestamps accepted after clear");
}

#[test]
fn decimal_readings_are_appended_as_floats() {
    let mut chart = chart();
    chart.set_axes(60.0, 0.0, 20.0, 5.0).expect("axes");
    chart.add_curve("pressure", Color::ORANGE).expect("curve");
    chart
        .add_decimal_values(t0(), &[Decimal::new(215, 1)])
        .expect("decimal sample");
    assert_eq!(chart.store().curve(0).and_then(|c| c.value_at(0)), Some(21.5));
    assert_eq!(chart.axis().y_max, 25.0);
}

#[test]
fn curve_definition_is_locked_while_samples_exist() {
    let mut chart = chart();
    chart.add_curve("first", Color::RED).expect("curve");
    chart.add_values(t0(), &[1.0]).expect("sample");
    assert!(matches!(
        chart.add_curve("second", Color::ORANGE),
        Err(ChartError::CurvesLocked { .. })
    ));
}
