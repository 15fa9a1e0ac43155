use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use strip_chart::core::primitives::truncated_seconds_between;
use strip_chart::core::{TimeSeriesStore, Viewport};
use strip_chart::render::{Color, NullRenderer};
use strip_chart::{StripChart, StripChartConfig};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

proptest! {
    #[test]
    fn regular_sampling_keeps_buffer_within_window(
        interval in 1_i64..=10,
        window in 5_u32..=60,
        count in 1_usize..120,
    ) {
        let mut store = TimeSeriesStore::new(f64::from(window));
        store.add_curve("a", Color::RED).expect("curve a");
        store.add_curve("b", Color::ORANGE).expect("curve b");

        for step in 0..count {
            let ts = t0() + TimeDelta::seconds(interval * step as i64);
            let outcome = store.add_values(ts, &[step as f64, -(step as f64)]).expect("append");
            prop_assert_eq!(outcome.len, store.len());
            prop_assert!(store.curves().iter().all(|curve| curve.len() == store.len()));
            let newest = store.newest().expect("newest");
            let oldest = store.oldest().expect("oldest");
            prop_assert!(truncated_seconds_between(newest, oldest) <= i64::from(window));
        }
    }

    #[test]
    fn irregular_sampling_keeps_curves_aligned(
        gaps in prop::collection::vec(0_i64..90, 1..80),
    ) {
        let mut store = TimeSeriesStore::new(30.0);
        store.add_curve("a", Color::RED).expect("curve a");
        let mut ts = t0();
        let mut previous_len = 0;
        for gap in gaps {
            ts += TimeDelta::seconds(gap);
            let outcome = store.add_values(ts, &[gap as f64]).expect("append");
            // One sample in, at most one out.
            prop_assert!(outcome.len == previous_len + 1 || outcome.len == previous_len);
            prop_assert_eq!(outcome.evicted, outcome.len == previous_len);
            prop_assert_eq!(store.timestamps().len(), store.curves()[0].len());
            let timestamps = store.timestamps();
            prop_assert!(
                timestamps
                    .iter()
                    .zip(timestamps.iter().skip(1))
                    .all(|(newer, older)| newer >= older)
            );
            previous_len = outcome.len;
        }
    }

    #[test]
    fn axis_only_grows_and_covers_buffered_values(
        values in prop::collection::vec(-1000_i32..1000, 1..100),
        step in prop::sample::select(vec![1.0_f64, 2.0, 5.0, 10.0, 25.0]),
    ) {
        let config =
            StripChartConfig::new(Viewport::new(400, 200)).with_axes(60.0, 0.0, 20.0, step);
        let mut chart = StripChart::new(NullRenderer::default(), config).expect("chart init");
        chart.add_curve("value", Color::RED).expect("curve");

        let mut previous = chart.axis();
        for (index, value) in values.iter().enumerate() {
            let ts = t0() + TimeDelta::seconds(index as i64 * 7);
            chart.add_values(ts, &[f64::from(*value)]).expect("append");
            let axis = chart.axis();
            prop_assert!(axis.y_max >= previous.y_max);
            prop_assert!(axis.y_min <= previous.y_min);
            for buffered in chart.store().curves()[0].values() {
                prop_assert!(*buffered <= axis.y_max && *buffered >= axis.y_min);
            }
            previous = axis;
        }
    }

    #[test]
    fn nearest_index_round_trips_for_every_sample(
        gaps in prop::collection::vec(1_i64..15, 1..30),
        width in 200_u32..1200,
    ) {
        let config =
            StripChartConfig::new(Viewport::new(width, 200)).with_axes(60.0, 0.0, 20.0, 5.0);
        let mut chart = StripChart::new(NullRenderer::default(), config).expect("chart init");
        chart.add_curve("value", Color::RED).expect("curve");
        let mut ts = t0();
        for gap in gaps {
            ts += TimeDelta::seconds(gap);
            chart.add_values(ts, &[1.0]).expect("append");
        }

        let mapper = chart.mapper().expect("mapper");
        for index in 0..chart.store().len() {
            let age = chart.store().age_seconds(index).expect("age");
            let x = mapper.time_to_x(age);
            prop_assert_eq!(mapper.x_to_nearest_sample_index(x, chart.store()), Some(index));
        }
    }

    #[test]
    fn rendered_frames_always_validate(
        values in prop::collection::vec(-500.0_f64..500.0, 1..60),
        cursor_x in 0.0_f64..400.0,
    ) {
        let config = StripChartConfig::new(Viewport::new(400, 200)).with_axes(30.0, 0.0, 10.0, 5.0);
        let mut chart = StripChart::new(NullRenderer::default(), config).expect("chart init");
        chart.add_curve("value", Color::RED).expect("curve");
        for (index, value) in values.iter().enumerate() {
            chart.add_values(t0() + TimeDelta::seconds(index as i64), &[*value]).expect("append");
        }
        chart.pointer_move(cursor_x, 0.0);
        prop_assert!(chart.render().is_ok());
    }
}
