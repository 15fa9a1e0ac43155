use std::rc::Rc;
use std::time::Duration;

use chrono::Utc;
use gtk4 as gtk;
use gtk4::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use strip_chart::core::Viewport;
use strip_chart::platform_gtk::GtkStripChartAdapter;
use strip_chart::render::{CairoRenderer, Color};
use strip_chart::{ChartResult, StripChart, StripChartConfig};

const SAMPLE_INTERVAL: Duration = Duration::from_secs(3);
const WINDOW_SECONDS: f64 = 60.0;
const OUTDOOR_MIN: i32 = 0;
const OUTDOOR_MAX: i32 = 45;

fn main() {
    let _ = strip_chart::telemetry::init_default_tracing();

    let app = gtk::Application::builder()
        .application_id("rs.stripchart.demos.weather")
        .build();
    app.connect_activate(build_ui);
    let _ = app.run();
}

fn build_chart() -> ChartResult<StripChart<CairoRenderer>> {
    let config = StripChartConfig::new(Viewport::new(900, 150))
        .with_font("Noto Sans", 11.0)
        .with_axes(WINDOW_SECONDS, f64::from(OUTDOOR_MIN), f64::from(OUTDOOR_MAX), 10.0);
    let renderer = CairoRenderer::new(900, 150)?;
    let mut chart = StripChart::new(renderer, config)?;
    chart.add_curve("Outdoor temp. (C)", Color::DODGER_BLUE)?;
    chart.add_curve("Indoor temp. (C)", Color::PURPLE)?;
    chart.add_curve("Outdoor hum. (%)", Color::ORANGE)?;
    Ok(chart)
}

fn push_random_sample(adapter: &GtkStripChartAdapter, rng: &mut SmallRng) {
    let values = [
        f64::from(rng.random_range(OUTDOOR_MIN..=OUTDOOR_MAX)),
        f64::from(rng.random_range(20..=30_i32)),
        f64::from(rng.random_range(70..=90_i32)),
    ];
    let outcome = adapter.with_chart(|chart| chart.add_values(Utc::now(), &values));
    if let Some(Err(err)) = outcome {
        eprintln!("failed to add sample: {err}");
    }
}

fn build_ui(app: &gtk::Application) {
    let chart = match build_chart() {
        Ok(chart) => chart,
        Err(err) => {
            eprintln!("failed to initialize strip chart: {err}");
            return;
        }
    };

    let adapter = Rc::new(GtkStripChartAdapter::new(chart));
    let mut rng = SmallRng::from_os_rng();
    push_random_sample(&adapter, &mut rng);
    {
        let adapter = Rc::clone(&adapter);
        gtk::glib::timeout_add_local(SAMPLE_INTERVAL, move || {
            push_random_sample(&adapter, &mut rng);
            gtk::glib::ControlFlow::Continue
        });
    }

    let window = gtk::ApplicationWindow::builder()
        .application(app)
        .title("strip-chart | weather demo")
        .default_width(900)
        .default_height(150)
        .build();
    window.set_child(Some(adapter.drawing_area()));
    window.present();
}
