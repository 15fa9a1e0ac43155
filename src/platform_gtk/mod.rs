use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::StripChart;
use crate::core::Viewport;
use crate::render::CairoRenderer;

pub type SharedStripChart = Rc<RefCell<StripChart<CairoRenderer>>>;

/// Hosts a `StripChart` inside a GTK `DrawingArea`.
///
/// The draw callback follows the allocated size, pointer controllers feed the
/// cursor, and `with_chart` queues a draw whenever a mutation left the chart
/// dirty.
pub struct GtkStripChartAdapter {
    chart: SharedStripChart,
    drawing_area: gtk::DrawingArea,
}

impl GtkStripChartAdapter {
    #[must_use]
    pub fn new(chart: StripChart<CairoRenderer>) -> Self {
        let viewport = chart.viewport();
        let chart = Rc::new(RefCell::new(chart));
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_content_width(i32::try_from(viewport.width).unwrap_or(i32::MAX));
        drawing_area.set_content_height(i32::try_from(viewport.height).unwrap_or(i32::MAX));

        {
            let chart = Rc::clone(&chart);
            drawing_area.set_draw_func(move |_, context, width, height| {
                let Ok(mut chart) = chart.try_borrow_mut() else {
                    return;
                };
                if let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) {
                    if let Err(err) = chart.resize(Viewport::new(width, height)) {
                        warn!(error = %err, "ignoring invalid drawing area size");
                    }
                }
                if let Err(err) = chart.render_on_cairo_context(context) {
                    warn!(error = %err, "strip chart draw failed");
                }
            });
        }

        attach_pointer_controller(&drawing_area, Rc::clone(&chart));

        Self {
            chart,
            drawing_area,
        }
    }

    #[must_use]
    pub fn chart(&self) -> SharedStripChart {
        Rc::clone(&self.chart)
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    /// Runs `update` against the chart and queues a draw if it became dirty.
    ///
    /// Returns `None` when the chart is already borrowed (re-entrant call).
    pub fn with_chart<T>(
        &self,
        update: impl FnOnce(&mut StripChart<CairoRenderer>) -> T,
    ) -> Option<T> {
        let result = {
            let mut chart = self.chart.try_borrow_mut().ok()?;
            update(&mut chart)
        };
        self.queue_draw_if_invalidated();
        Some(result)
    }

    pub fn queue_draw_if_invalidated(&self) {
        let dirty = self
            .chart
            .try_borrow()
            .map(|chart| chart.has_pending_invalidation())
            .unwrap_or(false);
        if dirty {
            self.drawing_area.queue_draw();
        }
    }
}

fn attach_pointer_controller(drawing_area: &gtk::DrawingArea, chart: SharedStripChart) {
    let motion = gtk::EventControllerMotion::new();
    {
        let chart = Rc::clone(&chart);
        let drawing_area = drawing_area.clone();
        motion.connect_enter(move |_, x, y| {
            if let Ok(mut chart) = chart.try_borrow_mut() {
                chart.pointer_enter();
                chart.pointer_move(x, y);
            }
            drawing_area.queue_draw();
        });
    }
    {
        let chart = Rc::clone(&chart);
        let drawing_area = drawing_area.clone();
        motion.connect_motion(move |_, x, y| {
            if let Ok(mut chart) = chart.try_borrow_mut() {
                chart.pointer_move(x, y);
            }
            drawing_area.queue_draw();
        });
    }
    {
        let drawing_area = drawing_area.clone();
        motion.connect_leave(move |_| {
            if let Ok(mut chart) = chart.try_borrow_mut() {
                chart.pointer_leave();
            }
            drawing_area.queue_draw();
        });
    }
    drawing_area.add_controller(motion);
}
