use std::collections::VecDeque;

use crate::render::Color;

/// One tracked metric: title, color and a newest-first value buffer.
///
/// The buffer length always matches the owning store's timestamp sequence;
/// only `TimeSeriesStore` mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    title: String,
    color: Color,
    values: VecDeque<f64>,
    running_max: f64,
    running_min: f64,
}

impl Curve {
    #[must_use]
    pub(crate) fn new(title: impl Into<String>, color: Color) -> Self {
        Self {
            title: title.into(),
            color,
            values: VecDeque::new(),
            running_max: f64::NEG_INFINITY,
            running_min: f64::INFINITY,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Values ordered newest first.
    #[must_use]
    pub fn values(&self) -> &VecDeque<f64> {
        &self.values
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest value currently buffered, `-inf` when empty.
    #[must_use]
    pub fn running_max(&self) -> f64 {
        self.running_max
    }

    /// Smallest value currently buffered, `+inf` when empty.
    #[must_use]
    pub fn running_min(&self) -> f64 {
        self.running_min
    }

    pub(crate) fn push_newest(&mut self, value: f64) {
        self.values.push_front(value);
    }

    pub(crate) fn evict_oldest(&mut self) {
        self.values.pop_back();
    }

    pub(crate) fn recompute_extrema(&mut self) {
        let (min, max) = self.values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), value| (min.min(*value), max.max(*value)),
        );
        self.running_min = min;
        self.running_max = max;
    }

    pub(crate) fn reset(&mut self) {
        self.values.clear();
        self.running_max = f64::NEG_INFINITY;
        self.running_min = f64::INFINITY;
    }
}
