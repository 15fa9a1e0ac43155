use serde::{Deserialize, Serialize};

/// Ephemeral pointer state driving the cursor overlay.
///
/// Only the horizontal position matters: the read-out is a vertical line plus
/// the values of every curve at the sample nearest in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CursorState {
    pub pixel_x: f64,
    pub active: bool,
}

impl CursorState {
    /// Pointer entered the chart; the cursor shows only when samples exist.
    pub fn on_pointer_enter(&mut self, has_samples: bool) {
        if has_samples {
            self.active = true;
        }
    }

    /// Tracks the pointer while samples exist.
    ///
    /// Returns `true` when the cursor changed and needs a repaint.
    pub fn on_pointer_move(&mut self, x: f64, has_samples: bool) -> bool {
        if !has_samples || !x.is_finite() {
            return false;
        }
        let changed = !self.active || self.pixel_x != x;
        self.pixel_x = x;
        self.active = true;
        changed
    }

    pub fn on_pointer_leave(&mut self) {
        *self = Self::default();
    }
}
