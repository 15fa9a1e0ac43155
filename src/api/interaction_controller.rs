use tracing::trace;

use crate::error::ChartResult;
use crate::render::Renderer;

use super::StripChart;
use super::render_frame_builder::{CursorReadout, resolve_cursor_readout};

impl<R: Renderer> StripChart<R> {
    pub fn pointer_enter(&mut self) {
        self.cursor.on_pointer_enter(!self.store.is_empty());
        if self.cursor.active {
            self.invalidate_cursor();
        }
    }

    /// Moves the cursor; `y` is accepted for host symmetry and ignored.
    pub fn pointer_move(&mut self, x: f64, _y: f64) {
        if self.cursor.on_pointer_move(x, !self.store.is_empty()) {
            trace!(x, "cursor move");
            self.invalidate_cursor();
        }
    }

    pub fn pointer_leave(&mut self) {
        let was_active = self.cursor.active;
        self.cursor.on_pointer_leave();
        if was_active {
            self.invalidate_cursor();
        }
    }

    /// Sample currently under the cursor, as the next render would show it.
    pub fn cursor_readout(&self) -> ChartResult<Option<CursorReadout>> {
        let mapper = self.mapper()?;
        Ok(resolve_cursor_readout(
            mapper,
            &self.store,
            self.cursor,
            &self.config.time_label_format,
        ))
    }

    /// Index of the sample nearest in time to `pixel_x`, if it lies over data.
    pub fn sample_index_at(&self, pixel_x: f64) -> ChartResult<Option<usize>> {
        Ok(self.mapper()?.x_to_nearest_sample_index(pixel_x, &self.store))
    }
}
