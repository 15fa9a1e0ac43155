use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::render::Renderer;

use super::StripChart;

/// Ordered repaint classes; pending requests coalesce to the highest level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum InvalidationLevel {
    #[default]
    None,
    /// Only the cursor overlay moved.
    Cursor,
    /// Samples, axes or style changed.
    Full,
}

impl InvalidationLevel {
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        if self as u8 >= other as u8 {
            self
        } else {
            other
        }
    }
}

/// Redraw bookkeeping between host paint callbacks.
///
/// Mutations only mark the chart dirty; the host event loop decides when to
/// paint, and a paint always reflects the state at paint time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationState {
    pending: InvalidationLevel,
    coalesced_requests: u64,
}

impl InvalidationState {
    #[must_use]
    pub fn pending(self) -> InvalidationLevel {
        self.pending
    }

    /// Number of requests merged into the pending level since the last paint.
    #[must_use]
    pub fn coalesced_requests(self) -> u64 {
        self.coalesced_requests
    }

    pub fn request(&mut self, level: InvalidationLevel) {
        if level == InvalidationLevel::None {
            return;
        }
        self.pending = self.pending.max(level);
        self.coalesced_requests += 1;
    }

    /// Returns the pending level and resets the state.
    pub fn take(&mut self) -> InvalidationLevel {
        let level = self.pending;
        *self = Self::default();
        level
    }
}

impl<R: Renderer> StripChart<R> {
    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationLevel {
        self.invalidation.pending()
    }

    #[must_use]
    pub fn has_pending_invalidation(&self) -> bool {
        self.invalidation.pending() != InvalidationLevel::None
    }

    /// Consumes the pending redraw request without painting.
    ///
    /// Hosts that schedule paints themselves call this to decide whether to
    /// queue a draw.
    pub fn take_pending_invalidation(&mut self) -> InvalidationLevel {
        self.invalidation.take()
    }

    pub(super) fn invalidate(&mut self, level: InvalidationLevel) {
        self.invalidation.request(level);
        trace!(
            level = ?self.invalidation.pending(),
            coalesced = self.invalidation.coalesced_requests(),
            "request redraw"
        );
    }

    pub(super) fn invalidate_full(&mut self) {
        self.invalidate(InvalidationLevel::Full);
    }

    pub(super) fn invalidate_cursor(&mut self) {
        self.invalidate(InvalidationLevel::Cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_coalesce_to_highest_level() {
        let mut state = InvalidationState::default();
        state.request(InvalidationLevel::Cursor);
        state.request(InvalidationLevel::Full);
        state.request(InvalidationLevel::Cursor);
        assert_eq!(state.pending(), InvalidationLevel::Full);
        assert_eq!(state.coalesced_requests(), 3);
        assert_eq!(state.take(), InvalidationLevel::Full);
        assert_eq!(state.pending(), InvalidationLevel::None);
    }
}
