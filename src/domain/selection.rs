//! Browsing cursor over the history store
//!
//! Tracks the current position, clamps moves at the edges, and reports
//! boundary hits as a signal (for an audible or visual cue), never as an
//! error.

/// Result of a cursor move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Cursor moved to the contained index
    Moved(usize),
    /// Already at the edge (or the store is empty); index unchanged
    Boundary,
}

/// Current browsing position into the history store.
///
/// Holds only an index; it never owns or copies entry content. The index
/// is valid in `[0, len)` while the store is non-empty and pins to 0
/// otherwise.
#[derive(Debug, Default)]
pub struct SelectionCursor {
    current: usize,
}

impl SelectionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Step towards the most recent entry (index 0)
    pub fn move_left(&mut self, len: usize) -> MoveOutcome {
        if len == 0 || self.current == 0 {
            return MoveOutcome::Boundary;
        }
        self.current -= 1;
        MoveOutcome::Moved(self.current)
    }

    /// Step towards the oldest entry (index len-1)
    pub fn move_right(&mut self, len: usize) -> MoveOutcome {
        if len == 0 || self.current + 1 >= len {
            return MoveOutcome::Boundary;
        }
        self.current += 1;
        MoveOutcome::Moved(self.current)
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Adopt a persisted index; anything outside `[0, len)` clamps to 0
    pub fn load_persisted(&mut self, saved: usize, len: usize) {
        self.current = if saved < len { saved } else { 0 };
    }

    /// Index to persist for the next session
    pub fn persist(&self) -> usize {
        self.current
    }

    /// Store contents changed (insert, evict, clear): restart browsing
    /// from the most recent entry.
    pub fn on_store_changed(&mut self) {
        self.current = 0;
    }
}
