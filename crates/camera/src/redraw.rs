//! Redraw and clear bookkeeping.

/// Tracks whether the projected canvas is stale.
///
/// Motion only marks the canvas stale when redraws are managed; explicit
/// requests and layout changes always do. Only a completed draw clears
/// the flag.
#[derive(Debug, Clone)]
pub(crate) struct RedrawState {
    managed: bool,
    needs_redraw: bool,
    needs_clear: bool,
    layout_changed: bool,
}

impl RedrawState {
    pub(crate) fn new(managed: bool) -> Self {
        Self {
            managed,
            needs_redraw: true,
            needs_clear: false,
            layout_changed: false,
        }
    }

    pub(crate) fn is_managed(&self) -> bool {
        self.managed
    }

    pub(crate) fn set_managed(&mut self, managed: bool) {
        self.managed = managed;
    }

    pub(crate) fn request(&mut self) {
        self.needs_redraw = true;
    }

    /// Mark the canvas stale after a camera motion, if redraws are managed.
    pub(crate) fn note_motion(&mut self, changed: bool) {
        if self.managed && changed {
            self.needs_redraw = true;
        }
    }

    /// Whether the next draw has to project the logical canvas.
    pub(crate) fn pending(&self) -> bool {
        self.needs_redraw || !self.managed
    }

    pub(crate) fn schedule_clear(&mut self) {
        self.needs_clear = true;
    }

    /// Consume the scheduled clear.
    pub(crate) fn take_clear(&mut self) -> bool {
        std::mem::take(&mut self.needs_clear)
    }

    pub(crate) fn mark_layout_changed(&mut self) {
        self.layout_changed = true;
        self.needs_redraw = true;
    }

    pub(crate) fn layout_changed(&self) -> bool {
        self.layout_changed
    }

    pub(crate) fn clear_layout_changed(&mut self) {
        self.layout_changed = false;
    }

    pub(crate) fn complete(&mut self) {
        self.needs_redraw = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmanaged_is_always_pending() {
        let mut state = RedrawState::new(false);
        state.complete();
        assert!(state.pending());
        state.note_motion(true);
        state.complete();
        assert!(state.pending());
    }

    #[test]
    fn test_managed_motion() {
        let mut state = RedrawState::new(true);
        assert!(state.pending());
        state.complete();
        assert!(!state.pending());

        state.note_motion(false);
        assert!(!state.pending());
        state.note_motion(true);
        assert!(state.pending());
        state.complete();

        state.request();
        assert!(state.pending());
    }

    #[test]
    fn test_clear_is_consumed_once() {
        let mut state = RedrawState::new(true);
        state.schedule_clear();
        assert!(state.take_clear());
        assert!(!state.take_clear());
    }

    #[test]
    fn test_layout_change_requests_redraw() {
        let mut state = RedrawState::new(true);
        state.complete();
        state.mark_layout_changed();
        assert!(state.layout_changed());
        assert!(state.pending());
        state.clear_layout_changed();
        assert!(!state.layout_changed());
        assert!(state.pending());
    }
}
