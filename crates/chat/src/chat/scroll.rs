/// Latches scroll-to-bottom requests from transcript revisions.
///
/// The renderer observes the transcript's revision counter after each event
/// and consumes at most one pending request per redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTracker {
    last_revision: u64,
    pending: bool,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self {
            last_revision: 0,
            pending: false,
        }
    }

    /// Records the latest transcript revision, latching a scroll request when
    /// the content changed since the last observation.
    pub fn observe(&mut self, revision: u64) {
        if revision != self.last_revision {
            self.last_revision = revision;
            self.pending = true;
        }
    }

    /// Forces a scroll request regardless of revision movement.
    pub fn request_scroll_to_bottom(&mut self) {
        self.pending = true;
    }

    /// Consumes the pending request, if any.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_movement_latches_one_request() {
        let mut tracker = ScrollTracker::new();

        tracker.observe(0);
        assert!(!tracker.take_pending());

        tracker.observe(1);
        assert!(tracker.take_pending());
        assert!(!tracker.take_pending());
    }

    #[test]
    fn repeated_observation_of_the_same_revision_stays_quiet() {
        let mut tracker = ScrollTracker::new();

        tracker.observe(3);
        tracker.take_pending();
        tracker.observe(3);

        assert!(!tracker.take_pending());
    }

    #[test]
    fn explicit_request_latches_without_revision_movement() {
        let mut tracker = ScrollTracker::new();

        tracker.request_scroll_to_bottom();

        assert!(tracker.take_pending());
    }
}
