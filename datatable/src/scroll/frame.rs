/// Coalesces recomputation requests to at most one per frame.
///
/// Requesting a frame while one is pending is a no-op, so an event storm
/// between two frames collapses into a single recomputation.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a frame. Returns false when one was already pending.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume whichever frame is pending.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}
