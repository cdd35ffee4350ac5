/// Single-slot pending-render scheduler.
///
/// Gesture updates call [`RenderScheduler::schedule`]; the host calls
/// [`RenderScheduler::take`] from its display-refresh callback, or [`RenderScheduler::flush`] when a
/// gesture ends and the transform must land synchronously.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderScheduler {
    pending: bool,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a render as pending. Returns `true` only when this call created the pending slot, which
    /// is when the host must request a frame callback.
    pub fn schedule(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    /// Consume the pending slot from a frame callback. Returns `true` when a render is due.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Cancel the pending frame so the caller can render synchronously. Returns `true` when a
    /// render was pending.
    pub fn flush(&mut self) -> bool {
        self.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gesture/scheduler.rs"]
mod tests;
