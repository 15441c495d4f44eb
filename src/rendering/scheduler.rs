use crate::prelude::{Cell, Rc};

/// Pending-frame flag shared between a layer and the callbacks it installs.
///
/// Any number of requests made before the next animation frame collapse into
/// a single pending repaint. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: Rc<Cell<bool>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a repaint on the next frame. Returns `true` if this call
    /// scheduled it, `false` if one was already pending.
    pub fn request(&self) -> bool {
        !self.pending.replace(true)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Consume the pending request, if any
    pub fn take(&self) -> bool {
        self.pending.replace(false)
    }

    /// Drop a pending request without running it
    pub fn cancel(&self) {
        self.pending.set(false);
    }
}
