use crate::traits::FrameHandle;

/// Bookkeeping for one-shot frame requests. While the output is hidden a
/// request is parked: it stays pending but does not wake the event loop, so
/// an occluded window does not spin through skipped ticks.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_handle: u64,
    pending: Option<FrameHandle>,
    parked: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new request, replacing any older one. The flag says
    /// whether the caller should wake the event loop for it now.
    pub fn request(&mut self, hidden: bool) -> (FrameHandle, bool) {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending = Some(handle);
        self.parked = hidden;
        (handle, !hidden)
    }

    pub fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.parked = false;
        }
    }

    /// Consumes the outstanding request for delivery
    pub fn take(&mut self) -> Option<FrameHandle> {
        self.parked = false;
        self.pending.take()
    }

    /// Output became visible again; true when a pending request needs a
    /// wake-up (a parked one, or one the platform may have dropped).
    pub fn resume(&mut self) -> bool {
        self.parked = false;
        self.pending.is_some()
    }

    pub fn is_parked(&self) -> bool {
        self.parked && self.pending.is_some()
    }
}
