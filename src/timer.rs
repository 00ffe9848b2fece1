use std::fmt;

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Runs `task` once after `delay_ms`, unless the returned [`Timer`] is
    /// cancelled or dropped first.
    fn schedule(&self, delay_ms: u32, task: Task) -> Timer;
}

/// Backend-specific handle to a scheduled task.
pub trait PendingTask {
    fn cancel(self: Box<Self>);
    /// Releases the handle without cancelling. Used from inside the task's own
    /// callback, where cancelling would free the running callback.
    fn release(self: Box<Self>);
}

/// A cancellable pending task. Cancelled on drop.
pub struct Timer {
    pending: Option<Box<dyn PendingTask>>,
}

impl Timer {
    pub fn new(pending: impl PendingTask + 'static) -> Self {
        Self {
            pending: Some(Box::new(pending)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    pub fn release(mut self) {
        if let Some(pending) = self.pending.take() {
            pending.release();
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("pending", &self.pending.is_some())
            .finish()
    }
}
