use gloo_timers::callback::Timeout;

use crate::timer::{PendingTask, Scheduler, Task, Timer};

/// Schedules tasks with `setTimeout`.
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> Timer {
        Timer::new(Timeout::new(delay_ms, task))
    }
}

impl PendingTask for Timeout {
    fn cancel(self: Box<Self>) {
        drop(Timeout::cancel(*self));
    }

    /// Called while the timeout's own closure is still running, so the handle
    /// is dropped from a microtask once the callback has returned.
    fn release(self: Box<Self>) {
        wasm_bindgen_futures::spawn_local(async move {
            drop(self);
        });
    }
}
