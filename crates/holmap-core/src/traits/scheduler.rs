//! Timer seam for timeline auto-play.

use std::time::Duration;

/// Opaque handle to a scheduled repeating task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(pub u64);

/// Schedules the repeating playback tick.
///
/// The scheduler only books the timer; when it fires, the host calls the
/// timeline engine's tick entry point. Tests inject a fake to drive time
/// deterministically.
pub trait PlaybackScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TaskHandle;

    /// Cancel a task. Cancelling an unknown or finished task is a no-op.
    fn cancel(&mut self, handle: TaskHandle);
}
