//! Playback scheduling: a deterministic scheduler for hosts and tests
//! that advance time themselves, and a tokio interval driver.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::debug;

use holmap_core::traits::{PlaybackScheduler, TaskHandle};
use holmap_display::DisplayController;

use crate::engine::TimelineEngine;

#[derive(Debug, Default)]
struct Tasks {
    next: u64,
    active: BTreeMap<TaskHandle, Duration>,
    cancelled: Vec<TaskHandle>,
}

/// Records scheduled and cancelled tasks without running any timer.
/// Clones share state, so a test can keep one and hand another to the
/// engine.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    tasks: Rc<RefCell<Tasks>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Vec<(TaskHandle, Duration)> {
        self.tasks
            .borrow()
            .active
            .iter()
            .map(|(h, d)| (*h, *d))
            .collect()
    }

    pub fn is_active(&self, handle: TaskHandle) -> bool {
        self.tasks.borrow().active.contains_key(&handle)
    }

    pub fn cancelled(&self) -> Vec<TaskHandle> {
        self.tasks.borrow().cancelled.clone()
    }

    pub fn scheduled_count(&self) -> u64 {
        self.tasks.borrow().next
    }
}

impl PlaybackScheduler for ManualScheduler {
    fn schedule_repeating(&mut self, period: Duration) -> TaskHandle {
        let mut tasks = self.tasks.borrow_mut();
        let handle = TaskHandle(tasks.next);
        tasks.next += 1;
        tasks.active.insert(handle, period);
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        let mut tasks = self.tasks.borrow_mut();
        if tasks.active.remove(&handle).is_some() {
            tasks.cancelled.push(handle);
        }
    }
}

/// Tick `engine` on a tokio interval until playback stops. The first
/// tick fires one full period after the call, matching a repeating
/// timer. Returns the number of ticks delivered.
///
/// Runs on the current task; the engine and controller are not `Send`.
pub async fn drive_playback(engine: &mut TimelineEngine, ctl: &mut DisplayController) -> usize {
    let period = engine.interval().max(Duration::from_millis(1));
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks = 0;
    while engine.is_playing() {
        ticker.tick().await;
        engine.on_tick(ctl);
        ticks += 1;
    }
    debug!(ticks, "playback driver finished");
    ticks
}
