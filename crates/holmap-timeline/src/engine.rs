//! TimelineEngine: window transitions, stepping and auto-play.

use std::collections::BTreeSet;
use std::time::Duration;

use tracing::{debug, info, warn};

use holmap_core::config::TimelineConfig;
use holmap_core::errors::TimelineError;
use holmap_core::models::{TimelineEvent, TimelinePoint, TimelineTransition};
use holmap_core::traits::{PlaybackScheduler, TaskHandle};
use holmap_display::DisplayController;
use holmap_store::FeatureStore;

use crate::points::build_points;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Backward,
    Forward,
}

impl Step {
    fn name(self) -> &'static str {
        match self {
            Self::Backward => "backward",
            Self::Forward => "forward",
        }
    }
}

type Listener = Box<dyn FnMut(&TimelineEvent)>;

/// Drives a [`DisplayController`] through the timeline windows.
///
/// The engine starts disabled, at index 0, with nothing recorded as
/// showing. The controller is passed into each operation rather than
/// held, so one controller can be shared with the rest of the session.
pub struct TimelineEngine {
    points: Vec<TimelinePoint>,
    index: usize,
    last_showing: BTreeSet<usize>,
    play: Option<TaskHandle>,
    scheduler: Box<dyn PlaybackScheduler>,
    enabled: bool,
    pan_zoom: bool,
    interval: Duration,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for TimelineEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineEngine")
            .field("points", &self.points.len())
            .field("index", &self.index)
            .field("enabled", &self.enabled)
            .field("playing", &self.play.is_some())
            .finish_non_exhaustive()
    }
}

impl TimelineEngine {
    pub fn new(
        points: Vec<TimelinePoint>,
        config: &TimelineConfig,
        scheduler: Box<dyn PlaybackScheduler>,
    ) -> Self {
        Self {
            points,
            index: 0,
            last_showing: BTreeSet::new(),
            play: None,
            scheduler,
            enabled: false,
            pan_zoom: config.pan_zoom,
            interval: config.play_interval(),
            listeners: Vec::new(),
        }
    }

    /// Build the engine from the base feature's window list. A store
    /// without one yields an engine with no points.
    pub fn from_store(
        store: &FeatureStore,
        config: &TimelineConfig,
        scheduler: Box<dyn PlaybackScheduler>,
    ) -> Self {
        let points = store
            .raw_timeline()
            .map(|raw| build_points(raw, store))
            .unwrap_or_default();
        Self::new(points, config, scheduler)
    }

    pub fn points(&self) -> &[TimelinePoint] {
        &self.points
    }

    pub fn has_timeline(&self) -> bool {
        !self.points.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_point(&self) -> Option<&TimelinePoint> {
        self.points.get(self.index)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_playing(&self) -> bool {
        self.play.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Features the timeline has made visible as of the current index.
    pub fn last_showing(&self) -> &BTreeSet<usize> {
        &self.last_showing
    }

    pub fn can_step_back(&self) -> bool {
        self.enabled && self.index > 0
    }

    pub fn can_step_forward(&self) -> bool {
        self.enabled && self.index + 1 < self.points.len()
    }

    /// Register a change listener. Every change, and every stop of
    /// playback, is reported.
    pub fn subscribe(&mut self, listener: impl FnMut(&TimelineEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self) {
        let Some(point) = self.points.get(self.index) else {
            return;
        };
        let event = TimelineEvent {
            index: self.index,
            point: point.clone(),
            playing: self.play.is_some(),
        };
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    /// Forget which features the timeline showed, e.g. after the
    /// controller hid everything for a taxonomy switch.
    pub fn forget_showing(&mut self) {
        self.last_showing.clear();
    }

    // -----------------------------------------------------------------------
    // Enable / disable
    // -----------------------------------------------------------------------

    /// Enabling applies the window at the current index. Disabling stops
    /// playback and rewinds to index 0.
    pub fn toggle_timeline(&mut self, ctl: &mut DisplayController, enable: bool) -> bool {
        if enable {
            if !self.has_timeline() {
                warn!("cannot enable an empty timeline");
                return false;
            }
            self.enabled = true;
            if !self.pan_zoom {
                let base = ctl.store().base_index();
                ctl.center_on_features(&[base]);
            }
            self.timeline_change(ctl, self.index)
        } else {
            self.stop(ctl);
            self.enabled = false;
            self.index = 0;
            true
        }
    }

    // -----------------------------------------------------------------------
    // Change
    // -----------------------------------------------------------------------

    pub fn timeline_change(&mut self, ctl: &mut DisplayController, index: usize) -> bool {
        match self.try_timeline_change(ctl, index) {
            Ok(_) => true,
            Err(e) => {
                warn!(index, error = %e, "timeline_change failed");
                false
            }
        }
    }

    /// Move to window `index`, hiding, re-asserting and highlighting
    /// features according to the set difference with the previous window.
    pub fn try_timeline_change(
        &mut self,
        ctl: &mut DisplayController,
        index: usize,
    ) -> Result<TimelineTransition, TimelineError> {
        if !self.enabled {
            return Err(TimelineError::Disabled);
        }
        if self.points.is_empty() {
            return Err(TimelineError::NoTimeline);
        }
        let Some(point) = self.points.get(index) else {
            return Err(TimelineError::IndexOutOfRange {
                index,
                len: self.points.len(),
            });
        };
        let target = point.feat_nums.clone();
        let transition = TimelineTransition::between(&self.last_showing, &target);

        for &feature in &transition.hidden {
            ctl.show_hide_feature(false, feature, None);
        }
        for &feature in &transition.kept {
            ctl.show_hide_feature(true, feature, None);
        }
        for &feature in &transition.shown {
            if ctl.show_hide_feature(true, feature, None) {
                ctl.highlight_feature(feature);
            }
        }

        if self.pan_zoom {
            let visible = transition.visible();
            let worth_fitting = match visible.as_slice() {
                [] => false,
                [only] => !ctl.store().get(*only).is_some_and(|f| f.is_point()),
                _ => true,
            };
            if worth_fitting {
                ctl.center_on_features(&visible);
            }
        }

        self.index = index;
        self.last_showing = target;
        debug!(
            index,
            hidden = transition.hidden.len(),
            kept = transition.kept.len(),
            shown = transition.shown.len(),
            "timeline changed"
        );
        self.emit();
        Ok(transition)
    }

    // -----------------------------------------------------------------------
    // Step
    // -----------------------------------------------------------------------

    pub fn timeline_step(&mut self, ctl: &mut DisplayController, step: Step) -> bool {
        match self.try_timeline_step(ctl, step) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "timeline_step ignored");
                false
            }
        }
    }

    /// Move one window in `step`'s direction, stopping playback first.
    /// Stepping past either end is a no-op.
    pub fn try_timeline_step(
        &mut self,
        ctl: &mut DisplayController,
        step: Step,
    ) -> Result<TimelineTransition, TimelineError> {
        if !self.enabled {
            return Err(TimelineError::Disabled);
        }
        if self.points.is_empty() {
            return Err(TimelineError::NoTimeline);
        }
        let allowed = match step {
            Step::Backward => self.can_step_back(),
            Step::Forward => self.can_step_forward(),
        };
        if !allowed {
            return Err(TimelineError::StepDisabled {
                direction: step.name(),
                index: self.index,
            });
        }
        self.stop(ctl);
        let target = match step {
            Step::Backward => self.index - 1,
            Step::Forward => self.index + 1,
        };
        self.try_timeline_change(ctl, target)
    }

    // -----------------------------------------------------------------------
    // Play
    // -----------------------------------------------------------------------

    pub fn timeline_play(&mut self, ctl: &mut DisplayController) -> bool {
        match self.try_timeline_play(ctl) {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "timeline_play failed");
                false
            }
        }
    }

    /// Toggle auto-play. Returns whether the timeline is now playing.
    pub fn try_timeline_play(&mut self, ctl: &mut DisplayController) -> Result<bool, TimelineError> {
        if self.play.is_some() {
            self.stop(ctl);
            return Ok(false);
        }
        if !self.enabled {
            return Err(TimelineError::Disabled);
        }
        if self.points.is_empty() {
            return Err(TimelineError::NoTimeline);
        }
        let handle = self.scheduler.schedule_repeating(self.interval);
        self.play = Some(handle);
        info!(index = self.index, interval_ms = self.interval.as_millis() as u64, "timeline playing");
        if let Err(e) = self.try_timeline_change(ctl, self.index) {
            self.stop(ctl);
            return Err(e);
        }
        Ok(true)
    }

    /// One tick of the playback timer. Advances by one window; on the
    /// tick after the last window, playback stops. Returns whether the
    /// timeline is still playing.
    pub fn on_tick(&mut self, ctl: &mut DisplayController) -> bool {
        if self.play.is_none() {
            return false;
        }
        if self.index + 1 < self.points.len() {
            let next = self.index + 1;
            if let Err(e) = self.try_timeline_change(ctl, next) {
                warn!(index = next, error = %e, "timeline tick failed");
                self.stop(ctl);
                return false;
            }
            true
        } else {
            self.stop(ctl);
            false
        }
    }

    /// Cancel playback, if any, and return showing features to their
    /// normal style.
    pub fn stop(&mut self, ctl: &mut DisplayController) {
        let Some(handle) = self.play.take() else {
            return;
        };
        self.scheduler.cancel(handle);
        for feature in ctl.showing_features() {
            if ctl.store().get(feature).is_some_and(|f| !f.is_base() && !f.selected()) {
                ctl.apply_display_style(feature);
            }
        }
        info!(index = self.index, "timeline stopped");
        self.emit();
    }

    /// Cancel the timer without touching the display, for when the
    /// display data is about to be discarded.
    pub fn cancel_playback(&mut self) {
        if let Some(handle) = self.play.take() {
            self.scheduler.cancel(handle);
            debug!("timeline playback cancelled");
        }
    }

    /// Swap in the windows of freshly loaded data. The engine goes back
    /// to its starting state: disabled, index 0, nothing showing. No
    /// event is sent, since no window of the new data has been applied.
    pub fn reset(&mut self, points: Vec<TimelinePoint>) {
        self.cancel_playback();
        self.points = points;
        self.index = 0;
        self.last_showing.clear();
        self.enabled = false;
    }
}
