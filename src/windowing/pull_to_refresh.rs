//! Pull-to-refresh gesture recognizer.

use async_trait::async_trait;

use crate::common::WindowError;
use crate::feedback::{Feedback, FeedbackEvent};

use super::viewport::{ListenerGuard, TouchTarget};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullConfig {
    /// Damped distance at which releasing triggers a refresh.
    pub threshold: f64,
    /// Raw finger travel is divided by this before it becomes pull distance.
    pub resistance: f64,
    /// Raw travel below which native scrolling is left alone, so taps still work.
    pub jitter_guard: f64,
    /// Pull distance never exceeds `threshold * max_pull_factor`.
    pub max_pull_factor: f64,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            threshold: 80.0,
            resistance: 2.5,
            jitter_guard: 10.0,
            max_pull_factor: 1.5,
        }
    }
}

impl PullConfig {
    /// Default guard and cap with the given threshold and resistance. Both
    /// must be finite and positive.
    pub fn new(threshold: f64, resistance: f64) -> Result<Self, WindowError> {
        if !is_positive(threshold) {
            return Err(WindowError::InvalidPullSetting("threshold"));
        }
        if !is_positive(resistance) {
            return Err(WindowError::InvalidPullSetting("resistance"));
        }
        Ok(Self {
            threshold,
            resistance,
            ..Self::default()
        })
    }

    pub fn max_pull(&self) -> f64 {
        self.threshold * self.max_pull_factor
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

pub type RefreshError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait RefreshHandler {
    async fn refresh(&self) -> Result<(), RefreshError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PullPhase {
    Inactive,
    Pulling { start_y: f64 },
    Refreshing,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MoveResponse {
    /// The host must cancel native scrolling for this move event.
    pub prevent_default: bool,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GestureOutcome {
    Refreshed,
    RefreshFailed,
    /// Released below the threshold. Not an error.
    Aborted,
    /// No gesture was in progress.
    Ignored,
}

pub struct PullToRefresh<H, F> {
    handler: H,
    feedback: F,
    config: PullConfig,
    phase: PullPhase,
    pull_distance: f64,
    threshold_signalled: bool,
}

impl<H: RefreshHandler, F: Feedback> PullToRefresh<H, F> {
    pub fn new(handler: H, feedback: F, config: PullConfig) -> Self {
        Self {
            handler,
            feedback,
            config,
            phase: PullPhase::Inactive,
            pull_distance: 0.0,
            threshold_signalled: false,
        }
    }

    pub fn pull_distance(&self) -> f64 {
        self.pull_distance
    }

    pub fn is_refreshing(&self) -> bool {
        self.phase == PullPhase::Refreshing
    }

    pub fn is_at_threshold(&self) -> bool {
        self.pull_distance >= self.config.threshold
    }

    pub fn is_pulling(&self) -> bool {
        matches!(self.phase, PullPhase::Pulling { .. })
    }

    /// Fraction of the threshold covered, for drawing the indicator.
    pub fn progress(&self) -> f64 {
        (self.pull_distance / self.config.threshold).min(1.0)
    }

    pub fn attach<'t>(&self, target: &'t dyn TouchTarget) -> ListenerGuard<'t> {
        ListenerGuard::attach(target)
    }

    pub fn touch_start(&mut self, y: f64, scroll_y: f64) {
        if self.is_refreshing() {
            return;
        }

        self.pull_distance = 0.0;
        self.threshold_signalled = false;
        self.phase = if scroll_y <= 0.0 {
            PullPhase::Pulling { start_y: y }
        } else {
            PullPhase::Inactive
        };
    }

    pub fn touch_move(&mut self, y: f64, scroll_y: f64) -> MoveResponse {
        let PullPhase::Pulling { start_y } = self.phase else {
            return MoveResponse {
                prevent_default: false,
            };
        };

        let delta = y - start_y;
        if scroll_y > 0.0 || delta <= 0.0 {
            return MoveResponse {
                prevent_default: false,
            };
        }

        self.pull_distance = (delta / self.config.resistance)
            .min(self.config.max_pull())
            .max(0.0);

        if self.is_at_threshold() && !self.threshold_signalled {
            self.threshold_signalled = true;
            self.feedback.emit(FeedbackEvent::Medium);
        }

        MoveResponse {
            prevent_default: delta > self.config.jitter_guard,
        }
    }

    pub async fn touch_end(&mut self) -> GestureOutcome {
        if !self.is_pulling() {
            return GestureOutcome::Ignored;
        }

        if !self.is_at_threshold() {
            self.phase = PullPhase::Inactive;
            self.pull_distance = 0.0;
            return GestureOutcome::Aborted;
        }

        self.phase = PullPhase::Refreshing;
        self.feedback.emit(FeedbackEvent::Short);

        // Also runs when this future is dropped before the handler finishes.
        let _reset = GestureReset {
            phase: &mut self.phase,
            pull_distance: &mut self.pull_distance,
            threshold_signalled: &mut self.threshold_signalled,
        };

        match self.handler.refresh().await {
            Ok(()) => {
                self.feedback.emit(FeedbackEvent::Success);
                GestureOutcome::Refreshed
            }
            Err(e) => {
                log::error!("Pull-to-refresh failed: {}", e);
                self.feedback.emit(FeedbackEvent::Error);
                GestureOutcome::RefreshFailed
            }
        }
    }
}

/// Returns the recognizer to `Inactive` when dropped.
struct GestureReset<'a> {
    phase: &'a mut PullPhase,
    pull_distance: &'a mut f64,
    threshold_signalled: &'a mut bool,
}

impl Drop for GestureReset<'_> {
    fn drop(&mut self) {
        *self.phase = PullPhase::Inactive;
        *self.pull_distance = 0.0;
        *self.threshold_signalled = false;
    }
}

impl<H, F> std::fmt::Debug for PullToRefresh<H, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PullToRefresh")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("pull_distance", &self.pull_distance)
            .finish()
    }
}
