//! Fire-and-forget feedback channel (haptics on touch devices, toasts in the
//! admin area). Emitting never fails and never blocks the caller.

use std::sync::Mutex;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackEvent {
    Short,
    Medium,
    Success,
    Error,
}

impl FeedbackEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

pub trait Feedback {
    fn emit(&self, event: FeedbackEvent);
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFeedback;

impl Feedback for NoFeedback {
    fn emit(&self, _event: FeedbackEvent) {}
}

/// Writes events to the log at `debug` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFeedback;

impl Feedback for LogFeedback {
    fn emit(&self, event: FeedbackEvent) {
        log::debug!("feedback: {}", event.as_str());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub kind: FeedbackEvent,
    pub message: String,
}

/// Collects transient notifications until a page renders and drains them.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, kind: FeedbackEvent, message: impl Into<String>) {
        let mut toasts = self
            .toasts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        toasts.push(Toast {
            kind,
            message: message.into(),
        });
    }

    pub fn drain(&self) -> Vec<Toast> {
        let mut toasts = self
            .toasts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::take(&mut *toasts)
    }

    pub fn len(&self) -> usize {
        self.toasts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Feedback for ToastQueue {
    fn emit(&self, event: FeedbackEvent) {
        let message = match event {
            FeedbackEvent::Short | FeedbackEvent::Medium => return,
            FeedbackEvent::Success => "Saved",
            FeedbackEvent::Error => "Something went wrong, please try again",
        };
        self.push(event, message);
    }
}

impl<F: Feedback + ?Sized> Feedback for &F {
    fn emit(&self, event: FeedbackEvent) {
        (**self).emit(event);
    }
}

impl<F: Feedback + ?Sized> Feedback for std::sync::Arc<F> {
    fn emit(&self, event: FeedbackEvent) {
        (**self).emit(event);
    }
}
