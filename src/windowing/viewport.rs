//! Host-side primitives the windowing components attach to: viewport
//! intersection for sentinels and touch listeners for pull gestures.
//!
//! Registration hands back a guard; dropping the guard detaches. Owners keep
//! the guard for as long as they are mounted.

use std::fmt;

/// Identifies a sentinel element placed after the last displayed item.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct SentinelId(pub String);

impl fmt::Display for SentinelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SentinelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Result of testing a sentinel against a viewport grown by `root_margin`
/// on its bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub is_intersecting: bool,
    /// Distance from the sentinel to the expanded viewport edge, zero when
    /// intersecting.
    pub distance: f64,
}

impl Intersection {
    pub fn evaluate(
        sentinel_top: f64,
        viewport_top: f64,
        viewport_height: f64,
        root_margin: f64,
    ) -> Self {
        let expanded_bottom = viewport_top + viewport_height + root_margin.max(0.0);
        let expanded_top = viewport_top - root_margin.max(0.0);

        if sentinel_top > expanded_bottom {
            Self {
                is_intersecting: false,
                distance: sentinel_top - expanded_bottom,
            }
        } else if sentinel_top < expanded_top {
            Self {
                is_intersecting: false,
                distance: expanded_top - sentinel_top,
            }
        } else {
            Self {
                is_intersecting: true,
                distance: 0.0,
            }
        }
    }
}

pub trait ViewportObserver {
    fn observe(&self, sentinel: &SentinelId, root_margin: f64);
    fn unobserve(&self, sentinel: &SentinelId);
}

/// Keeps a sentinel observed until dropped.
pub struct SentinelGuard<'o> {
    observer: &'o dyn ViewportObserver,
    sentinel: SentinelId,
}

impl<'o> SentinelGuard<'o> {
    pub fn new(
        observer: &'o dyn ViewportObserver,
        sentinel: SentinelId,
        root_margin: f64,
    ) -> Self {
        observer.observe(&sentinel, root_margin);
        Self { observer, sentinel }
    }

    pub fn sentinel(&self) -> &SentinelId {
        &self.sentinel
    }
}

impl Drop for SentinelGuard<'_> {
    fn drop(&mut self) {
        self.observer.unobserve(&self.sentinel);
    }
}

impl fmt::Debug for SentinelGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentinelGuard")
            .field("sentinel", &self.sentinel)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum TouchEventKind {
    Start,
    Move,
    End,
}

impl TouchEventKind {
    /// Only `Move` needs to cancel the native scroll, so only it is
    /// registered as non-passive.
    pub fn is_passive(&self) -> bool {
        !matches!(self, Self::Move)
    }
}

pub trait TouchTarget {
    fn add_listener(&self, kind: TouchEventKind, passive: bool);
    fn remove_listener(&self, kind: TouchEventKind);
}

/// Keeps the three touch listeners attached until dropped.
pub struct ListenerGuard<'t> {
    target: &'t dyn TouchTarget,
}

const TOUCH_EVENTS: [TouchEventKind; 3] = [
    TouchEventKind::Start,
    TouchEventKind::Move,
    TouchEventKind::End,
];

impl<'t> ListenerGuard<'t> {
    pub fn attach(target: &'t dyn TouchTarget) -> Self {
        for kind in TOUCH_EVENTS {
            target.add_listener(kind, kind.is_passive());
        }
        Self { target }
    }
}

impl Drop for ListenerGuard<'_> {
    fn drop(&mut self) {
        for kind in TOUCH_EVENTS {
            self.target.remove_listener(kind);
        }
    }
}

impl fmt::Debug for ListenerGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ListenerGuard")
    }
}
