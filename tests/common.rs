#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use careerpress::common::StoreError;
use careerpress::feedback::{Feedback, FeedbackEvent};
use careerpress::models::EmailVariant;
use careerpress::services::{CacheInvalidator, CacheKey, VariantStore};
use careerpress::windowing::{RefreshError, RefreshHandler};

const SQL_TIME_FMT: &str = "%Y-%m-%d %H:%M:%S%#z";

pub fn parse_time(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_str(s, SQL_TIME_FMT)
        .expect("Invalid time format in test helper")
        .with_timezone(&Utc)
}

pub fn variant_id(n: u8) -> Uuid {
    Uuid::parse_str(&format!("00000000-0000-0000-0000-0000000000{:02x}", n))
        .unwrap()
}

pub fn seed_variant(n: u8, label: &str, weight: i32, paused: bool) -> EmailVariant {
    EmailVariant {
        id: variant_id(n),
        test_name: "welcome-series".to_string(),
        label: label.to_string(),
        subject: format!("Welcome ({label})"),
        traffic_weight: weight,
        auto_selection_paused: paused,
        sends: 200,
        opens: 90,
        clicks: 24,
        created_at: parse_time("2026-01-04 22:15:06+00"),
    }
}

#[derive(Default)]
pub struct FakeStoreInner {
    pub variants: Mutex<Vec<EmailVariant>>,
    pub fail_writes: AtomicBool,
    pub weight_writes: AtomicUsize,
    pub pause_writes: AtomicUsize,
}

/// In-memory variant store. Clones share state so tests can inspect it
/// after handing one to the controller.
#[derive(Clone, Default)]
pub struct FakeStore {
    pub inner: Arc<FakeStoreInner>,
}

impl FakeStore {
    pub fn with_variants(variants: Vec<EmailVariant>) -> Self {
        let store = Self::default();
        *store.inner.variants.lock().unwrap() = variants;
        store
    }

    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn remote_calls(&self) -> usize {
        self.inner.weight_writes.load(Ordering::SeqCst)
            + self.inner.pause_writes.load(Ordering::SeqCst)
    }

    pub fn weight_of(&self, id: Uuid) -> i32 {
        self.inner
            .variants
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.traffic_weight)
            .expect("variant exists")
    }

    pub fn paused_flags(&self) -> Vec<bool> {
        self.inner
            .variants
            .lock()
            .unwrap()
            .iter()
            .map(|v| v.auto_selection_paused)
            .collect()
    }
}

#[async_trait]
impl VariantStore for FakeStore {
    async fn list_variants(
        &self,
        test_name: &str,
    ) -> Result<Vec<EmailVariant>, StoreError> {
        Ok(self
            .inner
            .variants
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.test_name == test_name)
            .cloned()
            .collect())
    }

    async fn update_weights(
        &self,
        weights: &[(Uuid, i32)],
    ) -> Result<(), StoreError> {
        self.inner.weight_writes.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection reset".into()));
        }

        let mut variants = self.inner.variants.lock().unwrap();
        for (id, weight) in weights {
            if let Some(v) = variants.iter_mut().find(|v| v.id == *id) {
                v.traffic_weight = *weight;
            }
        }
        Ok(())
    }

    async fn set_auto_selection_paused(
        &self,
        ids: &[Uuid],
        paused: bool,
    ) -> Result<(), StoreError> {
        self.inner.pause_writes.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection reset".into()));
        }

        let mut variants = self.inner.variants.lock().unwrap();
        for v in variants.iter_mut().filter(|v| ids.contains(&v.id)) {
            v.auto_selection_paused = paused;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingCache {
    pub invalidated: Mutex<Vec<(CacheKey, String)>>,
}

impl CacheInvalidator for RecordingCache {
    fn invalidate(&self, key: CacheKey, test_name: &str) {
        self.invalidated
            .lock()
            .unwrap()
            .push((key, test_name.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingFeedback {
    pub events: Mutex<Vec<FeedbackEvent>>,
}

impl RecordingFeedback {
    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Feedback for RecordingFeedback {
    fn emit(&self, event: FeedbackEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Refresh handler counting its invocations, optionally failing or slow.
#[derive(Clone, Default)]
pub struct CountingRefresh {
    pub calls: Arc<AtomicUsize>,
    pub fail: bool,
    pub delay: Duration,
}

impl CountingRefresh {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RefreshHandler for CountingRefresh {
    async fn refresh(&self) -> Result<(), RefreshError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            Err("course list unavailable".into())
        } else {
            Ok(())
        }
    }
}
