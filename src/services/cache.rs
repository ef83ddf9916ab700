use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use crate::models::{TestSummary, VariantPerformance};

use super::{CacheInvalidator, CacheKey};

/// In-process cache of the admin read-views over variant records.
#[derive(Debug, Default)]
pub struct PerformanceCache {
    performance: Mutex<HashMap<String, Vec<VariantPerformance>>>,
    overview: Mutex<Option<Vec<TestSummary>>>,
}

impl PerformanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn performance(&self, test_name: &str) -> Option<Vec<VariantPerformance>> {
        self.performance
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(test_name)
            .cloned()
    }

    pub fn store_performance(&self, test_name: &str, rows: Vec<VariantPerformance>) {
        self.performance
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(test_name.to_string(), rows);
    }

    pub fn overview(&self) -> Option<Vec<TestSummary>> {
        self.overview
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn store_overview(&self, rows: Vec<TestSummary>) {
        *self
            .overview
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(rows);
    }

    /// Cached overview, or whatever `load` returns. Only a successful load is
    /// stored.
    pub async fn overview_or_load<E, Fut>(
        &self,
        load: impl FnOnce() -> Fut,
    ) -> Result<Vec<TestSummary>, E>
    where
        Fut: Future<Output = Result<Vec<TestSummary>, E>>,
    {
        if let Some(rows) = self.overview() {
            return Ok(rows);
        }

        let rows = load().await?;
        self.store_overview(rows.clone());
        Ok(rows)
    }
}

impl CacheInvalidator for PerformanceCache {
    fn invalidate(&self, key: CacheKey, test_name: &str) {
        log::debug!("Invalidating {} cache for {:?}", key.as_str(), test_name);
        match key {
            CacheKey::VariantPerformance => {
                self.performance
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .remove(test_name);
            }
            CacheKey::AbTestOverview => {
                *self
                    .overview
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
            }
        }
    }
}
