//! Admin control over how email A/B test traffic is split between variants.

use async_trait::async_trait;
use uuid::Uuid;

use crate::common::{StoreError, TrafficError, ValidationError};
use crate::models::EmailVariant;

/// Remote owner of the variant records.
#[async_trait]
pub trait VariantStore: Send + Sync {
    /// Variants of one test, oldest first.
    async fn list_variants(
        &self,
        test_name: &str,
    ) -> Result<Vec<EmailVariant>, StoreError>;

    /// Must apply all weights or none.
    async fn update_weights(
        &self,
        weights: &[(Uuid, i32)],
    ) -> Result<(), StoreError>;

    /// Bulk update over `id IN ids`.
    async fn set_auto_selection_paused(
        &self,
        ids: &[Uuid],
        paused: bool,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum CacheKey {
    VariantPerformance,
    AbTestOverview,
}

impl CacheKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VariantPerformance => "variant-performance",
            Self::AbTestOverview => "ab-test-overview",
        }
    }
}

pub trait CacheInvalidator {
    fn invalidate(&self, key: CacheKey, test_name: &str);
}

impl<C: CacheInvalidator + ?Sized> CacheInvalidator for &C {
    fn invalidate(&self, key: CacheKey, test_name: &str) {
        (**self).invalidate(key, test_name);
    }
}

impl<C: CacheInvalidator + ?Sized> CacheInvalidator for std::sync::Arc<C> {
    fn invalidate(&self, key: CacheKey, test_name: &str) {
        (**self).invalidate(key, test_name);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantWeight {
    pub id: Uuid,
    pub label: String,
    /// Last value known to be stored remotely.
    pub committed: u8,
    /// Value shown in the form, not yet saved.
    pub staged: u8,
}

pub const REQUIRED_TOTAL: u32 = 100;

/// Traffic weights of one named test, staged locally and committed as a
/// whole. Remote failures roll the staged weights back to the committed
/// ones, so the view never shows a half-applied change.
#[derive(Debug)]
pub struct TrafficController<S, C> {
    store: S,
    caches: C,
    test_name: String,
    variants: Vec<VariantWeight>,
    auto_selection_paused: bool,
}

impl<S: VariantStore, C: CacheInvalidator> TrafficController<S, C> {
    pub async fn load(
        store: S,
        caches: C,
        test_name: &str,
    ) -> Result<Self, TrafficError> {
        let rows = store.list_variants(test_name).await?;
        if rows.is_empty() {
            return Err(ValidationError::EmptyTest(test_name.to_string()).into());
        }

        let auto_selection_paused = rows.iter().all(|v| v.auto_selection_paused);
        let variants = rows
            .into_iter()
            .map(|v| {
                let weight = v.traffic_weight.clamp(0, 100) as u8;
                VariantWeight {
                    id: v.id,
                    label: v.label,
                    committed: weight,
                    staged: weight,
                }
            })
            .collect();

        Ok(Self {
            store,
            caches,
            test_name: test_name.to_string(),
            variants,
            auto_selection_paused,
        })
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    pub fn variants(&self) -> &[VariantWeight] {
        &self.variants
    }

    pub fn auto_selection_paused(&self) -> bool {
        self.auto_selection_paused
    }

    pub fn total(&self) -> u32 {
        self.variants.iter().map(|v| u32::from(v.staged)).sum()
    }

    pub fn is_valid(&self) -> bool {
        self.total() == REQUIRED_TOTAL
    }

    pub fn is_dirty(&self) -> bool {
        self.variants.iter().any(|v| v.staged != v.committed)
    }

    /// Stage a new percentage for one variant. Values above 100 are clamped.
    pub fn set_weight(
        &mut self,
        variant_id: Uuid,
        percent: u32,
    ) -> Result<(), TrafficError> {
        if !self.auto_selection_paused {
            return Err(TrafficError::Locked);
        }

        let variant = self
            .variants
            .iter_mut()
            .find(|v| v.id == variant_id)
            .ok_or(TrafficError::UnknownVariant(variant_id))?;

        variant.staged = percent.min(REQUIRED_TOTAL) as u8;
        Ok(())
    }

    pub fn discard(&mut self) {
        for v in &mut self.variants {
            v.staged = v.committed;
        }
    }

    pub async fn save(&mut self) -> Result<(), TrafficError> {
        let total = self.total();
        if total != REQUIRED_TOTAL {
            return Err(ValidationError::WeightsSum { total }.into());
        }

        let weights: Vec<(Uuid, i32)> = self
            .variants
            .iter()
            .map(|v| (v.id, i32::from(v.staged)))
            .collect();

        if let Err(e) = self.store.update_weights(&weights).await {
            log::warn!(
                "Saving weights for test {:?} failed, rolling back: {}",
                self.test_name,
                e
            );
            self.discard();
            return Err(e.into());
        }

        for v in &mut self.variants {
            v.committed = v.staged;
        }
        self.invalidate_caches();
        log::info!("Saved traffic weights for test {:?}", self.test_name);

        Ok(())
    }

    /// Flip automatic winner selection for every variant of the test.
    /// Returns the new value.
    pub async fn toggle_pause(&mut self) -> Result<bool, TrafficError> {
        let paused = !self.auto_selection_paused;
        let ids: Vec<Uuid> = self.variants.iter().map(|v| v.id).collect();

        self.store.set_auto_selection_paused(&ids, paused).await?;

        self.auto_selection_paused = paused;
        self.invalidate_caches();
        log::info!(
            "Automatic selection for test {:?} is now {}",
            self.test_name,
            if paused { "paused" } else { "running" }
        );

        Ok(paused)
    }

    fn invalidate_caches(&self) {
        self.caches
            .invalidate(CacheKey::VariantPerformance, &self.test_name);
        self.caches
            .invalidate(CacheKey::AbTestOverview, &self.test_name);
    }
}
