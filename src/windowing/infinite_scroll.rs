//! Mobile infinite scroll: a reveal window that grows one page at a time.

use std::time::Duration;

use crate::common::WindowError;

use super::viewport::{Intersection, SentinelGuard, SentinelId, ViewportObserver};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    pub items_per_page: usize,
    /// Pause between entering the loading state and revealing the page.
    pub settle_delay: Duration,
    /// How far below the viewport the sentinel starts counting as visible.
    pub root_margin: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            items_per_page: 12,
            settle_delay: Duration::from_millis(500),
            root_margin: 200.0,
        }
    }
}

/// Proof that a load was started; handed back to [`InfiniteScroll::complete_load`].
#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Idle/Loading state machine over an owned item list.
///
/// Displayed items are the first `page_count * items_per_page` items. The
/// page count only grows within a session; `reset` and `set_items` start a
/// new session and invalidate any load still in flight.
#[derive(Debug)]
pub struct InfiniteScroll<T> {
    items: Vec<T>,
    config: ScrollConfig,
    enabled: bool,
    page_count: usize,
    is_loading_more: bool,
    generation: u64,
}

impl<T> InfiniteScroll<T> {
    pub fn new(
        items: Vec<T>,
        config: ScrollConfig,
    ) -> Result<Self, WindowError> {
        if config.items_per_page == 0 {
            return Err(WindowError::ZeroPageSize);
        }

        Ok(Self {
            items,
            config,
            enabled: true,
            page_count: 1,
            is_loading_more: false,
            generation: 0,
        })
    }

    /// Rebuild a window that already shows `pages` pages, e.g. from a
    /// request that carries how far the visitor has scrolled.
    pub fn resume(
        items: Vec<T>,
        config: ScrollConfig,
        pages: usize,
    ) -> Result<Self, WindowError> {
        let mut scroll = Self::new(items, config)?;
        let max_pages = scroll.items.len().div_ceil(config.items_per_page).max(1);
        scroll.page_count = pages.clamp(1, max_pages);
        Ok(scroll)
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn total_displayed(&self) -> usize {
        (self.page_count * self.config.items_per_page).min(self.items.len())
    }

    pub fn displayed_items(&self) -> &[T] {
        &self.items[..self.total_displayed()]
    }

    /// Items revealed by the most recent page.
    pub fn last_page_items(&self) -> &[T] {
        let end = self.total_displayed();
        let start = ((self.page_count - 1) * self.config.items_per_page).min(end);
        &self.items[start..end]
    }

    pub fn has_more(&self) -> bool {
        self.total_displayed() < self.items.len()
    }

    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    fn can_load(&self) -> bool {
        self.enabled && self.has_more() && !self.is_loading_more
    }

    /// Idle → Loading. Returns `None` when disabled, exhausted or already
    /// loading.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if !self.can_load() {
            return None;
        }

        self.is_loading_more = true;
        Some(LoadTicket {
            generation: self.generation,
        })
    }

    /// Loading → Idle, revealing one more page. A ticket from before the
    /// last reset is ignored.
    pub fn complete_load(&mut self, ticket: LoadTicket) -> bool {
        if ticket.generation != self.generation || !self.is_loading_more {
            return false;
        }

        self.page_count += 1;
        self.is_loading_more = false;
        true
    }

    pub async fn load_more(&mut self) -> bool {
        let Some(ticket) = self.begin_load() else {
            return false;
        };

        if !self.config.settle_delay.is_zero() {
            tokio::time::sleep(self.config.settle_delay).await;
        }

        self.complete_load(ticket)
    }

    /// Sentinel signal from the viewport observer.
    pub fn handle_intersection(
        &mut self,
        signal: Intersection,
    ) -> Option<LoadTicket> {
        if signal.is_intersecting {
            self.begin_load()
        } else {
            None
        }
    }

    /// Observe `sentinel` while there is something left to load.
    pub fn observe<'o>(
        &self,
        observer: &'o dyn ViewportObserver,
        sentinel: SentinelId,
    ) -> Option<SentinelGuard<'o>> {
        if self.enabled && self.has_more() {
            Some(SentinelGuard::new(observer, sentinel, self.config.root_margin))
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.page_count = 1;
        self.is_loading_more = false;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Swap in a freshly fetched list; always starts a new session.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll(n: usize, per_page: usize) -> InfiniteScroll<usize> {
        let config = ScrollConfig {
            items_per_page: per_page,
            settle_delay: Duration::ZERO,
            ..ScrollConfig::default()
        };
        InfiniteScroll::new((0..n).collect(), config).unwrap()
    }

    #[test]
    fn rejects_zero_page_size() {
        let config = ScrollConfig {
            items_per_page: 0,
            ..ScrollConfig::default()
        };
        assert_eq!(
            InfiniteScroll::new(vec![1], config).err(),
            Some(WindowError::ZeroPageSize)
        );
    }

    #[test]
    fn only_one_load_in_flight() {
        let mut s = scroll(30, 10);
        let ticket = s.begin_load().expect("first load starts");
        assert!(s.is_loading_more());
        assert!(s.begin_load().is_none());

        assert!(s.complete_load(ticket));
        assert_eq!(s.total_displayed(), 20);
        assert!(!s.is_loading_more());
    }

    #[test]
    fn completion_after_reset_is_ignored() {
        let mut s = scroll(30, 10);
        let ticket = s.begin_load().unwrap();
        s.reset();

        assert!(!s.complete_load(ticket));
        assert_eq!(s.total_displayed(), 10);
        assert!(!s.is_loading_more());
    }

    #[test]
    fn disabled_accumulator_never_loads() {
        let mut s = scroll(30, 10);
        s.set_enabled(false);
        assert!(s.begin_load().is_none());
        assert!(s
            .handle_intersection(Intersection {
                is_intersecting: true,
                distance: 0.0
            })
            .is_none());
    }

    #[test]
    fn resume_clamps_page_count() {
        let config = ScrollConfig {
            items_per_page: 12,
            ..ScrollConfig::default()
        };
        let s = InfiniteScroll::resume((0..25).collect::<Vec<_>>(), config, 9).unwrap();
        assert_eq!(s.page_count(), 3);
        assert_eq!(s.last_page_items(), &[24]);
        assert!(!s.has_more());

        let s = InfiniteScroll::resume(Vec::<u8>::new(), config, 0).unwrap();
        assert_eq!(s.page_count(), 1);
        assert!(s.last_page_items().is_empty());
    }

    #[test]
    fn set_items_starts_a_new_session() {
        let mut s = scroll(30, 10);
        let ticket = s.begin_load().unwrap();
        assert!(s.complete_load(ticket));
        assert_eq!(s.total_displayed(), 20);

        s.set_items((0..5).collect());
        assert_eq!(s.total_displayed(), 5);
        assert!(!s.has_more());
    }
}
