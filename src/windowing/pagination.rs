//! Desktop pagination over an in-memory list.

use std::fmt;

use crate::common::WindowError;

type PageHook<'a> = Box<dyn FnMut(usize) + 'a>;

/// Fixed-size page window over a borrowed slice.
///
/// Out-of-range navigation is clamped, never rejected. `current_page` is
/// always in `1..=total_pages()`, or `1` when the list is empty.
pub struct Paginator<'a, T> {
    items: &'a [T],
    items_per_page: usize,
    current_page: usize,
    on_page_change: Option<PageHook<'a>>,
}

impl<'a, T> Paginator<'a, T> {
    pub fn new(
        items: &'a [T],
        items_per_page: usize,
    ) -> Result<Self, WindowError> {
        if items_per_page == 0 {
            return Err(WindowError::ZeroPageSize);
        }

        Ok(Self {
            items,
            items_per_page,
            current_page: 1,
            on_page_change: None,
        })
    }

    /// Hook run after every `go_to_page`, typically scrolling the view back
    /// to the top. Receives the page that was landed on.
    pub fn on_page_change(mut self, hook: impl FnMut(usize) + 'a) -> Self {
        self.on_page_change = Some(Box::new(hook));
        self
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.items_per_page)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn current_items(&self) -> &'a [T] {
        let start = (self.current_page - 1) * self.items_per_page;
        let end = (start + self.items_per_page).min(self.items.len());
        self.items.get(start..end).unwrap_or(&[])
    }

    /// 1-based index of the first item on the current page.
    pub fn start_index(&self) -> usize {
        (self.current_page - 1) * self.items_per_page + 1
    }

    /// 1-based index of the last item on the current page.
    pub fn end_index(&self) -> usize {
        (self.current_page * self.items_per_page).min(self.total_items())
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    fn clamp(&self, page: i64) -> usize {
        let last = self.total_pages().max(1) as i64;
        page.clamp(1, last) as usize
    }

    pub fn go_to_page(&mut self, page: i64) -> usize {
        self.current_page = self.clamp(page);

        if let Some(hook) = self.on_page_change.as_mut() {
            hook(self.current_page);
        }

        self.current_page
    }

    /// Clamps at the last page; the page-change hook still runs.
    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.current_page as i64 + 1)
    }

    /// Clamps at the first page; the page-change hook still runs.
    pub fn previous_page(&mut self) -> usize {
        self.go_to_page(self.current_page as i64 - 1)
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages()).collect()
    }
}

impl<T> fmt::Debug for Paginator<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("total_items", &self.total_items())
            .field("items_per_page", &self.items_per_page)
            .field("current_page", &self.current_page)
            .finish()
    }
}
