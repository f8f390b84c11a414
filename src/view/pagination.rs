//! Page slicing and the incremental "show more" window.

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_REVEAL_INITIAL: usize = 10;
pub const DEFAULT_REVEAL_INCREMENT: usize = 10;

/// One page of an ordered row set
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub visible: &'a [T],
    pub has_more: bool,
    pub total_pages: usize,
}

/// Number of pages needed for `len` rows; zero rows means zero pages
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Slice `rows` to the requested page. Out-of-range pages are empty.
pub fn paginate<T>(rows: &[T], page_index: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let start = page_index.saturating_mul(page_size).min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());

    Page {
        visible: &rows[start..end],
        has_more: page_index
            .saturating_add(1)
            .saturating_mul(page_size)
            < rows.len(),
        total_pages: total_pages(rows.len(), page_size),
    }
}

/// Current page index and size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page_index: usize,
    page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    /// A zero size is treated as one row per page
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the size and go back to the first page
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 0;
    }

    pub fn page_count(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    /// Pull the index back so the page start stays inside `len` rows
    pub fn clamp(&mut self, len: usize) {
        let last = self.page_count(len).saturating_sub(1);
        if self.page_index > last {
            self.page_index = last;
        }
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, len: usize) -> bool {
        self.page_index + 1 < self.page_count(len)
    }

    pub fn next(&mut self, len: usize) {
        if self.can_next(len) {
            self.page_index += 1;
        }
    }

    pub fn previous(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    pub fn first(&mut self) {
        self.page_index = 0;
    }

    pub fn last(&mut self, len: usize) {
        self.page_index = self.page_count(len).saturating_sub(1);
    }

    pub fn set_page_index(&mut self, page_index: usize, len: usize) {
        self.page_index = page_index;
        self.clamp(len);
    }
}

/// Incremental reveal: a growing prefix of the rows instead of fixed pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealWindow {
    initial: usize,
    increment: usize,
    visible_count: usize,
}

impl Default for RevealWindow {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_INITIAL, DEFAULT_REVEAL_INCREMENT)
    }
}

impl RevealWindow {
    pub fn new(initial: usize, increment: usize) -> Self {
        let initial = initial.max(1);
        Self {
            initial,
            increment: increment.max(1),
            visible_count: initial,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn show_more(&mut self) {
        self.visible_count = self.visible_count.saturating_add(self.increment);
    }

    pub fn reset(&mut self) {
        self.visible_count = self.initial;
    }

    pub fn has_more(&self, len: usize) -> bool {
        self.visible_count < len
    }

    pub fn visible<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[..self.visible_count.min(rows.len())]
    }
}
