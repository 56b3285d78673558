use std::fmt;
use std::ops::Range;

/// Page arithmetic for one render. Both inputs are recomputed every time the
/// grid renders, so nothing here is stored between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub items_per_page: usize,
    pub total_items: usize,
}

impl Pagination {
    pub fn new(items_per_page: usize, total_items: usize) -> Self {
        Self {
            items_per_page,
            total_items,
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.items_per_page == 0 {
            return 0;
        }
        self.total_items.div_ceil(self.items_per_page)
    }

    /// Flat content index shown in `slot` of `page`, or `None` for an empty slot.
    pub fn content_index(&self, page: usize, slot: usize) -> Option<usize> {
        if slot >= self.items_per_page {
            return None;
        }
        let idx = page * self.items_per_page + slot;
        (idx < self.total_items).then_some(idx)
    }

    pub fn page_range(&self, page: usize) -> Range<usize> {
        let start = (page * self.items_per_page).min(self.total_items);
        let end = (start + self.items_per_page).min(self.total_items);
        start..end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageState {
    current: usize,
}

impl PageState {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn can_prev(&self, pagination: &Pagination) -> bool {
        pagination.total_pages() > 0 && self.current > 0
    }

    pub fn can_next(&self, pagination: &Pagination) -> bool {
        self.current + 1 < pagination.total_pages()
    }

    pub fn prev(&mut self) -> bool {
        let prev = self.current.saturating_sub(1);
        let changed = prev != self.current;
        self.current = prev;
        changed
    }

    pub fn next(&mut self, pagination: &Pagination) -> bool {
        if !self.can_next(pagination) {
            return false;
        }
        self.current += 1;
        true
    }

    /// Pulls the page back in range after the content shrank.
    pub fn clamp(&mut self, pagination: &Pagination) {
        self.current = self
            .current
            .min(pagination.total_pages().saturating_sub(1));
    }

    pub fn indicator(&self, pagination: &Pagination) -> PageIndicator {
        PageIndicator {
            current: self.current,
            total: pagination.total_pages(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageIndicator {
    pub current: usize,
    pub total: usize,
}

impl fmt::Display for PageIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            write!(f, "0 / 0")
        } else {
            write!(f, "{} / {}", self.current + 1, self.total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_for_48_items() {
        let p = Pagination::new(18, 48);
        assert_eq!(p.total_pages(), 3);
        assert_eq!(p.page_range(2), 36..48);
        assert_eq!(p.content_index(2, 0), Some(36));
        assert_eq!(p.content_index(2, 11), Some(47));
        assert!((12..18).all(|slot| p.content_index(2, slot).is_none()));
    }

    #[test]
    fn test_empty_content_shows_zero_of_zero() {
        let p = Pagination::new(18, 0);
        let page = PageState::default();
        assert_eq!(p.total_pages(), 0);
        assert_eq!(page.indicator(&p).to_string(), "0 / 0");
        assert!(!page.can_prev(&p));
        assert!(!page.can_next(&p));
    }

    #[test]
    fn test_zero_slots_never_divides() {
        let p = Pagination::new(0, 30);
        assert_eq!(p.total_pages(), 0);
        assert_eq!(p.content_index(0, 0), None);
        assert_eq!(p.page_range(3), 0..0);
        let mut page = PageState::default();
        assert!(!page.next(&p));
        assert_eq!(page.indicator(&p).to_string(), "0 / 0");
    }

    #[test]
    fn test_navigation_stops_at_bounds() {
        let p = Pagination::new(18, 48);
        let mut page = PageState::default();
        assert!(!page.prev());
        assert!(page.next(&p));
        assert!(page.next(&p));
        assert!(!page.next(&p));
        assert_eq!(page.current(), 2);
        assert_eq!(page.indicator(&p).to_string(), "3 / 3");
        assert!(page.can_prev(&p));
        assert!(!page.can_next(&p));
        assert!(page.prev());
        assert_eq!(page.current(), 1);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut page = PageState::default();
        page.next(&Pagination::new(10, 40));
        page.next(&Pagination::new(10, 40));
        page.clamp(&Pagination::new(10, 15));
        assert_eq!(page.current(), 1);
        page.clamp(&Pagination::new(10, 0));
        assert_eq!(page.current(), 0);
    }
}
