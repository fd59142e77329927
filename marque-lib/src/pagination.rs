//! Fixed-size, 1-based pagination over a filtered view.
//!
//! Page numbers past the end clamp to the last page instead of erroring, so a
//! view that shrinks under the current page (deletion, narrower filter) heals
//! itself on the next read.

/// One page of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// The page actually returned, after clamping.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    pub fn is_first(&self) -> bool {
        self.number == 1
    }

    pub fn is_last(&self) -> bool {
        self.number == self.total_pages
    }
}

/// Number of pages for `len` items. Always at least 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page number into `1..=total_pages`.
pub fn clamp_page(page_number: usize, len: usize, page_size: usize) -> usize {
    page_number.clamp(1, total_pages(len, page_size))
}

/// Slice `view` to the requested page, clamping out-of-range page numbers.
pub fn page<T>(view: &[T], page_size: usize, page_number: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(view.len(), page_size);
    let number = page_number.clamp(1, total_pages);
    let start = ((number - 1) * page_size).min(view.len());
    let end = (start + page_size).min(view.len());

    Page {
        items: &view[start..end],
        number,
        total_pages,
        total_items: view.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_twenty_items_make_three_pages() {
        let view: Vec<u32> = (0..120).collect();
        assert_eq!(total_pages(view.len(), 50), 3);

        let last = page(&view, 50, 3);
        assert_eq!(last.items.len(), 20);
        assert_eq!(last.items[0], 100);
        assert!(last.is_last());
    }

    #[test]
    fn page_past_end_clamps_to_last() {
        let view: Vec<u32> = (0..120).collect();
        let p = page(&view, 50, 5);
        assert_eq!(p.number, 3);
        assert_eq!(p.items.len(), 20);
    }

    #[test]
    fn page_zero_clamps_to_first() {
        let view: Vec<u32> = (0..10).collect();
        let p = page(&view, 4, 0);
        assert_eq!(p.number, 1);
        assert_eq!(p.items, &[0, 1, 2, 3]);
        assert!(p.is_first());
    }

    #[test]
    fn empty_view_has_one_empty_page() {
        let view: Vec<u32> = Vec::new();
        assert_eq!(total_pages(0, 50), 1);
        let p = page(&view, 50, 2);
        assert_eq!(p.number, 1);
        assert_eq!(p.total_pages, 1);
        assert!(p.items.is_empty());
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        assert_eq!(total_pages(100, 50), 2);
        assert_eq!(total_pages(101, 50), 3);
    }

    #[test]
    fn clamp_page_tracks_shrinking_view() {
        assert_eq!(clamp_page(3, 120, 50), 3);
        assert_eq!(clamp_page(3, 60, 50), 2);
        assert_eq!(clamp_page(3, 0, 50), 1);
    }
}
