//! Pagination stage. Page size comes from a fixed menu; changing it resets
//! to page 1, and the page number always clamps into the valid range so an
//! out-of-range request yields the last page rather than an empty one.

use std::str::FromStr;

pub const PAGE_SIZE_MENU: [usize; 4] = [10, 25, 50, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(10)
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: usize = s
            .trim()
            .parse()
            .map_err(|_| format!("Invalid page size: {}", s))?;
        if PAGE_SIZE_MENU.contains(&n) {
            Ok(PageSize(n))
        } else {
            Err(format!(
                "Page size must be one of {:?}, got {}",
                PAGE_SIZE_MENU, n
            ))
        }
    }
}

/// One-based pager over an already filtered and sorted collection.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    page: usize,
    size: PageSize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 1,
            size: PageSize::default(),
        }
    }
}

impl Pager {
    pub fn new(size: PageSize) -> Self {
        Self { page: 1, size }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size.as_usize()
    }

    /// A size change always snaps back to the first page.
    pub fn set_size(&mut self, size: PageSize) {
        self.size = size;
        self.page = 1;
    }

    /// Request a page; the stored value clamps into `[1, last]` for a
    /// collection of `total_items`.
    pub fn set_page(&mut self, page: usize, total_items: usize) {
        let last = self.total_pages(total_items);
        self.page = page.clamp(1, last);
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.size.as_usize()).max(1)
    }

    /// The visible slice. Clamps the page again in case the collection
    /// shrank since `set_page`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let size = self.size.as_usize();
        let page = self.page.clamp(1, self.total_pages(items.len()));
        let start = (page - 1) * size;
        let end = (start + size).min(items.len());
        if start >= items.len() {
            &[]
        } else {
            &items[start..end]
        }
    }

    /// 1-based inclusive range of the visible slice, for the
    /// "Showing X-Y of Z" footer. None when the collection is empty.
    pub fn shown_range(&self, total_items: usize) -> Option<(usize, usize)> {
        if total_items == 0 {
            return None;
        }
        let size = self.size.as_usize();
        let page = self.page.clamp(1, self.total_pages(total_items));
        let start = (page - 1) * size + 1;
        let end = (start + size - 1).min(total_items);
        Some((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_menu_enforced() {
        assert_eq!("25".parse::<PageSize>().unwrap().as_usize(), 25);
        assert!("15".parse::<PageSize>().is_err());
        assert!("zero".parse::<PageSize>().is_err());
    }

    #[test]
    fn test_size_change_resets_to_page_one() {
        let items: Vec<u32> = (0..60).collect();
        let mut pager = Pager::default();
        pager.set_page(4, items.len());
        assert_eq!(pager.page(), 4);

        pager.set_size("25".parse().unwrap());
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.slice(&items).len(), 25);
    }

    #[test]
    fn test_out_of_range_page_clamps_to_last() {
        let items: Vec<u32> = (0..35).collect();
        let mut pager = Pager::default();
        pager.set_page(99, items.len());
        assert_eq!(pager.page(), 4);
        // Last page holds the remainder, not nothing
        assert_eq!(pager.slice(&items), &items[30..35]);

        pager.set_page(0, items.len());
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_empty_collection_yields_empty_slice() {
        let items: Vec<u32> = Vec::new();
        let mut pager = Pager::default();
        pager.set_page(3, items.len());
        assert_eq!(pager.page(), 1);
        assert!(pager.slice(&items).is_empty());
        assert_eq!(pager.shown_range(0), None);
    }

    #[test]
    fn test_shown_range_footer() {
        let mut pager = Pager::default();
        pager.set_page(2, 35);
        assert_eq!(pager.shown_range(35), Some((11, 20)));
        pager.set_page(4, 35);
        assert_eq!(pager.shown_range(35), Some((31, 35)));
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let pager = Pager::default();
        assert_eq!(pager.total_pages(0), 1);
        assert_eq!(pager.total_pages(10), 1);
        assert_eq!(pager.total_pages(11), 2);
    }
}
