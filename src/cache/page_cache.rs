use crate::models::Card;
use std::collections::HashMap;

/// Number of pages needed for `total` items. A total of zero carries no page
/// count, the same as a total that was never reported.
pub fn total_pages(total: u64, page_size: u32) -> Option<u32> {
    if total == 0 {
        return None;
    }
    let pages = total.div_ceil(u64::from(page_size.max(1)));
    Some(u32::try_from(pages).unwrap_or(u32::MAX))
}

/// Cards fetched so far, keyed by 1-based page number.
/// Pages are never evicted; the cache lives as long as the gallery.
#[derive(Debug, Default)]
pub struct PageCache {
    pages: HashMap<u32, Vec<Card>>,
    /// Total card count reported by the first response
    total_count: Option<u64>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached page
    pub fn get(&self, page: u32) -> Option<&[Card]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains_key(&page)
    }

    /// Store a page. Empty pages and page 0 are rejected.
    /// Returns whether the page was stored.
    pub fn insert(&mut self, page: u32, cards: Vec<Card>) -> bool {
        if page == 0 || cards.is_empty() {
            log::debug!("Not caching page {} ({} cards)", page, cards.len());
            return false;
        }
        self.pages.insert(page, cards);
        true
    }

    /// Record the total card count. Only the first reported value is kept.
    pub fn record_total(&mut self, total: u64) {
        if self.total_count.is_none() {
            log::info!("Total card count: {}", total);
            self.total_count = Some(total);
        }
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn total_pages(&self, page_size: u32) -> Option<u32> {
        self.total_count.and_then(|total| total_pages(total, page_size))
    }

    /// Get cached page count
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
