use crate::cache::total_pages;
use crate::models::Card;
use log::{debug, info};

/// How the open viewer was dismissed. Clicks inside the viewer body never
/// dismiss it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalDismiss {
    /// Click on the dimmed area around the viewer
    Backdrop,
    /// The ✕ button
    CloseButton,
    Escape,
}

/// Pagination and selection state of the gallery
#[derive(Debug)]
pub struct GalleryState {
    /// Current page, 1-based
    page: u32,
    page_size: u32,
    total_count: Option<u64>,
    /// Cards of the last completed load of `page`
    cards: Vec<Card>,
    loading: bool,
    selected: Option<Card>,
}

impl GalleryState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total_count: None,
            cards: Vec::new(),
            loading: false,
            selected: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selected(&self) -> Option<&Card> {
        self.selected.as_ref()
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// Page count, once a non-zero total is known
    pub fn total_pages(&self) -> Option<u32> {
        self.total_count
            .and_then(|total| total_pages(total, self.page_size))
    }

    /// Keep the first reported total. If the current page lies past the end,
    /// it is moved to the last page, which is returned.
    pub fn set_total_count(&mut self, total: Option<u64>) -> Option<u32> {
        if self.total_count.is_some() {
            return None;
        }
        self.total_count = total;
        let last = self.total_pages()?;
        if self.page > last {
            self.page = last;
            return Some(last);
        }
        None
    }

    pub fn title(&self) -> String {
        match self.total_pages() {
            Some(total) => format!("Pokémon Card Gallery: page {} / {}", self.page, total),
            None => format!("Pokémon Card Gallery: page {}", self.page),
        }
    }

    pub fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    /// Unbounded until the total is known
    pub fn can_go_next(&self) -> bool {
        match self.total_pages() {
            Some(total) => self.page < total,
            None => true,
        }
    }

    /// Move back one page. Returns the new page if it changed.
    pub fn prev_page(&mut self) -> Option<u32> {
        if !self.can_go_prev() {
            return None;
        }
        self.page -= 1;
        Some(self.page)
    }

    /// Move forward one page. Returns the new page if it changed.
    pub fn next_page(&mut self) -> Option<u32> {
        if !self.can_go_next() {
            return None;
        }
        self.page += 1;
        Some(self.page)
    }

    /// A request for the current page is in flight
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Show the cards of `page`. Results for any other page are ignored.
    pub fn show_cards(&mut self, page: u32, cards: Vec<Card>) {
        if page != self.page {
            debug!("Ignoring stale result for page {} (showing {})", page, self.page);
            return;
        }
        self.cards = cards;
        self.loading = false;

        let still_listed = self
            .selected
            .as_ref()
            .is_some_and(|sel| self.cards.iter().any(|c| c.id == sel.id));
        if !still_listed {
            self.selected = None;
        }
    }

    /// Loading `page` failed: render it empty
    pub fn fail_load(&mut self, page: u32) {
        self.show_cards(page, Vec::new());
    }

    /// Select a card from the current list. Returns false if it isn't listed.
    pub fn select(&mut self, card_id: &str) -> bool {
        match self.cards.iter().find(|c| c.id == card_id) {
            Some(card) => {
                info!("Selected {} ({})", card.name, card.id);
                self.selected = Some(card.clone());
                true
            }
            None => false,
        }
    }

    /// Close the viewer, clearing the selection
    pub fn dismiss(&mut self, how: ModalDismiss) {
        if let Some(card) = self.selected.take() {
            debug!("Closed viewer for {} ({:?})", card.id, how);
        }
    }
}
