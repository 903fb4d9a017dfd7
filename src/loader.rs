//! Page loader
//!
//! Serves pages from the in-memory cache or fetches them on a background
//! tokio runtime. Results come back over a channel that the UI drains once per
//! frame with [`PageLoader::poll`], so all cache mutation happens on the UI
//! thread.

use crate::api::PokemonTcgClient;
use crate::cache::PageCache;
use crate::error::ApiResult;
use crate::models::{Card, CardPage};
use eframe::egui;
use log::{debug, error, info};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// The page the user is looking at; cancelled on navigation
    Primary,
    /// Best-effort load of the following page; only fills the cache
    Prefetch,
}

/// Message sent from background fetch tasks
#[derive(Debug)]
pub struct FetchedPage {
    pub page: u32,
    pub kind: LoadKind,
    pub outcome: ApiResult<CardPage>,
}

/// Result of asking for a page
#[derive(Debug, Clone, PartialEq)]
pub enum PageRequest {
    /// Served from the cache, no request made
    Cached(Vec<Card>),
    /// A request is in flight; its result arrives through [`PageLoader::poll`]
    Pending,
}

/// Outcome of a primary load, as seen by the gallery
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Loaded { page: u32, cards: Vec<Card> },
    Failed { page: u32 },
}

pub struct PageLoader {
    client: PokemonTcgClient,
    runtime: Handle,
    cache: PageCache,
    /// Token of the current primary request
    in_flight: Option<CancellationToken>,
    sender: UnboundedSender<FetchedPage>,
    receiver: UnboundedReceiver<FetchedPage>,
    repaint: Option<egui::Context>,
}

impl PageLoader {
    pub fn new(client: PokemonTcgClient, runtime: Handle) -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            client,
            runtime,
            cache: PageCache::new(),
            in_flight: None,
            sender,
            receiver,
            repaint: None,
        }
    }

    /// Wake the UI when a fetch completes
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    pub fn page_size(&self) -> u32 {
        self.client.page_size()
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.cache.total_pages(self.client.page_size())
    }

    /// Return the cached page, or start fetching it as the primary load.
    /// Any earlier primary request is cancelled first.
    ///
    /// Duplicate requests for the same uncached page are not merged.
    pub fn load_page(&mut self, page: u32) -> PageRequest {
        self.cancel_in_flight();
        if let Some(cards) = self.cache.get(page) {
            info!("Cache hit for page {}", page);
            return PageRequest::Cached(cards.to_vec());
        }

        info!("Cache miss for page {}, fetching", page);
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        self.spawn_fetch(page, LoadKind::Primary, Some(token));
        PageRequest::Pending
    }

    /// Best-effort fetch of a page into the cache. Not tied to navigation.
    pub fn prefetch(&mut self, page: u32) {
        if page == 0 || self.cache.contains(page) {
            return;
        }
        if self.total_pages().is_some_and(|total| page > total) {
            return;
        }
        debug!("Prefetching page {}", page);
        self.spawn_fetch(page, LoadKind::Prefetch, None);
    }

    /// Abandon the current primary request, if any
    pub fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            debug!("Cancelling in-flight page request");
            token.cancel();
        }
    }

    /// Switch to `page`: load it (cancelling the previous primary request) and
    /// prefetch the next one when the total is known.
    pub fn navigate(&mut self, page: u32) -> PageRequest {
        let request = self.load_page(page);
        if self.total_pages().is_some_and(|total| page < total) {
            self.prefetch(page + 1);
        }
        request
    }

    /// Drain completed fetches (non-blocking), updating the cache.
    /// Returns the outcomes of primary loads; aborted loads and prefetches
    /// produce none.
    pub fn poll(&mut self) -> Vec<PageOutcome> {
        let mut outcomes = Vec::new();

        while let Ok(fetched) = self.receiver.try_recv() {
            let FetchedPage {
                page,
                kind,
                outcome,
            } = fetched;

            match outcome {
                Ok(card_page) => {
                    if let Some(total) = card_page.total_count {
                        self.cache.record_total(total);
                    }
                    debug!(
                        "Received page {} ({:?}, {} cards)",
                        page,
                        kind,
                        card_page.data.len()
                    );
                    self.cache.insert(page, card_page.data.clone());
                    if kind == LoadKind::Primary {
                        outcomes.push(PageOutcome::Loaded {
                            page,
                            cards: card_page.data,
                        });
                    }
                }
                Err(e) if e.is_aborted() => {
                    debug!("Load of page {} aborted", page);
                }
                Err(e) => match kind {
                    LoadKind::Primary => {
                        error!("Failed to load page {}: {}", page, e);
                        outcomes.push(PageOutcome::Failed { page });
                    }
                    LoadKind::Prefetch => {
                        debug!("Prefetch of page {} failed: {}", page, e);
                    }
                },
            }
        }

        outcomes
    }

    fn spawn_fetch(&self, page: u32, kind: LoadKind, token: Option<CancellationToken>) {
        let client = self.client.clone();
        let sender = self.sender.clone();
        let repaint = self.repaint.clone();

        self.runtime.spawn(async move {
            let outcome = match token {
                Some(token) => client.fetch_page_cancellable(page, &token).await,
                None => client.fetch_page(page).await,
            };

            // Receiver is gone once the gallery has been dropped
            let _ = sender.send(FetchedPage {
                page,
                kind,
                outcome,
            });

            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }
}

impl Drop for PageLoader {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
