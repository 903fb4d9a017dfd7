//! In-memory caching of fetched card pages

pub mod page_cache;

pub use page_cache::{total_pages, PageCache};
