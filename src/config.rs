//! Runtime configuration for the gallery

use log::{info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.pokemontcg.io/v2";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Upper bound on image downloads running at the same time
pub const DEFAULT_MAX_CONCURRENT_IMAGES: usize = 5;

const API_KEY_VAR: &str = "POKEMON_TCG_API_KEY";
const BASE_URL_VAR: &str = "POKEMON_TCG_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// Sent as `X-Api-Key` when present
    pub api_key: Option<String>,
    pub page_size: u32,
    pub max_concurrent_images: usize,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            page_size: DEFAULT_PAGE_SIZE,
            max_concurrent_images: DEFAULT_MAX_CONCURRENT_IMAGES,
        }
    }
}

impl GalleryConfig {
    /// Read configuration from the environment.
    ///
    /// The API key is taken from `POKEMON_TCG_API_KEY` at runtime, falling back
    /// to the value the binary was built with. `POKEMON_TCG_BASE_URL` overrides
    /// the API root.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup(API_KEY_VAR)
            .or_else(|| option_env!("POKEMON_TCG_API_KEY").map(str::to_string))
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        if api_key.is_none() {
            warn!("{} not set, requests will be rate limited", API_KEY_VAR);
        } else {
            info!("{} found", API_KEY_VAR);
        }

        let base_url = lookup(BASE_URL_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url,
            api_key,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}
