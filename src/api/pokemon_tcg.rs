use crate::config::GalleryConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::CardPage;
use tokio_util::sync::CancellationToken;

const USER_AGENT: &str = "pokedex-gallery/0.1";
const API_KEY_HEADER: &str = "X-Api-Key";

/// Client for the card search endpoint and card image hosts.
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PokemonTcgClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    page_size: u32,
}

impl PokemonTcgClient {
    pub fn new(config: &GalleryConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        })
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Search URL for one page of cards
    pub fn page_url(&self, page: u32) -> String {
        format!(
            "{}/cards?pageSize={}&page={}",
            self.base_url, self.page_size, page
        )
    }

    /// Fetch one page of cards
    pub async fn fetch_page(&self, page: u32) -> ApiResult<CardPage> {
        let url = self.page_url(page);
        log::info!("Fetching card page {} from {}", page, url);

        let mut request = self.http.get(&url);
        if let Some(ref key) = self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch one page of cards, giving up with [`ApiError::Aborted`] as soon as
    /// `token` is cancelled.
    pub async fn fetch_page_cancellable(
        &self,
        page: u32,
        token: &CancellationToken,
    ) -> ApiResult<CardPage> {
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(ApiError::Aborted),
            result = self.fetch_page(page) => result,
        }
    }

    /// Fetch card image bytes
    pub async fn fetch_image(&self, url: &str) -> ApiResult<Vec<u8>> {
        log::debug!("Fetching image: {}", url);

        let response = self.http.get(url).send().await?;
        if response.status().is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            Err(ApiError::HttpStatus(response.status()))
        }
    }
}

#[cfg(test)]
#[path = "pokemon_tcg_tests.rs"]
mod tests;
