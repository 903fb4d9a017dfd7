//! Card image textures
//!
//! Images are downloaded on the background runtime and decoded into textures
//! on the UI thread when the channel is polled. Textures stay in memory for
//! the lifetime of the gallery.

use crate::api::PokemonTcgClient;
use crate::error::{ApiError, ApiResult};
use eframe::egui;
use log::{debug, error, info, warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::Semaphore;

/// Message sent from background image loader tasks
pub struct LoadedImage {
    pub url: String,
    pub outcome: ApiResult<Vec<u8>>,
}

/// Decode image bytes into an egui image
pub fn decode_image(bytes: &[u8]) -> ApiResult<egui::ColorImage> {
    let image = image::load_from_memory(bytes)?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}

pub struct TextureStore {
    client: PokemonTcgClient,
    runtime: Handle,
    /// Loaded textures keyed by image URL
    textures: HashMap<String, egui::TextureHandle>,
    /// Images currently being loaded
    loading: HashSet<String>,
    /// Images that failed; not retried
    failed: HashSet<String>,
    sender: UnboundedSender<LoadedImage>,
    receiver: UnboundedReceiver<LoadedImage>,
    /// Limits concurrent image downloads
    request_semaphore: Arc<Semaphore>,
}

impl TextureStore {
    pub fn new(client: PokemonTcgClient, runtime: Handle, max_concurrent: usize) -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            client,
            runtime,
            textures: HashMap::new(),
            loading: HashSet::new(),
            failed: HashSet::new(),
            sender,
            receiver,
            request_semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Texture for `url`, starting a download the first time it is asked for
    pub fn get_or_request(&mut self, ctx: &egui::Context, url: &str) -> Option<egui::TextureHandle> {
        if let Some(texture) = self.textures.get(url) {
            return Some(texture.clone());
        }
        if url.is_empty() || self.loading.contains(url) || self.failed.contains(url) {
            return None;
        }
        self.request(ctx, url);
        None
    }

    /// Poll the channel for downloaded images and create textures (non-blocking)
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok(loaded) = self.receiver.try_recv() {
            self.loading.remove(&loaded.url);

            let decoded = loaded
                .outcome
                .and_then(|bytes| decode_image(&bytes));

            match decoded {
                Ok(color_image) => {
                    let texture = ctx.load_texture(
                        format!("card_{}", loaded.url),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );
                    debug!("Created texture for {}", loaded.url);
                    self.textures.insert(loaded.url, texture);
                }
                Err(ApiError::Image(msg)) => {
                    error!("Failed to decode image {}: {}", loaded.url, msg);
                    self.failed.insert(loaded.url);
                }
                Err(e) => {
                    warn!("Failed to fetch image {}: {}", loaded.url, e);
                    self.failed.insert(loaded.url);
                }
            }
        }

        // Request repaint if still loading images
        if !self.loading.is_empty() {
            ctx.request_repaint();
        }
    }

    /// Spawn a tokio task to download an image
    fn request(&mut self, ctx: &egui::Context, url: &str) {
        info!("Loading image {}", url);
        self.loading.insert(url.to_string());

        let client = self.client.clone();
        let sender = self.sender.clone();
        let semaphore = self.request_semaphore.clone();
        let ctx = ctx.clone();
        let url = url.to_string();

        self.runtime.spawn(async move {
            let Ok(_permit) = semaphore.acquire().await else {
                return;
            };

            let outcome = client.fetch_image(&url).await;
            let _ = sender.send(LoadedImage { url, outcome });
            ctx.request_repaint();
        });
    }
}
