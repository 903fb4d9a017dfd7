pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod gallery;
pub mod loader;
pub mod models;
pub mod ui;

// Re-export commonly used items
pub use api::PokemonTcgClient;
pub use cache::{total_pages, PageCache};
pub use config::GalleryConfig;
pub use error::{ApiError, ApiResult};
pub use gallery::{GalleryState, ModalDismiss, TiltEffect, TiltTransform};
pub use loader::{PageLoader, PageOutcome, PageRequest};
pub use models::{Card, CardPage, EnergyType};
