mod card_grid;
mod card_modal;
mod loading;
mod pagination;

pub use card_grid::CardGrid;
pub use card_modal::CardModal;
pub use loading::LoadingIndicator;
pub(crate) use loading::LOADING_INDICATOR_PNG;
pub use pagination::{PageNav, PaginationBar};

use crate::models::{Card, NEUTRAL_ACCENT};
use eframe::egui::Color32;

/// Border and glow colour for a card, from its primary type
pub(crate) fn accent_color(card: &Card) -> Color32 {
    let [r, g, b] = card
        .energy_type()
        .map(|t| t.rgb())
        .unwrap_or(NEUTRAL_ACCENT);
    Color32::from_rgb(r, g, b)
}
