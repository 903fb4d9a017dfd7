use super::accent_color;
use crate::models::Card;
use crate::ui::textures::TextureStore;
use eframe::egui;

pub struct CardGrid;

impl CardGrid {
    const TILE_WIDTH: f32 = 180.0;
    const IMAGE_HEIGHT: f32 = 251.0;
    const TILE_SPACING: f32 = 12.0;

    /// Render the cards of the current page. Returns the id of a clicked card.
    pub fn show(
        ctx: &egui::Context,
        ui: &mut egui::Ui,
        cards: &[Card],
        textures: &mut TextureStore,
    ) -> Option<String> {
        let available_width = ui.available_width();
        let cols = ((available_width / (Self::TILE_WIDTH + Self::TILE_SPACING)).floor() as usize)
            .max(1);

        let mut clicked = None;

        // Render cards in grid rows
        for chunk in cards.chunks(cols) {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = Self::TILE_SPACING;
                for card in chunk {
                    if Self::show_tile(ctx, ui, card, textures) {
                        clicked = Some(card.id.clone());
                    }
                }
            });
            ui.add_space(Self::TILE_SPACING);
        }

        clicked
    }

    fn show_tile(
        ctx: &egui::Context,
        ui: &mut egui::Ui,
        card: &Card,
        textures: &mut TextureStore,
    ) -> bool {
        ui.vertical(|ui| {
            ui.set_width(Self::TILE_WIDTH);

            let (rect, response) = ui.allocate_exact_size(
                egui::vec2(Self::TILE_WIDTH, Self::IMAGE_HEIGHT),
                egui::Sense::click(),
            );
            let accent = accent_color(card);

            match textures.get_or_request(ctx, &card.images.small) {
                Some(texture) => {
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    ui.painter()
                        .image(texture.id(), rect, uv, egui::Color32::WHITE);
                }
                None => {
                    ui.painter().rect_filled(rect, 6.0, egui::Color32::from_gray(45));
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Loading...",
                        egui::FontId::proportional(14.0),
                        egui::Color32::GRAY,
                    );
                }
            }

            let border = if response.hovered() { 3.0 } else { 1.5 };
            ui.painter().add(egui::Shape::closed_line(
                vec![
                    rect.left_top(),
                    rect.right_top(),
                    rect.right_bottom(),
                    rect.left_bottom(),
                ],
                egui::Stroke::new(border, accent),
            ));

            ui.label(egui::RichText::new(&card.name).strong());

            response
                .on_hover_cursor(egui::CursorIcon::PointingHand)
                .clicked()
        })
        .inner
    }
}
