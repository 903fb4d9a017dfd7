use crate::ui::textures::decode_image;
use eframe::egui;

pub(crate) const LOADING_INDICATOR_PNG: &[u8] = include_bytes!("../../../assets/loading.png");

const INDICATOR_SIZE: f32 = 64.0;

/// Static loading image shown while the current page is in flight
#[derive(Default)]
pub struct LoadingIndicator {
    texture: Option<egui::TextureHandle>,
    decode_failed: bool,
}

impl LoadingIndicator {
    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.texture.is_none() && !self.decode_failed {
            match decode_image(LOADING_INDICATOR_PNG) {
                Ok(color_image) => {
                    self.texture = Some(ui.ctx().load_texture(
                        "loading_indicator",
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                }
                Err(e) => {
                    log::warn!("Failed to decode loading indicator: {}", e);
                    self.decode_failed = true;
                }
            }
        }

        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            match self.texture {
                Some(ref texture) => {
                    ui.image((texture.id(), egui::vec2(INDICATOR_SIZE, INDICATOR_SIZE)));
                }
                None => {
                    ui.spinner();
                }
            }
            ui.label(egui::RichText::new("Loading...").weak());
        });
    }
}
