//! Enlarged card viewer
//!
//! The large image is painted as a textured quad whose corners are projected
//! through the current [`crate::gallery::TiltTransform`], so the card leans towards the
//! pointer while it moves over the viewer.

use super::accent_color;
use crate::gallery::{ModalDismiss, TiltEffect};
use crate::models::Card;
use crate::ui::textures::TextureStore;
use eframe::egui::epaint::{Mesh, Vertex};
use eframe::egui::{self, Color32, Pos2, Shape, Stroke};

pub struct CardModal;

impl CardModal {
    // Large card scans are 734x1024
    const IMAGE_WIDTH: f32 = 367.0;
    const IMAGE_HEIGHT: f32 = 512.0;
    /// Room around the image for the tilted corners and glow
    const TILT_MARGIN: f32 = 36.0;

    /// Show the viewer for `card`. Returns how it was dismissed this frame, if
    /// it was.
    pub fn show(
        ctx: &egui::Context,
        card: &Card,
        textures: &mut TextureStore,
        tilt: &mut TiltEffect,
    ) -> Option<ModalDismiss> {
        let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));

        let modal = egui::Modal::new(egui::Id::new("card_viewer")).show(ctx, |ui| {
            let mut dismissed = None;

            ui.horizontal(|ui| {
                ui.heading(&card.name);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✕").clicked() {
                        dismissed = Some(ModalDismiss::CloseButton);
                    }
                });
            });

            let (slot, _) = ui.allocate_exact_size(
                egui::vec2(
                    Self::IMAGE_WIDTH + 2.0 * Self::TILT_MARGIN,
                    Self::IMAGE_HEIGHT + 2.0 * Self::TILT_MARGIN,
                ),
                egui::Sense::hover(),
            );
            let image_rect = slot.shrink(Self::TILT_MARGIN);

            // The whole viewer is the hover area; its bounds are only known
            // after the first frame, until then the image slot stands in.
            let pointer = ui.input(|i| i.pointer.hover_pos());
            let area = tilt.area().unwrap_or(slot);
            let transform = tilt.update(area, pointer);

            let texture = textures
                .get_or_request(ctx, &card.images.large)
                .or_else(|| textures.get_or_request(ctx, &card.images.small));

            Self::paint_card(
                ui.painter(),
                texture.as_ref(),
                transform.project(image_rect),
                accent_color(card),
            );
            if texture.is_none() {
                ui.put(
                    egui::Rect::from_center_size(image_rect.center(), egui::vec2(32.0, 32.0)),
                    egui::Spinner::new(),
                );
            }

            ui.label(egui::RichText::new(&card.set.name).weak());

            if !transform.is_rest() {
                log::trace!("{}: {}", card.id, transform);
            }

            dismissed
        });

        tilt.set_area(modal.response.rect);

        if escape {
            return Some(ModalDismiss::Escape);
        }
        if modal.should_close() {
            return Some(ModalDismiss::Backdrop);
        }
        modal.inner
    }

    fn paint_card(
        painter: &egui::Painter,
        texture: Option<&egui::TextureHandle>,
        corners: [Pos2; 4],
        accent: Color32,
    ) {
        // Type glow behind the card
        painter.add(Shape::closed_line(
            corners.to_vec(),
            Stroke::new(10.0, accent.gamma_multiply(0.35)),
        ));

        match texture {
            Some(texture) => {
                let uvs = [
                    egui::pos2(0.0, 0.0),
                    egui::pos2(1.0, 0.0),
                    egui::pos2(1.0, 1.0),
                    egui::pos2(0.0, 1.0),
                ];
                let mut mesh = Mesh::with_texture(texture.id());
                for (pos, uv) in corners.into_iter().zip(uvs) {
                    mesh.vertices.push(Vertex {
                        pos,
                        uv,
                        color: Color32::WHITE,
                    });
                }
                mesh.add_triangle(0, 1, 2);
                mesh.add_triangle(0, 2, 3);
                painter.add(Shape::mesh(mesh));
            }
            None => {
                painter.add(Shape::convex_polygon(
                    corners.to_vec(),
                    Color32::from_gray(40),
                    Stroke::NONE,
                ));
            }
        }

        painter.add(Shape::closed_line(corners.to_vec(), Stroke::new(2.0, accent)));
    }
}
