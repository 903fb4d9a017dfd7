use crate::gallery::GalleryState;
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    Prev,
    Next,
}

pub struct PaginationBar;

impl PaginationBar {
    /// Prev/Next buttons. Returns the button clicked this frame, if any.
    pub fn show(ui: &mut egui::Ui, state: &GalleryState) -> Option<PageNav> {
        let mut nav = None;
        ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
            if ui
                .add_enabled(state.can_go_prev(), egui::Button::new("Prev"))
                .clicked()
            {
                nav = Some(PageNav::Prev);
            }
            if ui
                .add_enabled(state.can_go_next(), egui::Button::new("Next"))
                .clicked()
            {
                nav = Some(PageNav::Next);
            }
        });
        nav
    }
}
