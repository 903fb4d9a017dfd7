use eframe::{self, egui};
use egui::ViewportBuilder;
use log::info;
use tokio::runtime::Runtime;

use super::{
    components::{CardGrid, CardModal, LoadingIndicator, PageNav, PaginationBar},
    textures::TextureStore,
};
use crate::{
    api::PokemonTcgClient,
    config::GalleryConfig,
    error::ApiResult,
    gallery::{GalleryState, TiltEffect},
    loader::{PageLoader, PageOutcome, PageRequest},
};

pub struct GalleryApp {
    state: GalleryState,
    loader: PageLoader,
    textures: TextureStore,
    tilt: TiltEffect,
    loading_indicator: LoadingIndicator,
    /// Tokio runtime for async operations. Declared last so it outlives the
    /// loaders holding handles to it.
    _runtime: Runtime,
}

impl GalleryApp {
    pub fn new(ctx: &egui::Context, config: &GalleryConfig) -> ApiResult<Self> {
        info!("Initializing gallery against {}", config.base_url);

        let runtime = Runtime::new()?;
        let client = PokemonTcgClient::new(config)?;

        let loader = PageLoader::new(client.clone(), runtime.handle().clone())
            .with_repaint(ctx.clone());
        let textures = TextureStore::new(
            client,
            runtime.handle().clone(),
            config.max_concurrent_images,
        );

        let mut app = Self {
            state: GalleryState::new(config.page_size),
            loader,
            textures,
            tilt: TiltEffect::default(),
            loading_indicator: LoadingIndicator::default(),
            _runtime: runtime,
        };
        app.go_to_page(app.state.page());
        Ok(app)
    }

    /// Show `page`, from the cache or by starting a load
    fn go_to_page(&mut self, page: u32) {
        match self.loader.navigate(page) {
            PageRequest::Cached(cards) => self.state.show_cards(page, cards),
            PageRequest::Pending => self.state.begin_load(),
        }
    }

    fn poll_pages(&mut self) {
        for outcome in self.loader.poll() {
            match outcome {
                PageOutcome::Loaded { page, cards } => self.state.show_cards(page, cards),
                PageOutcome::Failed { page } => self.state.fail_load(page),
            }
        }

        let total = self.loader.cache().total_count();
        if let Some(last) = self.state.set_total_count(total) {
            info!("Page past the end, moving to page {}", last);
            self.go_to_page(last);
        }
    }

    fn navigate(&mut self, nav: PageNav) {
        let page = match nav {
            PageNav::Prev => self.state.prev_page(),
            PageNav::Next => self.state.next_page(),
        };
        if let Some(page) = page {
            self.go_to_page(page);
        }
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll for finished background work (non-blocking)
        self.poll_pages();
        self.textures.poll(ctx);

        let mut nav = None;
        egui::TopBottomPanel::top("gallery_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(self.state.title());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    nav = PaginationBar::show(ui, &self.state);
                });
            });
            ui.add_space(6.0);
        });
        if let Some(nav) = nav {
            self.navigate(nav);
        }

        let mut clicked = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.is_loading() {
                self.loading_indicator.show(ui);
                return;
            }
            if self.state.cards().is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new("No cards on this page").weak());
                });
                return;
            }
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    clicked = CardGrid::show(ctx, ui, self.state.cards(), &mut self.textures);
                });
        });
        if let Some(card_id) = clicked {
            self.state.select(&card_id);
        }

        self.tilt
            .bind(self.state.selected().map(|card| card.id.as_str()));
        if let Some(card) = self.state.selected().cloned() {
            if let Some(how) = CardModal::show(ctx, &card, &mut self.textures, &mut self.tilt) {
                self.state.dismiss(how);
                self.tilt.bind(None);
            }
        }
    }
}

pub fn launch_gui(config: GalleryConfig) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([1100.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Pokémon Card Gallery",
        options,
        Box::new(move |cc| {
            let app = GalleryApp::new(&cc.egui_ctx, &config)?;
            Ok(Box::new(app))
        }),
    )
}
