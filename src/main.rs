use pokedex_gallery::GalleryConfig;

fn main() {
    // Initialize logger. Set RUST_LOG environment variable to control log level.
    // Examples: RUST_LOG=info, RUST_LOG=pokedex_gallery=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting Pokédex Card Gallery");

    let config = GalleryConfig::from_env();
    if let Err(e) = pokedex_gallery::ui::launch_gui(config) {
        log::error!("Application error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
