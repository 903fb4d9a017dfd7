mod app;
mod components;
mod textures;

pub use app::{launch_gui, GalleryApp};
pub use textures::decode_image;
