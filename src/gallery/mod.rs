//! Gallery state: pagination, selection and the viewer tilt effect.
//! Free of rendering so it can be driven directly from tests.

pub mod state;
pub mod tilt;

pub use state::{GalleryState, ModalDismiss};
pub use tilt::{TiltEffect, TiltTransform};
