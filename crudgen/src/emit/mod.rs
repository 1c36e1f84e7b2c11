//! Turning artifact descriptions into files

mod persist;
mod render;
pub mod templates;

pub use persist::{read_existing, write_atomic, WriteStatus};
pub use render::Renderer;
