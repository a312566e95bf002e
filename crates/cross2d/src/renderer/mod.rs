//! Renderer lifecycle: bring-up, frame presentation, teardown.

mod config;
mod gl_renderer;

pub use config::RendererConfig;
pub use gl_renderer::{Renderer, RendererState};
