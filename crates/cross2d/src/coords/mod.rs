//! Geometry and color value types shared by vertices, renderers and scenes.
//!
//! Canonical CPU space:
//! - Pixels, origin top-left
//! - +X right, +Y down
//!
//! The renderer converts to NDC with an orthographic projection uniform.

mod color;
mod rect;
mod vec2;

pub use color::Color;
pub use rect::Rect;
pub use vec2::Vec2;
