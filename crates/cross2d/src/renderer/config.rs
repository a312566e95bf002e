use std::path::PathBuf;

use crate::coords::Color;
use crate::platform::GlRequest;

/// Renderer configuration.
///
/// `shader_pack`, when set, names a directory of `<name>.vert` /
/// `<name>.frag` pairs registered after the built-in shaders. Relative
/// paths resolve against the platform's bundled asset root.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub title: String,
    pub clear_color: Color,
    pub shader_pack: Option<PathBuf>,
    pub gl: GlRequest,
    pub vsync: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            title: "cross2d".to_string(),
            clear_color: Color::BLACK,
            shader_pack: None,
            gl: GlRequest::default(),
            vsync: true,
        }
    }
}
