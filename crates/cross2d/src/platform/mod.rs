//! Windowing, GL context and timer backends.
//!
//! A [`Platform`] owns the OS-level objects the renderer needs: the video
//! subsystem, one window, one GL context bound to it. The renderer drives
//! the setup steps in order and tears them down in reverse; each backend
//! only has to implement the individual steps.
//!
//! The backend used by [`Renderer::default`](crate::renderer::Renderer) is
//! picked at build time: [`DesktopPlatform`] normally, [`HeadlessPlatform`]
//! with the `headless` feature.

mod desktop;
mod headless;

#[cfg(test)]
pub(crate) mod testing;

use std::rc::Rc;

use anyhow::Result;

use crate::coords::Vec2;
use crate::device::{Device, GlApi};
use crate::io::Io;
use crate::render::ShaderList;

pub use desktop::DesktopPlatform;
pub use headless::HeadlessPlatform;

#[cfg(not(feature = "headless"))]
pub type DefaultPlatform = DesktopPlatform;

#[cfg(feature = "headless")]
pub type DefaultPlatform = HeadlessPlatform;

/// Size of a drawable surface in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Either dimension is zero.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Requested GL context version (core profile).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GlRequest {
    pub major: u8,
    pub minor: u8,
}

impl Default for GlRequest {
    fn default() -> Self {
        Self { major: 3, minor: 3 }
    }
}

/// Window parameters derived by the renderer from its config.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub size: SurfaceSize,
    /// Borderless fullscreen on the primary monitor; `size` is ignored.
    pub fullscreen: bool,
    pub vsync: bool,
}

impl WindowConfig {
    /// A zero width or height asks for fullscreen.
    pub fn new(title: impl Into<String>, size: SurfaceSize, vsync: bool) -> Self {
        Self {
            title: title.into(),
            size,
            fullscreen: size.is_empty(),
            vsync,
        }
    }
}

/// Events surfaced by [`Platform::poll_events`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PlatformEvent {
    /// Window closed or Escape pressed.
    Quit,
    Resized(SurfaceSize),
}

/// One windowing/GL backend.
///
/// Setup steps are called at most once each, in the order `init_video`,
/// `create_window`, `create_context`; teardown steps are only called for
/// steps that succeeded, in reverse order.
pub trait Platform {
    fn init_video(&mut self) -> Result<()>;

    /// Opens the window and returns its drawable size.
    fn create_window(&mut self, config: &WindowConfig) -> Result<SurfaceSize>;

    /// Creates a context on the window, makes it current and returns its
    /// function table.
    fn create_context(&mut self, request: GlRequest) -> Result<Rc<dyn GlApi>>;

    /// Swaps the window's buffers.
    fn present(&mut self) -> Result<()>;

    /// Blocks the calling thread for about `ms` milliseconds.
    fn delay(&mut self, ms: u32);

    /// Drains pending window events without blocking.
    fn poll_events(&mut self) -> Vec<PlatformEvent>;

    /// Resizes the drawable after the window changed size.
    fn resize_surface(&mut self, _size: SurfaceSize) {}

    fn destroy_context(&mut self);
    fn destroy_window(&mut self);
    fn quit_video(&mut self);

    /// Filesystem used for shader packs and other assets.
    fn io(&self) -> &dyn Io;

    /// Builds the shader registry once the device is available.
    fn create_shader_list(&self, device: &Device) -> ShaderList {
        ShaderList::new(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_requests_fullscreen() {
        assert!(WindowConfig::new("t", SurfaceSize::new(0, 0), true).fullscreen);
        assert!(WindowConfig::new("t", SurfaceSize::new(640, 0), true).fullscreen);
        assert!(!WindowConfig::new("t", SurfaceSize::new(640, 480), true).fullscreen);
    }

    #[test]
    fn default_request_is_gl_33() {
        assert_eq!(GlRequest::default(), GlRequest { major: 3, minor: 3 });
    }
}
