use anyhow::{anyhow, ensure, Context, Result};

use crate::device::{check_gl, Device, GlVersion, VertexArrayId};
use crate::platform::{DefaultPlatform, Platform, PlatformEvent, SurfaceSize, WindowConfig};
use crate::render::{RenderCtx, Scene, ShaderList};

use super::RendererConfig;

/// Lifecycle of a [`Renderer`]. `Unavailable` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RendererState {
    Uninitialized,
    Initializing,
    Available,
    Unavailable,
}

/// Platform steps that succeeded and must be undone on drop.
#[derive(Debug, Default)]
struct Acquired {
    video: bool,
    window: bool,
    context: bool,
}

/// Owns the window, the GL context and the shader registry.
///
/// Construction does no platform work; [`initialize`](Self::initialize)
/// brings everything up and any failure leaves the renderer unavailable
/// instead of erroring out. Resources created from [`device`](Self::device)
/// become inert in that case, so callers can keep running without a GPU.
pub struct Renderer<P: Platform = DefaultPlatform> {
    platform: P,
    config: RendererConfig,
    state: RendererState,
    acquired: Acquired,
    device: Device,
    shaders: ShaderList,
    vao: Option<VertexArrayId>,
    size: SurfaceSize,
    version: Option<GlVersion>,
    quit_requested: bool,
}

impl<P: Platform + Default> Renderer<P> {
    pub fn with_config(config: RendererConfig) -> Self {
        Self::new(P::default(), config)
    }
}

impl<P: Platform> Renderer<P> {
    pub fn new(platform: P, config: RendererConfig) -> Self {
        let device = Device::unavailable();
        let shaders = ShaderList::empty(&device);
        Self {
            platform,
            config,
            state: RendererState::Uninitialized,
            acquired: Acquired::default(),
            device,
            shaders,
            vao: None,
            size: SurfaceSize::default(),
            version: None,
            quit_requested: false,
        }
    }

    /// Brings up video, window, context and the pipeline baseline, then
    /// builds the shader registry. A zero `width` or `height` opens a
    /// fullscreen window.
    ///
    /// Returns whether the renderer ended up available. Only the first call
    /// does anything.
    pub fn initialize(&mut self, width: u32, height: u32) -> bool {
        if self.state != RendererState::Uninitialized {
            log::warn!("renderer already initialized ({:?}), ignoring", self.state);
            return self.is_available();
        }

        self.state = RendererState::Initializing;
        match self.bring_up(SurfaceSize::new(width, height)) {
            Ok(()) => {
                self.state = RendererState::Available;
                log::info!(
                    "renderer available: {}x{}, {} shader(s)",
                    self.size.width,
                    self.size.height,
                    self.shaders.len()
                );
            }
            Err(e) => {
                log::error!("renderer unavailable: {e:#}");
                self.device.release();
                self.state = RendererState::Unavailable;
            }
        }
        self.is_available()
    }

    fn bring_up(&mut self, requested: SurfaceSize) -> Result<()> {
        self.platform
            .init_video()
            .context("failed to initialize video subsystem")?;
        self.acquired.video = true;

        let window = WindowConfig::new(self.config.title.clone(), requested, self.config.vsync);
        let size = self
            .platform
            .create_window(&window)
            .context("failed to create window")?;
        self.acquired.window = true;

        let gl = self
            .platform
            .create_context(self.config.gl)
            .context("failed to create GL context")?;
        self.acquired.context = true;

        let version = gl.version();
        log::info!(
            "GL {}.{}{} ({})",
            version.major,
            version.minor,
            if version.embedded { " ES" } else { "" },
            version.vendor_info
        );
        self.version = Some(version);

        // Core profiles refuse attribute setup without a bound VAO.
        let vao = gl
            .create_vertex_array()
            .map_err(|e| anyhow!("failed to create vertex array object: {e}"))?;
        gl.bind_vertex_array(Some(vao));
        self.vao = Some(vao);

        gl.set_blend(true);
        gl.set_depth_test(false);
        ensure!(check_gl(&*gl, "pipeline baseline"), "GL errors while setting up the pipeline");

        self.device.attach(gl);
        ensure!(self.device.mark_available(), "device has no GL context attached");

        self.apply_size(size);

        let mut shaders = self.platform.create_shader_list(&self.device);
        if let Some(dir) = &self.config.shader_pack {
            let io = self.platform.io();
            shaders.load_pack(io, &io.romfs_path().join(dir));
        }
        self.shaders = shaders;

        Ok(())
    }

    #[inline]
    pub fn state(&self) -> RendererState {
        self.state
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.state == RendererState::Available && self.device.is_available()
    }

    /// Handle to hand to vertex arrays and shaders created by the caller.
    #[inline]
    pub fn device(&self) -> &Device {
        &self.device
    }

    #[inline]
    pub fn shaders(&self) -> &ShaderList {
        &self.shaders
    }

    #[inline]
    pub fn shaders_mut(&mut self) -> &mut ShaderList {
        &mut self.shaders
    }

    /// Drawable size in pixels.
    #[inline]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Context version reported at bring-up.
    pub fn gl_version(&self) -> Option<&GlVersion> {
        self.version.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    #[inline]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Ends a frame.
    ///
    /// When `draw` is set the target is cleared and `scene` drawn once; the
    /// frame is then presented once. Does nothing while unavailable. Returns
    /// whether a frame was presented.
    pub fn flip<S>(&mut self, draw: bool, scene: &mut S) -> bool
    where
        S: Scene + ?Sized,
    {
        if !self.is_available() {
            return false;
        }
        let Some(gl) = self.device.gl() else {
            return false;
        };

        if draw {
            gl.clear(self.config.clear_color);
            let mut ctx = RenderCtx::new(&self.device, gl.clone(), &self.shaders, self.size.to_vec2());
            scene.draw(&mut ctx);
            log::trace!("frame: {} draw call(s)", ctx.draw_calls());
            check_gl(&*gl, "Renderer::flip");
        }

        match self.platform.present() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("present failed: {e:#}");
                false
            }
        }
    }

    /// Blocks for about `ms` milliseconds.
    pub fn delay(&mut self, ms: u32) {
        self.platform.delay(ms);
    }

    /// Pumps window events. Returns `false` once quit was requested.
    pub fn poll_events(&mut self) -> bool {
        for event in self.platform.poll_events() {
            match event {
                PlatformEvent::Quit => {
                    log::info!("quit requested");
                    self.quit_requested = true;
                }
                PlatformEvent::Resized(size) => self.resize(size.width, size.height),
            }
        }
        !self.quit_requested
    }

    /// Updates the surface, viewport and projection for a new drawable size.
    /// Zero-sized (minimized) windows are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        let size = SurfaceSize::new(width, height);
        if size.is_empty() || size == self.size || !self.is_available() {
            return;
        }
        self.platform.resize_surface(size);
        self.apply_size(size);
        log::debug!("resized to {width}x{height}");
    }

    fn apply_size(&mut self, size: SurfaceSize) {
        self.size = size;
        if let Some(gl) = self.device.gl() {
            let w = i32::try_from(size.width).unwrap_or(i32::MAX);
            let h = i32::try_from(size.height).unwrap_or(i32::MAX);
            gl.viewport(0, 0, w, h);
        }
    }
}

impl<P: Platform> Drop for Renderer<P> {
    fn drop(&mut self) {
        // GPU objects go first, while the context is still current.
        self.shaders = ShaderList::empty(&self.device);
        if let (Some(vao), Some(gl)) = (self.vao.take(), self.device.gl()) {
            gl.bind_vertex_array(None);
            gl.delete_vertex_array(vao);
        }
        self.device.release();

        if self.acquired.context {
            self.platform.destroy_context();
        }
        if self.acquired.window {
            self.platform.destroy_window();
        }
        if self.acquired.video {
            self.platform.quit_video();
        }
        log::debug!("renderer torn down");
    }
}
