use std::num::NonZeroU32;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowId};

use crate::device::{GlApi, GlowApi};
use crate::io::{DesktopIo, Io};

use super::{GlRequest, Platform, PlatformEvent, SurfaceSize, WindowConfig};

/// winit window with a glutin-managed OpenGL context.
///
/// The event loop is pumped from [`Platform::poll_events`] rather than run,
/// so the caller keeps control of the frame loop.
pub struct DesktopPlatform {
    io: DesktopIo,
    event_loop: Option<EventLoop<()>>,
    window: Option<Window>,
    gl_config: Option<Config>,
    vsync: bool,
    surface: Option<Surface<WindowSurface>>,
    context: Option<PossiblyCurrentContext>,
}

impl DesktopPlatform {
    pub fn new(io: DesktopIo) -> Self {
        Self {
            io,
            event_loop: None,
            window: None,
            gl_config: None,
            vsync: true,
            surface: None,
            context: None,
        }
    }

    /// The open window, if any.
    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

impl Default for DesktopPlatform {
    fn default() -> Self {
        Self::new(DesktopIo::default())
    }
}

impl Platform for DesktopPlatform {
    fn init_video(&mut self) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        self.event_loop = Some(event_loop);
        Ok(())
    }

    fn create_window(&mut self, config: &WindowConfig) -> Result<SurfaceSize> {
        let event_loop = self
            .event_loop
            .as_ref()
            .ok_or_else(|| anyhow!("video subsystem not initialized"))?;

        let mut attrs = Window::default_attributes().with_title(config.title.clone());
        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        } else {
            attrs = attrs.with_inner_size(PhysicalSize::new(config.size.width, config.size.height));
        }

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let built = panic::catch_unwind(AssertUnwindSafe(|| {
            DisplayBuilder::new()
                .with_window_attributes(Some(attrs))
                .build(event_loop, template, pick_config)
        }));
        let (window, gl_config) = match built {
            Ok(result) => result.map_err(|e| anyhow!("failed to build GL display: {e}"))?,
            Err(payload) if payload.is::<NoMatchingConfig>() => {
                bail!("failed to build GL display: no GL config matches the template")
            }
            Err(payload) => panic::resume_unwind(payload),
        };
        let window = window.ok_or_else(|| anyhow!("GL display created without a window"))?;

        let size = window.inner_size();
        log::info!(
            "window {}x{} ({})",
            size.width,
            size.height,
            if config.fullscreen { "fullscreen" } else { "windowed" }
        );

        self.window = Some(window);
        self.gl_config = Some(gl_config);
        self.vsync = config.vsync;
        Ok(SurfaceSize::new(size.width, size.height))
    }

    fn create_context(&mut self, request: GlRequest) -> Result<Rc<dyn GlApi>> {
        let (Some(window), Some(gl_config)) = (self.window.as_ref(), self.gl_config.as_ref()) else {
            bail!("no window to create a context on");
        };

        let raw = window.window_handle().context("window has no native handle")?.as_raw();
        let attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(request.major, request.minor))))
            .with_profile(GlProfile::Core)
            .build(Some(raw));

        let display = gl_config.display();
        let not_current = unsafe { display.create_context(gl_config, &attrs) }
            .with_context(|| format!("failed to create GL {}.{} core context", request.major, request.minor))?;

        let surface_attrs = window
            .build_surface_attributes(Default::default())
            .context("failed to describe window surface")?;
        let surface = unsafe { display.create_window_surface(gl_config, &surface_attrs) }
            .context("failed to create window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        if self.vsync {
            if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
                log::warn!("vsync unavailable: {e}");
            }
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        };

        self.surface = Some(surface);
        self.context = Some(context);
        Ok(Rc::new(unsafe { GlowApi::new(gl) }))
    }

    fn present(&mut self) -> Result<()> {
        let (Some(surface), Some(context)) = (self.surface.as_ref(), self.context.as_ref()) else {
            bail!("no surface to present");
        };
        surface.swap_buffers(context).context("failed to swap buffers")
    }

    fn delay(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }

    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        let mut events = Vec::new();
        let Some(event_loop) = self.event_loop.as_mut() else {
            return events;
        };

        let mut collector = EventCollector { events: &mut events };
        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), &mut collector) {
            log::debug!("event loop exited with code {code}");
            events.push(PlatformEvent::Quit);
        }
        events
    }

    fn resize_surface(&mut self, size: SurfaceSize) {
        let (Some(surface), Some(context)) = (self.surface.as_ref(), self.context.as_ref()) else {
            return;
        };
        if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            surface.resize(context, w, h);
        }
    }

    fn destroy_context(&mut self) {
        self.surface = None;
        self.context = None;
        self.gl_config = None;
        log::debug!("GL context destroyed");
    }

    fn destroy_window(&mut self) {
        self.window = None;
        log::debug!("window destroyed");
    }

    fn quit_video(&mut self) {
        self.event_loop = None;
    }

    fn io(&self) -> &dyn Io {
        &self.io
    }
}

/// Unwind payload for an empty config set; the picker has no way to return
/// an error.
struct NoMatchingConfig;

/// Prefers the config with the most MSAA samples. EGL can offer an empty set.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    match configs.reduce(|best, c| if c.num_samples() > best.num_samples() { c } else { best }) {
        Some(config) => config,
        // `resume_unwind` skips the panic hook; `create_window` turns this into an error.
        None => panic::resume_unwind(Box::new(NoMatchingConfig)),
    }
}

/// Translates winit callbacks into [`PlatformEvent`]s for one pump.
struct EventCollector<'a> {
    events: &'a mut Vec<PlatformEvent>,
}

impl ApplicationHandler for EventCollector<'_> {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.events.push(PlatformEvent::Quit),
            WindowEvent::Resized(size) => {
                self.events.push(PlatformEvent::Resized(SurfaceSize::new(size.width, size.height)));
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.events.push(PlatformEvent::Quit),
            _ => {}
        }
    }
}
