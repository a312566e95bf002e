//! Recording platform used by renderer tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{bail, Result};

use crate::device::testing::RecordingGl;
use crate::device::GlApi;
use crate::io::{DesktopIo, Io};

use super::{GlRequest, Platform, PlatformEvent, SurfaceSize, WindowConfig};

/// Setup step to fail on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Stage {
    Video,
    Window,
    Context,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlatformCall {
    InitVideo,
    CreateWindow(WindowConfig),
    CreateContext(GlRequest),
    Present,
    Delay(u32),
    ResizeSurface(SurfaceSize),
    DestroyContext,
    DestroyWindow,
    QuitVideo,
    /// Pushed by test scenes to order draws against presents.
    SceneDraw,
}

pub(crate) type Journal = Rc<RefCell<Vec<PlatformCall>>>;

pub(crate) struct RecordingPlatform {
    pub(crate) gl: Rc<RecordingGl>,
    journal: Journal,
    fail_at: Option<Stage>,
    /// Size reported for fullscreen windows.
    screen: SurfaceSize,
    pending: VecDeque<Vec<PlatformEvent>>,
    io: DesktopIo,
}

impl RecordingPlatform {
    pub(crate) fn new() -> Self {
        Self {
            gl: Rc::new(RecordingGl::new()),
            journal: Journal::default(),
            fail_at: None,
            screen: SurfaceSize::new(1920, 1080),
            pending: VecDeque::new(),
            io: DesktopIo::new("./no-such-romfs"),
        }
    }

    pub(crate) fn failing_at(stage: Stage) -> Self {
        Self { fail_at: Some(stage), ..Self::new() }
    }

    pub(crate) fn with_io(mut self, io: DesktopIo) -> Self {
        self.io = io;
        self
    }

    pub(crate) fn journal(&self) -> Journal {
        self.journal.clone()
    }

    /// Queues the events returned by one future `poll_events` call.
    pub(crate) fn queue_events(&mut self, events: Vec<PlatformEvent>) {
        self.pending.push_back(events);
    }

    fn record(&self, call: PlatformCall) {
        self.journal.borrow_mut().push(call);
    }
}

impl Platform for RecordingPlatform {
    fn init_video(&mut self) -> Result<()> {
        if self.fail_at == Some(Stage::Video) {
            bail!("injected video failure");
        }
        self.record(PlatformCall::InitVideo);
        Ok(())
    }

    fn create_window(&mut self, config: &WindowConfig) -> Result<SurfaceSize> {
        if self.fail_at == Some(Stage::Window) {
            bail!("injected window failure");
        }
        self.record(PlatformCall::CreateWindow(config.clone()));
        Ok(if config.fullscreen { self.screen } else { config.size })
    }

    fn create_context(&mut self, request: GlRequest) -> Result<Rc<dyn GlApi>> {
        if self.fail_at == Some(Stage::Context) {
            bail!("injected context failure");
        }
        self.record(PlatformCall::CreateContext(request));
        Ok(self.gl.clone() as Rc<dyn GlApi>)
    }

    fn present(&mut self) -> Result<()> {
        self.record(PlatformCall::Present);
        Ok(())
    }

    fn delay(&mut self, ms: u32) {
        self.record(PlatformCall::Delay(ms));
    }

    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        self.pending.pop_front().unwrap_or_default()
    }

    fn resize_surface(&mut self, size: SurfaceSize) {
        self.record(PlatformCall::ResizeSurface(size));
    }

    fn destroy_context(&mut self) {
        self.record(PlatformCall::DestroyContext);
    }

    fn destroy_window(&mut self) {
        self.record(PlatformCall::DestroyWindow);
    }

    fn quit_video(&mut self) {
        self.record(PlatformCall::QuitVideo);
    }

    fn io(&self) -> &dyn Io {
        &self.io
    }
}
