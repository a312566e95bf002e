use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::device::GlApi;
use crate::io::{DesktopIo, Io};

use super::{GlRequest, Platform, PlatformEvent, SurfaceSize, WindowConfig};

/// Backend without a video subsystem.
///
/// `init_video` always fails, so a renderer on this platform settles in the
/// unavailable state and every GPU-backed resource stays inert. File access
/// and timing still work.
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    io: DesktopIo,
}

impl HeadlessPlatform {
    pub fn new(io: DesktopIo) -> Self {
        Self { io }
    }
}

impl Platform for HeadlessPlatform {
    fn init_video(&mut self) -> Result<()> {
        bail!("headless build has no video subsystem")
    }

    fn create_window(&mut self, _config: &WindowConfig) -> Result<SurfaceSize> {
        bail!("headless build cannot open windows")
    }

    fn create_context(&mut self, _request: GlRequest) -> Result<Rc<dyn GlApi>> {
        bail!("headless build cannot create GL contexts")
    }

    fn present(&mut self) -> Result<()> {
        Ok(())
    }

    fn delay(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }

    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        Vec::new()
    }

    fn destroy_context(&mut self) {}
    fn destroy_window(&mut self) {}
    fn quit_video(&mut self) {}

    fn io(&self) -> &dyn Io {
        &self.io
    }
}
