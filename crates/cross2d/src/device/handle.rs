use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::gl::GlApi;

/// Shared handle to the renderer's GPU state.
///
/// The renderer owns the context; every resource it creates (shaders, vertex
/// arrays) keeps a clone of this handle instead of reaching for global state.
/// GL access is only handed out while the device is available, so every
/// GPU-touching path is a no-op in headless or failed-init mode and after
/// teardown.
///
/// The handle is `!Send`: all GPU work stays on the thread owning the context.
#[derive(Clone)]
pub struct Device {
    state: Rc<DeviceState>,
}

struct DeviceState {
    gl: RefCell<Option<Rc<dyn GlApi>>>,
    available: Cell<bool>,
}

impl Device {
    /// A device with no context. Stays unavailable until a context is attached.
    pub fn unavailable() -> Self {
        Self {
            state: Rc::new(DeviceState {
                gl: RefCell::new(None),
                available: Cell::new(false),
            }),
        }
    }

    /// Whether GPU operations may be issued.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.state.available.get()
    }

    /// The GL function table, only while available.
    pub fn gl(&self) -> Option<Rc<dyn GlApi>> {
        if !self.is_available() {
            return None;
        }
        self.state.gl.borrow().clone()
    }

    /// Stores the context's function table. Does not make the device available.
    pub(crate) fn attach(&self, gl: Rc<dyn GlApi>) {
        *self.state.gl.borrow_mut() = Some(gl);
    }

    /// Flips the device to available. Requires an attached context.
    pub(crate) fn mark_available(&self) -> bool {
        let attached = self.state.gl.borrow().is_some();
        self.state.available.set(attached);
        attached
    }

    /// Makes the device permanently inert and drops the function table.
    pub(crate) fn release(&self) {
        self.state.available.set(false);
        self.state.gl.borrow_mut().take();
    }

    /// True when both handles refer to the same device.
    pub fn same_device(&self, other: &Device) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("available", &self.is_available())
            .finish()
    }
}
