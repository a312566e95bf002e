//! cross2d: a small 2D rendering core over OpenGL.
//!
//! The renderer owns one window and GL context and hands out a shared
//! [`Device`](device::Device) handle; vertex arrays and shaders created from
//! it mirror CPU data into GPU objects and turn into no-ops when no GPU is
//! available.

pub mod coords;
pub mod device;
pub mod io;
pub mod logging;
pub mod platform;
pub mod render;
pub mod renderer;
pub mod time;
