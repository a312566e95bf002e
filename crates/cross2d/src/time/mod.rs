//! Frame timing.
//!
//! One `FramePacer` per render loop: `tick()` at the start of a frame for a
//! `FrameTime`, `remaining_ms()` after presenting for the delay that holds
//! the target rate.

mod frame_pacer;

pub use frame_pacer::{FramePacer, FrameTime};
