use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Fixed-rate frame pacing for loops driven by [`Renderer::delay`].
///
/// Call [`tick`](Self::tick) once at the start of each frame and
/// [`remaining_ms`](Self::remaining_ms) after presenting to learn how long to
/// sleep. Delta time is clamped so a stall (debugger, minimized window)
/// does not produce a huge step.
///
/// [`Renderer::delay`]: crate::renderer::Renderer::delay
#[derive(Debug, Clone)]
pub struct FramePacer {
    target: Duration,
    last: Instant,
    frame_index: u64,
    dt_max: Duration,
}

impl FramePacer {
    /// Paces at `fps` frames per second; `0` disables pacing.
    pub fn new(fps: u32) -> Self {
        let target = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / fps
        };
        Self {
            target,
            last: Instant::now(),
            frame_index: 0,
            dt_max: Duration::from_millis(250),
        }
    }

    /// Target duration of one frame.
    #[inline]
    pub fn target(&self) -> Duration {
        self.target
    }

    /// Restarts timing from now, e.g. after a long pause.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// [`tick`](Self::tick) with an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }

    /// Time left in the current frame; zero once the target has passed.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.target
            .saturating_sub(now.saturating_duration_since(self.last))
    }

    /// Milliseconds to sleep now to hold the target rate, rounded down.
    pub fn remaining_ms(&self) -> u32 {
        let ms = self.remaining_at(Instant::now()).as_millis();
        u32::try_from(ms).unwrap_or(u32::MAX)
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_follows_rate() {
        assert_eq!(FramePacer::new(50).target(), Duration::from_millis(20));
        assert_eq!(FramePacer::new(0).target(), Duration::ZERO);
    }

    #[test]
    fn remaining_never_exceeds_target() {
        let mut pacer = FramePacer::new(60);
        let start = Instant::now();
        pacer.tick_at(start);

        assert_eq!(pacer.remaining_at(start), pacer.target());
        let later = start + Duration::from_millis(5);
        assert!(pacer.remaining_at(later) < pacer.target());
        assert_eq!(pacer.remaining_at(start + Duration::from_millis(40)), Duration::ZERO);
    }

    #[test]
    fn tick_counts_frames_and_clamps_dt() {
        let mut pacer = FramePacer::new(60);
        let start = Instant::now();
        let first = pacer.tick_at(start);
        let second = pacer.tick_at(start + Duration::from_secs(5));

        assert_eq!(first.frame_index, 0);
        assert_eq!(second.frame_index, 1);
        assert!((second.dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn unpaced_loop_never_sleeps() {
        let pacer = FramePacer::new(0);
        assert_eq!(pacer.remaining_ms(), 0);
    }
}
