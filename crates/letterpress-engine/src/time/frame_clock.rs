use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    pub now: Instant,
    pub frame_index: u64,
}

/// Produces [`FrameTime`] snapshots and, with a target rate, frame deadlines.
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// surface as a huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
    interval: Option<Duration>,
    deadline: Option<Instant>,
}

impl FrameClock {
    /// Unpaced clock: every redraw is due immediately.
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
            interval: None,
            deadline: None,
        }
    }

    /// Clock paced to `fps` frames per second. Zero means unpaced.
    pub fn with_target_fps(fps: u32) -> Self {
        let mut clock = Self::new();
        if fps > 0 {
            clock.interval = Some(Duration::from_secs(1) / fps);
            clock.deadline = Some(clock.last);
        }
        clock
    }

    /// Target time between frames, if paced.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// When the next frame is due. `None` for an unpaced clock.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_none_or(|d| now >= d)
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        if let (Some(interval), Some(deadline)) = (self.interval, self.deadline) {
            // Late frames do not bank time for a burst of catch-up frames.
            let next = deadline + interval;
            self.deadline = Some(if next <= now { now + interval } else { next });
        }

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
