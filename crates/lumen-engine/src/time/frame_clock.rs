use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Frames ticked since the clock was created or last reset.
    pub frame_index: u64,
}

impl FrameTime {
    /// A zero-length frame at `now`, used before the first tick of an example.
    pub fn zero(now: Instant) -> Self {
        Self { dt: 0.0, now, frame_index: 0 }
    }
}

/// Monotonic clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so an example that was stalled (debugger, window drag,
/// long `init`) does not see a huge step on its next update.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a clock with default clamps (0.1 ms .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the baseline and the frame counter.
    ///
    /// Called on every example transition so the incoming example starts at
    /// frame zero with a fresh delta.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.frame_index = 0;
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to an explicit instant.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_counts_frames() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }

    #[test]
    fn dt_is_clamped_to_max_after_stall() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(50));
        let later = Instant::now() + Duration::from_secs(3);
        let ft = clock.tick_at(later);
        assert!((ft.dt - 0.05).abs() < 1e-6);
    }

    #[test]
    fn dt_is_clamped_to_min_for_tight_loops() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(50));
        let now = Instant::now() + Duration::from_millis(10);
        clock.tick_at(now);
        let ft = clock.tick_at(now);
        assert!((ft.dt - 0.001).abs() < 1e-6);
    }

    #[test]
    fn reset_restarts_frame_index() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.tick();
        clock.reset();
        assert_eq!(clock.tick().frame_index, 0);
    }
}
