use std::time::{Duration, Instant};

/// Measures elapsed time between simulation ticks.
pub struct FrameClock {
    start: Instant,
    last: Instant,
    time: f32,
    dt: f32,
    frame: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            time: 0.0,
            dt: 0.0,
            frame: 0,
        }
    }

    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Advances to `now` and returns seconds since the previous tick.
    /// An instant earlier than the previous tick yields `0.0`.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last);
        if now > self.last {
            self.last = now;
        }
        self.dt = elapsed.as_secs_f32();
        self.time = self.last.duration_since(self.start).as_secs_f32();
        self.frame += 1;
        self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn elapsed(&self) -> Duration {
        self.last.duration_since(self.start)
    }

    /// Seconds since the clock started, as of the last tick.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn fps(&self) -> f32 {
        if self.dt > 0.0 { 1.0 / self.dt } else { 0.0 }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }
}
