use instant::{Duration, Instant};

/// Monotonic elapsed-time source. One is started per mount and dropped on unmount.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn start() -> Self {
        Self::started_at(Instant::now())
    }

    pub fn started_at(start: Instant) -> Self {
        Self { start }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Elapsed seconds, which is what every animation curve is expressed in.
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }

    /// Time between the start and `now`, zero if `now` is earlier.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        if now > self.start {
            now - self.start
        } else {
            Duration::ZERO
        }
    }
}
