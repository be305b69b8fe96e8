use std::{cell::Cell, rc::Rc, time::Instant};

use crate::foundation::core::MediaTime;

/// Source of "current media time" for the compositing timeline.
pub trait Clock {
    /// Current timeline time.
    fn now(&self) -> MediaTime;
}

/// Monotonic wall clock starting at zero when created.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at [`MediaTime::ZERO`].
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> MediaTime {
        MediaTime(self.origin.elapsed().as_secs_f64())
    }
}

/// Manually stepped clock. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Clock at [`MediaTime::ZERO`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to an absolute time.
    pub fn set(&self, t: MediaTime) {
        self.now.set(t.0);
    }

    /// Move forward by `secs` seconds.
    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> MediaTime {
        MediaTime(self.now.get())
    }
}
