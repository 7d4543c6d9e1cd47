use crate::core::time::FrameClock;

/// Drives the per-frame cycle on top of a platform frame callback.
///
/// The callback chain stays armed while paused; paused frames only re-anchor
/// the clock, so resuming neither replays the pause gap nor double-counts time.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    clock: FrameClock,
    /// Whether the frame chain is armed (between `start` and `stop`).
    armed: bool,
    /// Whether armed frames do update/render work.
    running: bool,
}

impl FrameScheduler {
    pub fn new(max_dt: f32) -> Self {
        Self {
            clock: FrameClock::new(max_dt),
            armed: false,
            running: false,
        }
    }

    /// Arm the frame chain and begin running. Idempotent while armed.
    pub fn start(&mut self) {
        if self.armed {
            self.running = true;
            return;
        }
        self.armed = true;
        self.running = true;
        self.clock.reset();
    }

    /// Tear down the frame chain.
    pub fn stop(&mut self) {
        self.armed = false;
        self.running = false;
        self.clock.reset();
    }

    /// Gate work off. Returns `false` if already paused or not armed.
    pub fn pause(&mut self) -> bool {
        if !self.armed || !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Gate work back on. Returns `false` if already running or not armed.
    pub fn resume(&mut self) -> bool {
        if !self.armed || self.running {
            return false;
        }
        self.running = true;
        true
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Called once per platform frame callback.
    /// Returns the delta to simulate, or `None` when this frame must do no work.
    pub fn frame(&mut self, now_ms: f64) -> Option<f32> {
        if !self.armed {
            return None;
        }
        if !self.running {
            self.clock.resync(now_ms);
            return None;
        }
        Some(self.clock.tick(now_ms))
    }
}
