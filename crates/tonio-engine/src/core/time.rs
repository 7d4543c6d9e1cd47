/// Frame delta calculator.
/// Turns platform timestamps (milliseconds) into clamped per-frame deltas in seconds.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the previous frame, in milliseconds.
    last_ms: Option<f64>,
    /// Upper bound for a single frame delta, in seconds.
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt: max_dt.max(0.0),
        }
    }

    /// Forget the previous timestamp. The next `tick` yields a zero delta.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Re-anchor the clock at `now_ms` without producing a delta.
    pub fn resync(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Advance to `now_ms` and return the elapsed seconds.
    /// Never negative; capped at `max_dt` so a suspend gap cannot explode the step.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let raw = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        (raw as f32).min(self.max_dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.tick(1234.0), 0.0);
    }

    #[test]
    fn converts_ms_to_seconds() {
        let mut clock = FrameClock::new(0.1);
        clock.resync(1000.0);
        let dt = clock.tick(1016.0);
        assert!((dt - 0.016).abs() < 1e-6, "dt was {}", dt);
    }

    #[test]
    fn backwards_time_is_zero() {
        let mut clock = FrameClock::new(0.1);
        clock.resync(1000.0);
        assert_eq!(clock.tick(900.0), 0.0);
    }

    #[test]
    fn caps_large_gaps() {
        let mut clock = FrameClock::new(0.1);
        clock.resync(0.0);
        let dt = clock.tick(5000.0); // tab was suspended for 5s
        assert!((dt - 0.1).abs() < 1e-6);
    }
}
