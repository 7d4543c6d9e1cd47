//! Animation component for frame sequences.
//!
//! Cycles a sprite through a list of image keys at a fixed frame duration.

/// Animation state for an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationComponent {
    /// Image keys, one per frame.
    pub frames: Vec<String>,
    /// Seconds per frame.
    pub frame_duration: f32,
    /// Current frame index.
    pub frame_index: usize,
    /// Time accumulated in current frame.
    pub frame_timer: f32,
}

impl AnimationComponent {
    pub fn new(frames: Vec<String>) -> Self {
        Self {
            frames,
            frame_duration: 0.1,
            frame_index: 0,
            frame_timer: 0.0,
        }
    }

    pub fn with_frame_duration(mut self, seconds: f32) -> Self {
        self.frame_duration = seconds;
        self
    }

    /// Advance the timer. Moves to the next frame (wrapping) once a frame's
    /// duration has elapsed; the leftover time is dropped.
    /// Returns `true` when the frame changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.frames.is_empty() {
            return false;
        }
        self.frame_timer += dt;
        if self.frame_timer >= self.frame_duration {
            self.frame_timer = 0.0;
            self.frame_index = (self.frame_index + 1) % self.frames.len();
            return true;
        }
        false
    }

    /// Image key of the current frame.
    pub fn current_frame(&self) -> Option<&str> {
        self.frames.get(self.frame_index).map(String::as_str)
    }
}
