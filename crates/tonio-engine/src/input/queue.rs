use std::collections::HashSet;

/// Key vocabulary the core understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
}

impl KeyCode {
    /// Parse a browser `KeyboardEvent.code` string. Keys outside the vocabulary return `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Self::KeyW),
            "KeyA" => Some(Self::KeyA),
            "KeyS" => Some(Self::KeyS),
            "KeyD" => Some(Self::KeyD),
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "Escape" => Some(Self::Escape),
            _ => None,
        }
    }
}

/// Input event types the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown(KeyCode),
    /// A key was released.
    KeyUp(KeyCode),
}

/// A queue of input events.
/// The host pushes events as they arrive; the session drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of which keys are held.
pub trait InputProvider {
    fn is_key_pressed(&self, key: KeyCode) -> bool;
}

/// Held-key state built from drained input events.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    held: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.held.insert(key);
            }
            InputEvent::KeyUp(key) => {
                self.held.remove(&key);
            }
        }
    }

    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// Release every key (e.g. when the window loses focus).
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

impl InputProvider for InputState {
    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }
}

/// Provider that reports no keys. Used when the input subsystem is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullInput;

impl InputProvider for NullInput {
    fn is_key_pressed(&self, _key: KeyCode) -> bool {
        false
    }
}
