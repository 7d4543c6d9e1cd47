/// Lifecycle callbacks for the menu/UI layer.
/// Every method defaults to doing nothing.
pub trait SessionHooks {
    fn on_game_start(&mut self, _multiplayer: bool) {}
    fn on_pause(&mut self) {}
    fn on_resume(&mut self) {}
    fn on_session_end(&mut self) {}
    /// Short status line for the player (e.g. "Connected to multiplayer server!").
    fn on_message(&mut self, _text: &str) {}
}

/// Hooks that ignore everything. Used when the UI subsystem is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl SessionHooks for NoopHooks {}
