//! Render sink contract.
//!
//! The core never draws pixels itself. Everything visible goes through a
//! `RenderSink` in screen coordinates; the host decides what a rectangle,
//! a circle or a line of text actually becomes (Canvas2D, a GPU batch, a test recorder).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const GRASS: Color = Color::rgb(0x4C, 0xAF, 0x50);
    pub const TRUNK: Color = Color::rgb(0x79, 0x55, 0x48);
    pub const FOLIAGE: Color = Color::rgb(0x2E, 0x7D, 0x32);
    pub const ROCK: Color = Color::rgb(0x9E, 0x9E, 0x9E);
    pub const SKIN: Color = Color::rgb(0xFF, 0xC1, 0x07);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b, 0xFF])
    }
}

/// Drawing surface handed to `render` calls. All coordinates are screen pixels.
pub trait RenderSink {
    /// Fill an axis-aligned rectangle with its top-left corner at `pos`.
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Fill an axis-aligned ellipse.
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);

    /// Draw a line of text centered horizontally on `pos`.
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color);

    /// Draw a loaded image. Sinks without image support draw a placeholder box.
    fn draw_image(&mut self, _key: &str, pos: Vec2, size: Vec2) {
        self.fill_rect(pos, size, Color::WHITE);
    }
}

/// Sink that discards everything, for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn fill_rect(&mut self, _pos: Vec2, _size: Vec2, _color: Color) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
    fn fill_ellipse(&mut self, _center: Vec2, _radii: Vec2, _color: Color) {}
    fn draw_text(&mut self, _text: &str, _pos: Vec2, _color: Color) {}
}
