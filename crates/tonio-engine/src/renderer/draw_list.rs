use glam::Vec2;
use serde::Serialize;

use super::sink::{Color, RenderSink};

/// One recorded draw call, in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Rect { x: f32, y: f32, w: f32, h: f32, color: Color },
    Circle { x: f32, y: f32, r: f32, color: Color },
    Ellipse { x: f32, y: f32, rx: f32, ry: f32, color: Color },
    Text { x: f32, y: f32, text: String, color: Color },
    Image { x: f32, y: f32, w: f32, h: f32, key: String },
}

/// Recording render sink.
/// The web bridge ships it to JavaScript as JSON; tests inspect it directly.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Texts drawn this frame, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.commands)
    }
}

impl RenderSink for DrawList {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect { x: pos.x, y: pos.y, w: size.x, h: size.y, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle { x: center.x, y: center.y, r: radius, color });
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.commands.push(DrawCommand::Ellipse {
            x: center.x,
            y: center.y,
            rx: radii.x,
            ry: radii.y,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color) {
        self.commands.push(DrawCommand::Text { x: pos.x, y: pos.y, text: text.to_string(), color });
    }

    fn draw_image(&mut self, key: &str, pos: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::Image { x: pos.x, y: pos.y, w: size.x, h: size.y, key: key.to_string() });
    }
}
