use glam::Vec2;
use crate::world::aabb::Aabb;

/// Viewport camera for the scrolling world.
/// `center` is the world point shown in the middle of the viewport;
/// screen space is in pixels with the origin at the viewport's top-left.
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Camera center position in world space.
    pub center: Vec2,
    /// Viewport size in pixels.
    pub viewport: Vec2,
    /// Smoothing factor for camera follow (0.0 = snap, the default).
    pub smoothing: f32,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            viewport: Vec2::new(width.max(0.0), height.max(0.0)),
            smoothing: 0.0,
        }
    }

    /// Resize the viewport (e.g. on window resize).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(0.0), height.max(0.0));
    }

    /// Set smoothing factor for camera movement.
    /// 0.0 = instant snap, 0.9 = very smooth/slow.
    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = smoothing.clamp(0.0, 0.99);
    }

    /// Move camera center to target position.
    pub fn look_at(&mut self, target: Vec2) {
        self.center = target;
    }

    /// Follow a target. Snaps unless smoothing was explicitly enabled.
    pub fn follow(&mut self, target: Vec2, dt: f32) {
        if self.smoothing <= 0.0 {
            self.look_at(target);
        } else {
            let lerp_factor = 1.0 - self.smoothing.powf(dt * 60.0);
            self.center += (target - self.center) * lerp_factor;
        }
    }

    /// World position of the viewport's top-left corner.
    pub fn top_left(&self) -> Vec2 {
        self.center - self.viewport / 2.0
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.top_left()
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.top_left()
    }

    /// Visible world rectangle.
    pub fn visible_rect(&self) -> Aabb {
        Aabb::from_pos_size(self.top_left(), self.viewport)
    }

    /// Check if a world-space box intersects the viewport.
    /// Boxes touching the viewport edge count as visible.
    pub fn is_rect_visible(&self, rect: &Aabb) -> bool {
        let view = self.visible_rect();
        let (left, top) = (view.min().x, view.min().y);
        let (right, bottom) = (view.max().x, view.max().y);
        !(rect.pos.x + rect.size.x < left
            || rect.pos.x > right
            || rect.pos.y + rect.size.y < top
            || rect.pos.y > bottom)
    }
}
