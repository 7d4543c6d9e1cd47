pub mod aabb;
pub mod camera;
pub mod obstacle;

use glam::Vec2;

use crate::renderer::sink::{Color, RenderSink};
use aabb::Aabb;
use camera::Camera2D;
use obstacle::Obstacle;

/// The scrolling world: a camera plus a set of static obstacles.
pub struct World {
    camera: Camera2D,
    obstacles: Vec<Obstacle>,
}

impl World {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            camera: Camera2D::new(viewport_width, viewport_height),
            obstacles: Vec::new(),
        }
    }

    /// Create a world with an initial obstacle set.
    pub fn with_obstacles(mut self, obstacles: Vec<Obstacle>) -> Self {
        self.obstacles = obstacles;
        self
    }

    /// Append an obstacle. The set only grows during a session.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera2D {
        &mut self.camera
    }

    /// Resize the viewport. Takes effect for the next transform.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
    }

    /// Track the given entity position, if any.
    pub fn update(&mut self, dt: f32, tracked: Option<Vec2>) {
        if let Some(target) = tracked {
            self.camera.follow(target, dt);
        }
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.camera.world_to_screen(world)
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.camera.screen_to_world(screen)
    }

    /// `false` iff the box overlaps any obstacle. Linear scan.
    pub fn is_valid_position(&self, x: f32, y: f32, width: f32, height: f32) -> bool {
        self.is_valid_box(&Aabb::new(x, y, width, height))
    }

    pub fn is_valid_box(&self, candidate: &Aabb) -> bool {
        !self.obstacles.iter().any(|o| o.bounds.overlaps(candidate))
    }

    /// Draw the ground and every obstacle inside the viewport.
    /// Returns the number of obstacles drawn.
    pub fn render(&self, sink: &mut dyn RenderSink) -> usize {
        sink.fill_rect(Vec2::ZERO, self.camera.viewport, Color::GRASS);

        let mut drawn = 0;
        for obstacle in &self.obstacles {
            if !self.camera.is_rect_visible(&obstacle.bounds) {
                continue;
            }
            obstacle.draw(sink, self.world_to_screen(obstacle.bounds.pos));
            drawn += 1;
        }
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw_list::DrawList;
    use super::obstacle::ObstacleKind;

    #[test]
    fn update_snaps_camera_to_tracked() {
        let mut world = World::new(800.0, 600.0);
        world.update(0.016, Some(Vec2::new(123.0, -45.0)));
        assert_eq!(world.camera().center, Vec2::new(123.0, -45.0));
    }

    #[test]
    fn update_without_tracked_keeps_camera() {
        let mut world = World::new(800.0, 600.0);
        world.update(0.016, Some(Vec2::new(10.0, 10.0)));
        world.update(0.016, None);
        assert_eq!(world.camera().center, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn world_to_screen_offsets_by_half_viewport() {
        let world = World::new(800.0, 600.0);
        assert_eq!(world.world_to_screen(Vec2::ZERO), Vec2::new(400.0, 300.0));
        assert_eq!(world.screen_to_world(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn valid_position_against_single_obstacle() {
        let world = World::new(800.0, 600.0).with_obstacles(vec![Obstacle::with_bounds(
            ObstacleKind::Rock,
            Aabb::new(110.0, 100.0, 20.0, 20.0),
        )]);
        assert!(world.is_valid_position(0.0, 0.0, 30.0, 50.0));
        assert!(!world.is_valid_position(100.0, 100.0, 30.0, 50.0));
        // touching the obstacle's left edge is allowed
        assert!(world.is_valid_position(80.0, 100.0, 30.0, 50.0));
    }

    #[test]
    fn empty_world_is_valid_everywhere() {
        let world = World::new(800.0, 600.0);
        assert!(world.is_valid_position(-1e6, 1e6, 500.0, 500.0));
    }

    #[test]
    fn render_culls_offscreen_obstacles() {
        let mut world = World::new(200.0, 200.0);
        world.add_obstacle(Obstacle::new(ObstacleKind::Rock, Vec2::new(10.0, 10.0)));
        world.add_obstacle(Obstacle::new(ObstacleKind::Tree, Vec2::new(-60.0, -60.0)));
        world.add_obstacle(Obstacle::new(ObstacleKind::Rock, Vec2::new(5000.0, 0.0)));
        world.add_obstacle(Obstacle::new(ObstacleKind::Tree, Vec2::new(0.0, -900.0)));

        let mut list = DrawList::new();
        let drawn = world.render(&mut list);
        assert_eq!(drawn, 2);
        // background + rock ellipse + tree trunk and foliage
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn render_follows_camera() {
        let mut world = World::new(200.0, 200.0);
        world.add_obstacle(Obstacle::new(ObstacleKind::Rock, Vec2::new(5000.0, 0.0)));
        let mut list = DrawList::new();
        assert_eq!(world.render(&mut list), 0);

        world.update(0.016, Some(Vec2::new(5000.0, 0.0)));
        list.clear();
        assert_eq!(world.render(&mut list), 1);
    }

    #[test]
    fn resize_is_picked_up_by_transform() {
        let mut world = World::new(800.0, 600.0);
        world.resize(400.0, 400.0);
        assert_eq!(world.world_to_screen(Vec2::ZERO), Vec2::new(200.0, 200.0));
    }
}
