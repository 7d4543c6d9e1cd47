use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::rng::Rng;
use crate::renderer::sink::{Color, RenderSink};
use crate::world::aabb::Aabb;

/// Kind of static world obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Tree,
    Rock,
}

impl ObstacleKind {
    /// Collision box size in world units.
    pub fn size(self) -> Vec2 {
        match self {
            ObstacleKind::Tree => Vec2::new(40.0, 60.0),
            ObstacleKind::Rock => Vec2::new(20.0, 20.0),
        }
    }
}

/// A static obstacle. Immutable once placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub bounds: Aabb,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, pos: Vec2) -> Self {
        Self {
            kind,
            bounds: Aabb::from_pos_size(pos, kind.size()),
        }
    }

    /// Obstacle with an explicit box, independent of its kind's default size.
    pub fn with_bounds(kind: ObstacleKind, bounds: Aabb) -> Self {
        Self { kind, bounds }
    }

    /// Draw at the given screen position (top-left of the box).
    pub fn draw(&self, sink: &mut dyn RenderSink, screen: Vec2) {
        match self.kind {
            ObstacleKind::Tree => {
                sink.fill_rect(screen + Vec2::new(15.0, 30.0), Vec2::new(10.0, 30.0), Color::TRUNK);
                sink.fill_circle(screen + Vec2::new(20.0, 20.0), 20.0, Color::FOLIAGE);
            }
            ObstacleKind::Rock => {
                sink.fill_ellipse(screen + Vec2::new(10.0, 10.0), Vec2::new(10.0, 8.0), Color::ROCK);
            }
        }
    }
}

/// Parameters for random obstacle placement.
#[derive(Debug, Clone, Copy)]
pub struct ObstacleLayout {
    /// Exact number of obstacles to place.
    pub count: usize,
    /// Obstacles are placed in `[-half_extent, half_extent)` on both axes.
    pub half_extent: f32,
    /// Probability that a placed obstacle is a tree rather than a rock.
    pub tree_probability: f32,
}

impl Default for ObstacleLayout {
    fn default() -> Self {
        Self {
            count: 50,
            half_extent: 1000.0,
            tree_probability: 0.7,
        }
    }
}

/// Scatter `layout.count` obstacles around the origin.
pub fn generate_obstacles(rng: &mut Rng, layout: &ObstacleLayout) -> Vec<Obstacle> {
    let h = layout.half_extent;
    (0..layout.count)
        .map(|_| {
            let pos = Vec2::new(rng.range(-h, h), rng.range(-h, h));
            let kind = if rng.chance(layout.tree_probability) {
                ObstacleKind::Tree
            } else {
                ObstacleKind::Rock
            };
            Obstacle::new(kind, pos)
        })
        .collect()
}
