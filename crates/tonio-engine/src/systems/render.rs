use glam::Vec2;

use crate::components::entity::Entity;
use crate::renderer::sink::{Color, RenderSink};
use crate::world::World;

const HEAD_RADIUS: f32 = 10.0;
const HEAD_OFFSET: f32 = 5.0;
const NAME_OFFSET: f32 = 20.0;

/// Draw one entity at its screen position.
/// Returns `false` when nothing was drawn (inactive, or the transform produced
/// a non-finite position).
pub fn render_entity(entity: &Entity, world: &World, sink: &mut dyn RenderSink) -> bool {
    if !entity.active {
        return false;
    }
    let screen = world.world_to_screen(entity.pos);
    if !screen.is_finite() {
        return false;
    }

    if let Some(player) = &entity.player {
        let w = entity.size().x;
        sink.fill_rect(screen, entity.size(), player.body_color());
        sink.fill_circle(screen + Vec2::new(w / 2.0, -HEAD_OFFSET), HEAD_RADIUS, Color::SKIN);
        sink.draw_text(&player.name, screen + Vec2::new(w / 2.0, -NAME_OFFSET), Color::WHITE);
        return true;
    }

    match &entity.sprite {
        Some(sprite) if sprite.loaded => sink.draw_image(&sprite.image, screen, entity.size()),
        _ => sink.fill_rect(screen, entity.size(), Color::WHITE),
    }
    true
}

/// Draw every entity in order. Returns how many were drawn.
pub fn render_entities<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    world: &World,
    sink: &mut dyn RenderSink,
) -> usize {
    entities.filter(|e| render_entity(e, world, sink)).count()
}
