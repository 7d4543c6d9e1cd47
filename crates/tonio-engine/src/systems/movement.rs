//! Per-entity update: velocity integration, local player control, collision rollback.

use glam::Vec2;
use log::debug;

use crate::components::entity::Entity;
use crate::error::EntityError;
use crate::input::queue::{InputProvider, KeyCode};
use crate::net::link::NetworkLink;
use crate::net::messages::ClientMessage;
use crate::world::World;

/// Everything an entity update may read or talk to, passed explicitly.
pub struct UpdateContext<'a> {
    pub world: &'a World,
    pub input: &'a dyn InputProvider,
    pub network: &'a mut dyn NetworkLink,
}

/// Update one entity, dispatching on its capabilities.
///
/// Remote players are left alone: only network events move them.
pub fn update_entity(entity: &mut Entity, dt: f32, ctx: &mut UpdateContext) -> Result<(), EntityError> {
    if !entity.active {
        return Ok(());
    }

    match entity.player.as_ref().map(|p| p.is_local) {
        Some(true) => {
            if let Some(pos) = move_local_player(entity, dt, ctx.world, ctx.input)? {
                announce_move(pos, ctx.network);
            }
        }
        Some(false) => {}
        None => integrate(entity, dt)?,
    }

    tick_animation(entity, dt);
    Ok(())
}

/// `pos += velocity * dt`. A non-finite result is rolled back and reported.
pub fn integrate(entity: &mut Entity, dt: f32) -> Result<(), EntityError> {
    if !entity.velocity.is_finite() {
        return Err(EntityError::NonFiniteVelocity { id: entity.id.0 });
    }
    let next = entity.pos + entity.velocity * dt;
    if !next.is_finite() {
        return Err(EntityError::NonFinitePosition { id: entity.id.0 });
    }
    entity.pos = next;
    Ok(())
}

/// Velocity requested by the held movement keys, before collision.
/// Diagonals are scaled by 1/√2 so every direction moves at `speed`.
pub fn input_velocity(input: &dyn InputProvider, speed: f32) -> Vec2 {
    let held = |a: KeyCode, b: KeyCode| input.is_key_pressed(a) || input.is_key_pressed(b);

    let mut v = Vec2::ZERO;
    if held(KeyCode::KeyW, KeyCode::ArrowUp) {
        v.y = -speed;
    }
    if held(KeyCode::KeyS, KeyCode::ArrowDown) {
        v.y = speed;
    }
    if held(KeyCode::KeyA, KeyCode::ArrowLeft) {
        v.x = -speed;
    }
    if held(KeyCode::KeyD, KeyCode::ArrowRight) {
        v.x = speed;
    }

    if v.x != 0.0 && v.y != 0.0 {
        v *= std::f32::consts::FRAC_1_SQRT_2;
    }
    v
}

/// Drive the local player from input. An invalid destination reverts both
/// axes to the pre-update position.
/// Returns the new position if the player actually moved.
pub fn move_local_player(
    entity: &mut Entity,
    dt: f32,
    world: &World,
    input: &dyn InputProvider,
) -> Result<Option<Vec2>, EntityError> {
    let speed = match &entity.player {
        Some(p) => p.speed,
        None => return Ok(None),
    };
    let last = entity.pos;

    entity.velocity = input_velocity(input, speed);
    integrate(entity, dt)?;

    if !world.is_valid_box(&entity.bounds()) {
        entity.pos = last;
    }

    Ok((entity.pos != last).then_some(entity.pos))
}

fn announce_move(pos: Vec2, network: &mut dyn NetworkLink) {
    if !network.is_connected() {
        return;
    }
    if let Err(err) = network.send(ClientMessage::PlayerMove { x: pos.x, y: pos.y }) {
        debug!("Position update dropped: {}", err);
    }
}

fn tick_animation(entity: &mut Entity, dt: f32) {
    let Some(anim) = entity.animation.as_mut() else {
        return;
    };
    if anim.tick(dt) {
        if let (Some(frame), Some(sprite)) = (anim.current_frame(), entity.sprite.as_mut()) {
            sprite.image = frame.to_string();
        }
    }
}
