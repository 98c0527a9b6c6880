//! Presentation adapter: pushes simulation state into the sprite batch.

use anyhow::Result;
use glam::{Mat4, Vec2, Vec3};
use savanna_core::components::Lion;
use savanna_data::{pico8, Color4f, Food, Giraffe, LionState, Mob, SpriteHandle};
use savanna_engine::SpriteBatch;

use crate::app::playing::Playing;

/// Z layer every actor is drawn on.
pub const ACTOR_LAYER: f32 = -1.0;

pub const GIRAFFE_COLOR: Color4f = pico8::ORANGE;
pub const CARCASS_COLOR: Color4f = pico8::DARK_GRAY;
pub const LION_COLOR: Color4f = pico8::YELLOW;
pub const HUNTING_COLOR: Color4f = pico8::RED;
pub const FOOD_COLOR: Color4f = pico8::GREEN;

/// Translate to the floored position, rotate by orientation, scale by `size`.
#[must_use]
pub fn sprite_transform(position: Vec2, orientation: f32, size: Vec2) -> Mat4 {
    Mat4::from_translation(Vec3::new(position.x.floor(), position.y.floor(), ACTOR_LAYER))
        * Mat4::from_rotation_z(orientation)
        * Mat4::from_scale(size.extend(1.0))
}

fn frame_size<S: SpriteBatch>(sprites: &S, name: &str) -> Vec2 {
    sprites.atlas_frame(name).map_or(Vec2::ONE, |frame| frame.size)
}

/// Presents one frame of `playing` through `sprites` and commits it.
pub fn present<S: SpriteBatch>(playing: &mut Playing, sprites: &mut S, t: f64, dt: f32) -> Result<()> {
    for id in playing.world.take_released_sprites() {
        if let Err(e) = sprites.remove_sprite(id) {
            tracing::warn!(error = %e, "Released sprite was already gone");
        }
    }

    if playing.obstacle_sprites.is_empty() {
        add_obstacle_sprites(playing, sprites)?;
    }
    attach_sprites(playing, sprites)?;

    let debug_draw = playing.debug_draw;
    let world = &playing.world;

    let giraffe_size = frame_size(sprites, "giraffe");
    for (_, (giraffe, mob, handle)) in world.ecs.query::<(&Giraffe, &Mob, &SpriteHandle)>().iter() {
        sprites.transform_sprite(handle.0, sprite_transform(mob.position, mob.orientation, giraffe_size))?;
        let color = if giraffe.dead { CARCASS_COLOR } else { GIRAFFE_COLOR };
        sprites.color_sprite(handle.0, color)?;
        if debug_draw && giraffe.is_alive() {
            sprites.debug_line(mob.position, mob.position + mob.steering_direction, pico8::PINK);
        }
    }

    let lion_size = frame_size(sprites, "lion");
    for (_, (lion, mob, handle)) in world.ecs.query::<(&Lion, &Mob, &SpriteHandle)>().iter() {
        sprites.transform_sprite(handle.0, sprite_transform(mob.position, mob.orientation, lion_size))?;
        let color = if lion.is_hunting() { HUNTING_COLOR } else { LION_COLOR };
        sprites.color_sprite(handle.0, color)?;
        if debug_draw {
            sprites.debug_line(mob.position, mob.position + mob.steering_direction, pico8::PINK);
            let prey = lion
                .locked_giraffe
                .and_then(|giraffe| world.ecs.get::<&Mob>(giraffe).ok().map(|m| m.position));
            if let Some(prey) = prey {
                sprites.debug_line(mob.position, prey, HUNTING_COLOR);
            }
        }
    }

    let food_size = frame_size(sprites, "food");
    for (_, (food, handle)) in world.ecs.query::<(&Food, &SpriteHandle)>().iter() {
        sprites.transform_sprite(handle.0, sprite_transform(food.position, 0.0, food_size))?;
        sprites.color_sprite(handle.0, FOOD_COLOR)?;
    }

    if playing.debug_avoidance {
        for probe in &world.probes {
            match probe.hit {
                Some(hit) => {
                    sprites.debug_line(probe.origin, hit, pico8::RED);
                    sprites.debug_line(hit, probe.end, pico8::LIGHT_GRAY);
                }
                None => sprites.debug_line(probe.origin, probe.end, pico8::LIGHT_GRAY),
            }
        }
    }

    sprites.update_sprites(t, dt);
    sprites.commit_sprites();
    sprites.status_text(&hud_lines(playing));
    Ok(())
}

fn add_obstacle_sprites<S: SpriteBatch>(playing: &mut Playing, sprites: &mut S) -> Result<()> {
    for obstacle in &playing.world.obstacles {
        let frame = obstacle.kind.frame_name();
        let sprite = sprites.add_sprite(frame, obstacle.color)?;
        let size = frame_size(sprites, frame) * obstacle.radius * 2.0;
        sprites.transform_sprite(sprite.id, sprite_transform(obstacle.position, 0.0, size))?;
        playing.obstacle_sprites.push(sprite.id);
    }
    Ok(())
}

/// Gives every actor that has none a sprite of its own.
fn attach_sprites<S: SpriteBatch>(playing: &mut Playing, sprites: &mut S) -> Result<()> {
    let ecs = &mut playing.world.ecs;

    let giraffes: Vec<_> = ecs
        .query::<&Giraffe>()
        .without::<&SpriteHandle>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    let lions: Vec<_> = ecs
        .query::<&Lion>()
        .without::<&SpriteHandle>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    let food: Vec<_> = ecs
        .query::<&Food>()
        .without::<&SpriteHandle>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    for (entities, frame, color) in [
        (giraffes, "giraffe", GIRAFFE_COLOR),
        (lions, "lion", LION_COLOR),
        (food, "food", FOOD_COLOR),
    ] {
        for entity in entities {
            let sprite = sprites.add_sprite(frame, color)?;
            ecs.insert_one(entity, SpriteHandle(sprite.id))?;
        }
    }
    Ok(())
}

fn hud_lines(playing: &Playing) -> Vec<String> {
    let world = &playing.world;
    let hunting = world.lion_states().iter().filter(|s| **s == LionState::Hunting).count();
    let flag = |on: bool| if on { "on" } else { "off" };
    vec![
        format!(" Savanna | tick {} | t {:.1}s ", world.tick, world.time),
        format!(
            "giraffes {}/{}",
            world.live_giraffe_count(),
            world.giraffe_count()
        ),
        format!("lions hunting {}/{}", hunting, world.lion_count()),
        format!(
            "killed {} | eaten {}",
            world.stats.giraffes_killed, world.stats.food_eaten
        ),
        format!(
            "debug {} | probes {}",
            flag(playing.debug_draw),
            flag(playing.debug_avoidance)
        ),
        playing.key_help.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_transform_floors_and_layers() {
        let m = sprite_transform(Vec2::new(10.7, 20.2), 0.0, Vec2::splat(20.0));
        assert_eq!(m.w_axis, glam::Vec4::new(10.0, 20.0, ACTOR_LAYER, 1.0));
        assert!((m.x_axis.x - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_sprite_transform_rotation() {
        let m = sprite_transform(Vec2::ZERO, std::f32::consts::FRAC_PI_2, Vec2::ONE);
        let x = m.x_axis;
        assert!((x.y.atan2(x.x) - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }
}
