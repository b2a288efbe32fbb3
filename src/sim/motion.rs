//! Per-kind motion and animation rules
//!
//! One function, one match over the entity's state. Rules only touch the
//! entity they are given; anything that has to create new entities is handed
//! back to the caller as an [`Aftermath`].

use glam::IVec2;
use rand::Rng;

use super::entity::{Entity, EntityState};
use super::rect::Rect;
use crate::settings::GameConfig;

/// Follow-up work a motion rule asks the tick to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aftermath {
    None,
    /// Spawn an explosion sized to and centred on this rect
    Explode(Rect),
}

/// Uniform pick from {-1, 0, 1}
pub fn roll_drift<R: Rng>(rng: &mut R) -> i32 {
    rng.random_range(-1..=1)
}

/// Advance one entity by one tick.
///
/// `move_dir` is the player's horizontal intent; other kinds ignore it.
pub fn apply_motion_rule<R: Rng>(
    entity: &mut Entity,
    move_dir: i32,
    config: &GameConfig,
    rng: &mut R,
) -> Aftermath {
    if !entity.alive {
        return Aftermath::None;
    }
    let field = config.field();
    let is_alien = matches!(entity.state, EntityState::Alien { .. });

    match &mut entity.state {
        EntityState::Player {
            facing, base_top, ..
        } => {
            let dir = move_dir.signum();
            if dir != 0 {
                *facing = dir;
            }
            entity.rect.move_by(IVec2::new(dir * config.player_speed, 0));
            entity.rect = entity.rect.clamp_to(&field);
            entity.image = if *facing < 0 { 0 } else { 1 };
            // Bob one pixel up and down as the ship travels
            let bob = entity
                .rect
                .left()
                .div_euclid(config.player_bounce.max(1))
                .rem_euclid(2);
            entity.rect.y = *base_top - bob;
        }

        EntityState::Alien { frame } | EntityState::Gift { frame } => {
            let sprite = if is_alien {
                config.sprites.alien
            } else {
                config.sprites.gift
            };

            entity.rect.move_by(entity.vel);
            if !field.contains(&entity.rect) {
                entity.vel.x = -entity.vel.x;
                entity.rect = entity.rect.clamp_to(&field);
            }

            *frame += 1;
            entity.image = (*frame / sprite.animcycle.max(1)) % sprite.frames.max(1);
            if *frame % config.drift_period.max(1) == 0 {
                entity.vel.x = if is_alien { roll_drift(rng) } else { 0 };
            }

            // Only a bottom crossing kills; side exits were clamped above
            if entity.rect.bottom() >= field.bottom() {
                entity.alive = false;
            }
        }

        EntityState::Bomb => {
            entity.rect.move_by(entity.vel);
            if entity.rect.bottom() >= field.bottom() {
                entity.alive = false;
                return Aftermath::Explode(entity.rect);
            }
        }

        EntityState::Shot | EntityState::Rocket => {
            entity.rect.move_by(entity.vel);
            if entity.rect.top() <= field.top() {
                entity.alive = false;
            }
        }

        EntityState::Laser { duration } => {
            *duration += 1;
        }

        EntityState::Explosion { life } => {
            let sprite = config.sprites.explosion;
            *life = life.saturating_sub(1);
            entity.image = (*life / sprite.animcycle.max(1)) % sprite.frames.max(1);
            if *life == 0 {
                entity.alive = false;
            }
        }

        EntityState::Blast => {}
    }

    Aftermath::None
}

/// Gun muzzle position: offset from the ship's centre toward its facing side,
/// at the ship's top edge
pub fn gun_position(player: &Entity, config: &GameConfig) -> IVec2 {
    let facing = match player.state {
        EntityState::Player { facing, .. } => facing,
        _ => 1,
    };
    IVec2::new(
        player.rect.center().x + facing * config.gun_offset,
        player.rect.top(),
    )
}

/// Explosion rect for `actor`: the explosion sprite scaled to the actor's
/// width, centred on the actor
pub fn explosion_rect(actor: &Rect, config: &GameConfig) -> Rect {
    let sprite = config.sprites.explosion;
    let w = actor.w.max(1);
    let h = (sprite.height as i64 * w as i64 / sprite.width.max(1) as i64) as i32;
    Rect::from_center(actor.center(), w, h.max(1))
}
