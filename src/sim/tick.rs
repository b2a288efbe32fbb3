//! Fixed timestep simulation tick
//!
//! One call advances the whole session by one step: motion, player intent,
//! spawning, collisions, then the end-of-tick purge.

use serde::{Deserialize, Serialize};

use super::collision::CollisionResolver;
use super::entity::{Entity, EntityId, EntityKind, EntityState};
use super::events::GameEvent;
use super::motion::{Aftermath, apply_motion_rule, gun_position};
use super::rect::Rect;
use super::spawn::spawn_explosion;
use super::state::{GamePhase, GameState};

/// Player commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIntent {
    /// Horizontal direction: -1 left, 0 still, 1 right
    pub move_dir: i32,
    /// Held fire buttons. Firing happens on the press, not while held.
    pub fire_bullet: bool,
    pub fire_rocket: bool,
    pub fire_laser: bool,
    /// Detonate the rocket in flight, if any
    pub explode_rocket: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, intent: &PlayerIntent) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        return;
    }
    if state.quit_requested {
        log::info!("Quit at tick {}, score {}", state.time_ticks, state.score());
        state.phase = GamePhase::GameOver;
        return;
    }

    state.time_ticks += 1;

    update_all(state, intent.move_dir);
    apply_intent(state, intent);

    state
        .spawner
        .maybe_spawn(&mut state.registry, &state.config, &mut state.rng);

    resolver(state).resolve_all();
    state.registry.remove_dead();

    if state.registry.player().is_none() {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Session over at tick {}, score {}",
            state.time_ticks,
            state.score()
        );
    }
}

fn resolver(state: &mut GameState) -> CollisionResolver<'_> {
    CollisionResolver {
        registry: &mut state.registry,
        score: &mut state.score,
        events: &mut state.events,
        config: &state.config,
    }
}

/// Run every entity's motion rule once, kinds in update order. Entities
/// created while this runs wait for the next tick.
fn update_all(state: &mut GameState, move_dir: i32) {
    let order: Vec<EntityId> = EntityKind::UPDATE_ORDER
        .iter()
        .flat_map(|kind| state.registry.ids(*kind).iter().copied())
        .collect();

    for id in order {
        let Some(entity) = state.registry.get_mut(id) else {
            continue;
        };
        let after = apply_motion_rule(entity, move_dir, &state.config, &mut state.rng);
        if let Aftermath::Explode(rect) = after {
            spawn_explosion(&mut state.registry, &state.config, &rect);
        }
    }
}

/// Fire and detonate according to the intent. Requests that would break a
/// limit (shot cap, one rocket, one laser) are dropped.
fn apply_intent(state: &mut GameState, intent: &PlayerIntent) {
    let Some(player) = state.registry.player() else {
        return;
    };
    let player_id = player.id;
    let gun = gun_position(player, &state.config);
    let EntityState::Player {
        reloading,
        reloading_rocket,
        reloading_laser,
        ..
    } = player.state
    else {
        return;
    };
    let sprites = state.config.sprites.clone();

    if intent.fire_bullet
        && !reloading
        && state.registry.count(EntityKind::Shot) < state.config.max_shots
    {
        let rect = Rect::from_midbottom(gun, sprites.shot.width, sprites.shot.height);
        state
            .registry
            .add(Entity::shot(rect, state.config.shot_speed));
        state.events.push(GameEvent::BulletFired);
    }

    if intent.fire_rocket && !reloading_rocket && state.registry.rocket().is_none() {
        let rect = Rect::from_midbottom(gun, sprites.rocket.width, sprites.rocket.height);
        state
            .registry
            .add(Entity::rocket(rect, state.config.rocket_speed));
        state.events.push(GameEvent::RocketFired);
    }

    if intent.explode_rocket {
        if let Some(rocket) = state.registry.rocket().map(|r| r.id) {
            resolver(state).detonate(rocket);
        }
    }

    if intent.fire_laser && !reloading_laser && state.registry.laser().is_none() {
        let rect = Rect::from_midbottom(gun, sprites.laser.width, sprites.laser.height);
        state.registry.add(Entity::laser(rect));
        state.events.push(GameEvent::LaserFired);
    }

    if let Some(EntityState::Player {
        reloading,
        reloading_rocket,
        reloading_laser,
        ..
    }) = state.registry.get_mut(player_id).map(|p| &mut p.state)
    {
        *reloading = intent.fire_bullet;
        *reloading_rocket = intent.fire_rocket;
        *reloading_laser = intent.fire_laser;
    }
}
