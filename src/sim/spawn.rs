//! Stochastic spawning of aliens, gifts and bombs

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};
use super::motion::{explosion_rect, roll_drift};
use super::rect::Rect;
use super::registry::EntityRegistry;
use crate::settings::GameConfig;

/// True with probability 1/odds: `floor(U * odds) == 0`
pub fn roll_odds<R: Rng>(rng: &mut R, odds: u32) -> bool {
    let u: f64 = rng.random();
    (u * odds as f64) as u64 == 0
}

/// Reload counters gating alien and gift creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnScheduler {
    pub alien_reload: u32,
    pub gift_reload: u32,
}

impl SpawnScheduler {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            alien_reload: config.alien_reload,
            gift_reload: config.gift_reload,
        }
    }

    /// Run one tick of spawning.
    ///
    /// A non-zero counter only counts down that tick. A counter at zero rolls
    /// every tick until a spawn succeeds, then reloads. Bombs have no counter.
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        registry: &mut EntityRegistry,
        config: &GameConfig,
        rng: &mut R,
    ) {
        if self.alien_reload > 0 {
            self.alien_reload -= 1;
        } else if roll_odds(rng, config.alien_odds) {
            spawn_alien(registry, config, rng);
            self.alien_reload = config.alien_reload;
        }

        if self.gift_reload > 0 {
            self.gift_reload -= 1;
        } else if rng.random::<f64>() < config.gift_odds {
            spawn_gift(registry, config, rng);
            self.gift_reload = config.gift_reload;
        }

        if let Some(alien) = registry.last_alien().map(|a| a.rect) {
            if roll_odds(rng, config.bomb_odds) {
                spawn_bomb(registry, config, &alien);
            }
        }
    }
}

/// Top-of-field rect with a random right edge
fn entry_rect<R: Rng>(config: &GameConfig, w: i32, h: i32, rng: &mut R) -> Rect {
    let hi = config.field_width;
    let lo = config.spawn_min_right.min(hi);
    let mut rect = Rect::new(0, 0, w, h);
    rect.set_right(rng.random_range(lo..=hi));
    rect
}

/// Create an alien at the top of the field; it becomes the bomb source
pub fn spawn_alien<R: Rng>(
    registry: &mut EntityRegistry,
    config: &GameConfig,
    rng: &mut R,
) -> EntityId {
    let s = config.sprites.alien;
    let rect = entry_rect(config, s.width, s.height, rng);
    let id = registry.add(Entity::alien(rect, roll_drift(rng), config.alien_y_speed));
    log::debug!("Alien {} spawned at x={}", id, rect.x);
    id
}

pub fn spawn_gift<R: Rng>(
    registry: &mut EntityRegistry,
    config: &GameConfig,
    rng: &mut R,
) -> EntityId {
    let s = config.sprites.gift;
    let rect = entry_rect(config, s.width, s.height, rng);
    let id = registry.add(Entity::gift(rect, roll_drift(rng), config.gift_y_speed));
    log::debug!("Gift {} spawned at x={}", id, rect.x);
    id
}

/// Explosion sized to and centred on `actor`
pub fn spawn_explosion(
    registry: &mut EntityRegistry,
    config: &GameConfig,
    actor: &Rect,
) -> EntityId {
    let rect = explosion_rect(actor, config);
    registry.add(Entity::explosion(rect, config.explosion_life))
}

/// Drop a bomb just below `alien`
pub fn spawn_bomb(
    registry: &mut EntityRegistry,
    config: &GameConfig,
    alien: &Rect,
) -> EntityId {
    let s = config.sprites.bomb;
    let midbottom = alien.moved(IVec2::new(0, 5)).midbottom();
    registry.add(Entity::bomb(
        Rect::from_midbottom(midbottom, s.width, s.height),
        config.bomb_speed,
    ))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::sim::EntityKind;

    fn config() -> GameConfig {
        GameConfig {
            alien_odds: 1,
            alien_reload: 3,
            gift_odds: 0.0,
            bomb_odds: 1_000_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_roll_odds_one_always_hits() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!((0..100).all(|_| roll_odds(&mut rng, 1)));
    }

    #[test]
    fn test_alien_waits_for_reload() {
        let config = config();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut reg = EntityRegistry::new();
        let mut spawner = SpawnScheduler::new(&config);

        // Three ticks of countdown, then a guaranteed spawn
        for _ in 0..3 {
            spawner.maybe_spawn(&mut reg, &config, &mut rng);
            assert_eq!(reg.count(EntityKind::Alien), 0);
        }
        spawner.maybe_spawn(&mut reg, &config, &mut rng);
        assert_eq!(reg.count(EntityKind::Alien), 1);
        assert_eq!(spawner.alien_reload, 3);
        assert!(reg.last_alien().is_some());
    }

    #[test]
    fn test_failed_roll_keeps_counter_at_zero() {
        let config = GameConfig {
            alien_odds: 1_000_000,
            gift_odds: 0.0,
            ..config()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut reg = EntityRegistry::new();
        let mut spawner = SpawnScheduler {
            alien_reload: 0,
            gift_reload: 0,
        };
        for _ in 0..10 {
            spawner.maybe_spawn(&mut reg, &config, &mut rng);
        }
        assert_eq!(spawner.alien_reload, 0);
        assert_eq!(spawner.gift_reload, 0);
    }

    #[test]
    fn test_gift_spawns_and_reloads() {
        let config = GameConfig {
            gift_odds: 1.0,
            gift_reload: 5,
            alien_reload: 1000,
            ..config()
        };
        let mut rng = Pcg32::seed_from_u64(9);
        let mut reg = EntityRegistry::new();
        let mut spawner = SpawnScheduler {
            alien_reload: 1000,
            gift_reload: 0,
        };
        spawner.maybe_spawn(&mut reg, &config, &mut rng);
        assert_eq!(reg.count(EntityKind::Gift), 1);
        assert_eq!(spawner.gift_reload, 5);
        let gift = reg.live(EntityKind::Gift).next().unwrap();
        assert_eq!(gift.rect.top(), 0);
        assert!(gift.rect.right() >= config.spawn_min_right);
        assert!(gift.rect.right() <= config.field_width);
    }

    #[test]
    fn test_bombs_need_a_live_alien() {
        let config = GameConfig {
            bomb_odds: 1,
            alien_reload: 1000,
            ..config()
        };
        let mut rng = Pcg32::seed_from_u64(4);
        let mut reg = EntityRegistry::new();
        let mut spawner = SpawnScheduler::new(&config);

        spawner.maybe_spawn(&mut reg, &config, &mut rng);
        assert_eq!(reg.count(EntityKind::Bomb), 0);

        let alien = spawn_alien(&mut reg, &config, &mut rng);
        spawner.maybe_spawn(&mut reg, &config, &mut rng);
        assert_eq!(reg.count(EntityKind::Bomb), 1);

        let alien_rect = reg.get(alien).unwrap().rect;
        let bomb = reg.live(EntityKind::Bomb).next().unwrap();
        assert_eq!(bomb.rect.bottom(), alien_rect.bottom() + 5);

        reg.kill(alien);
        spawner.maybe_spawn(&mut reg, &config, &mut rng);
        assert_eq!(reg.count(EntityKind::Bomb), 1);
    }

    #[test]
    fn test_bombs_follow_the_newest_alien() {
        let config = GameConfig {
            bomb_odds: 1,
            alien_reload: 1000,
            ..config()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        let mut reg = EntityRegistry::new();
        let mut spawner = SpawnScheduler::new(&config);

        let older = reg.add(Entity::alien(Rect::new(100, 50, 64, 28), 0, 1));
        let newest = reg.add(Entity::alien(Rect::new(400, 50, 64, 28), 0, 1));

        spawner.maybe_spawn(&mut reg, &config, &mut rng);
        let bomb = reg.live(EntityKind::Bomb).next().unwrap();
        assert_eq!(bomb.rect.midbottom(), IVec2::new(432, 83));

        // The older alien does not take over as bomb source
        reg.kill(newest);
        for _ in 0..5 {
            spawner.maybe_spawn(&mut reg, &config, &mut rng);
        }
        assert!(reg.get_live(older).is_some());
        assert!(reg.last_alien().is_none());
        assert_eq!(reg.count(EntityKind::Bomb), 1);
    }
}
