//! Collision detection and resolution
//!
//! Pairs are resolved in a fixed order every tick. Changing the order changes
//! who gets credited when several things hit the same alien, so keep it.
//!
//! Dead entities are never tested; anything killed earlier in the tick is
//! invisible here even though it is still in the registry.

use super::entity::{Entity, EntityId, EntityKind, EntityState};
use super::events::GameEvent;
use super::rect::Rect;
use super::registry::EntityRegistry;
use super::score::ScoreTracker;
use super::spawn::spawn_explosion;
use crate::settings::GameConfig;

/// Borrowed view of the session state collisions are allowed to mutate
pub struct CollisionResolver<'a> {
    pub registry: &'a mut EntityRegistry,
    pub score: &'a mut ScoreTracker,
    pub events: &'a mut Vec<GameEvent>,
    pub config: &'a GameConfig,
}

impl CollisionResolver<'_> {
    /// Run every collision pass for this tick
    pub fn resolve_all(&mut self) {
        self.player_vs_aliens();
        self.player_vs_bombs();
        self.player_vs_gifts();
        self.shots_vs_aliens();
        self.rocket_vs_aliens();
        self.laser_vs_aliens();
    }

    /// Live entities of `kind` overlapping `rect`, in id order
    pub fn overlapping(&self, rect: &Rect, kind: EntityKind) -> Vec<EntityId> {
        self.registry
            .live(kind)
            .filter(|e| e.rect.overlaps(rect))
            .map(|e| e.id)
            .collect()
    }

    fn live_rect(&self, id: EntityId) -> Option<Rect> {
        self.registry.get_live(id).map(|e| e.rect)
    }

    /// Spawn an explosion sized to `actor`
    pub fn explode_at(&mut self, actor: &Rect) -> EntityId {
        spawn_explosion(self.registry, self.config, actor)
    }

    /// Kill an alien with an explosion and a point. No-op if already dead.
    fn destroy_alien(&mut self, id: EntityId) {
        let Some(rect) = self.live_rect(id) else {
            return;
        };
        self.registry.kill(id);
        self.explode_at(&rect);
        self.score.add(self.config.alien_points);
        self.events.push(GameEvent::AlienDestroyed { id });
    }

    fn destroy_player(&mut self, id: EntityId, rect: &Rect) {
        self.explode_at(rect);
        self.registry.kill(id);
        self.events.push(GameEvent::PlayerHit);
        log::info!("Player destroyed, final score {}", self.score.value());
    }

    fn player(&self) -> Option<(EntityId, Rect)> {
        self.registry.player().map(|p| (p.id, p.rect))
    }

    fn player_vs_aliens(&mut self) {
        let Some((player, rect)) = self.player() else {
            return;
        };
        let hits = self.overlapping(&rect, EntityKind::Alien);
        if hits.is_empty() {
            return;
        }
        for alien in hits {
            self.destroy_alien(alien);
        }
        self.destroy_player(player, &rect);
    }

    fn player_vs_bombs(&mut self) {
        let Some((player, rect)) = self.player() else {
            return;
        };
        let hits = self.overlapping(&rect, EntityKind::Bomb);
        if hits.is_empty() {
            return;
        }
        for bomb in hits {
            if let Some(bomb_rect) = self.live_rect(bomb) {
                self.registry.kill(bomb);
                self.explode_at(&bomb_rect);
            }
        }
        self.destroy_player(player, &rect);
    }

    fn player_vs_gifts(&mut self) {
        let Some((_, rect)) = self.player() else {
            return;
        };
        for gift in self.overlapping(&rect, EntityKind::Gift) {
            if self.registry.kill(gift) {
                self.score.add(self.config.gift_points);
                self.events.push(GameEvent::GiftCollected { id: gift });
            }
        }
    }

    /// Each alien takes every shot touching it; a shot spent on one alien
    /// can't hit another.
    fn shots_vs_aliens(&mut self) {
        let aliens: Vec<EntityId> = self.registry.ids(EntityKind::Alien).to_vec();
        for alien in aliens {
            let Some(rect) = self.live_rect(alien) else {
                continue;
            };
            let shots = self.overlapping(&rect, EntityKind::Shot);
            if shots.is_empty() {
                continue;
            }
            for shot in shots {
                self.registry.kill(shot);
            }
            self.destroy_alien(alien);
        }
    }

    /// A rocket touching an alien detonates; its blast does the killing
    fn rocket_vs_aliens(&mut self) {
        let Some(rocket) = self.registry.rocket().map(|r| (r.id, r.rect)) else {
            return;
        };
        if !self.overlapping(&rocket.1, EntityKind::Alien).is_empty() {
            self.detonate(rocket.0);
        }
    }

    /// The beam kills whatever it touches every tick until it runs out
    fn laser_vs_aliens(&mut self) {
        let Some((laser, rect, duration)) = self.registry.laser().map(|l| {
            let duration = match l.state {
                EntityState::Laser { duration } => duration,
                _ => 0,
            };
            (l.id, l.rect, duration)
        }) else {
            return;
        };
        for alien in self.overlapping(&rect, EntityKind::Alien) {
            self.destroy_alien(alien);
        }
        if duration >= self.config.laser_duration {
            self.detonate(laser);
        }
    }

    /// Blow up a rocket or laser.
    ///
    /// A blast centred on the actor kills every alien it touches, leaves an
    /// explosion of its own, and is removed together with the actor. Returns
    /// false if the actor was already gone.
    pub fn detonate(&mut self, actor: EntityId) -> bool {
        let Some(source) = self.registry.get_live(actor) else {
            return false;
        };
        let kind = source.kind();
        let blast_rect = Rect::from_center(
            source.rect.center(),
            self.config.blast_width,
            self.config.blast_height,
        );
        let blast = self.registry.add(Entity::blast(blast_rect));

        let victims = self.overlapping(&blast_rect, EntityKind::Alien);
        log::debug!("{:?} {} detonated, {} aliens caught", kind, actor, victims.len());
        for alien in victims {
            self.destroy_alien(alien);
        }
        self.explode_at(&blast_rect);
        self.registry.kill(actor);
        self.registry.kill(blast);

        self.events.push(match kind {
            EntityKind::Laser => GameEvent::LaserExpired,
            _ => GameEvent::RocketDetonated,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        registry: EntityRegistry,
        score: ScoreTracker,
        events: Vec<GameEvent>,
        config: GameConfig,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                registry: EntityRegistry::new(),
                score: ScoreTracker::new(),
                events: Vec::new(),
                config: GameConfig::default(),
            }
        }

        fn resolver(&mut self) -> CollisionResolver<'_> {
            CollisionResolver {
                registry: &mut self.registry,
                score: &mut self.score,
                events: &mut self.events,
                config: &self.config,
            }
        }

        fn alien(&mut self, x: i32, y: i32) -> EntityId {
            self.registry
                .add(Entity::alien(Rect::new(x, y, 64, 28), 0, 1))
        }
    }

    #[test]
    fn test_shot_kills_alien_once() {
        let mut f = Fixture::new();
        let alien = f.alien(100, 100);
        let s1 = f.registry.add(Entity::shot(Rect::new(110, 110, 4, 16), 11));
        let s2 = f.registry.add(Entity::shot(Rect::new(120, 110, 4, 16), 11));
        let miss = f.registry.add(Entity::shot(Rect::new(400, 400, 4, 16), 11));

        f.resolver().resolve_all();

        assert!(f.registry.get_live(alien).is_none());
        assert!(f.registry.get_live(s1).is_none());
        assert!(f.registry.get_live(s2).is_none());
        assert!(f.registry.get_live(miss).is_some());
        assert_eq!(f.score.value(), 1);
        assert_eq!(f.registry.count(EntityKind::Explosion), 1);
    }

    #[test]
    fn test_one_shot_one_alien() {
        let mut f = Fixture::new();
        let a = f.alien(100, 100);
        let b = f.alien(100, 120);
        // Touches both aliens; the lower id takes it
        f.registry.add(Entity::shot(Rect::new(110, 120, 4, 10), 11));

        f.resolver().resolve_all();

        assert!(f.registry.get_live(a).is_none());
        assert!(f.registry.get_live(b).is_some());
        assert_eq!(f.score.value(), 1);
    }

    #[test]
    fn test_rocket_kill_chain() {
        let mut f = Fixture::new();
        let alien = f.alien(100, 100);
        let rocket = f
            .registry
            .add(Entity::rocket(Rect::new(120, 110, 24, 32), -11));

        f.resolver().resolve_all();

        assert!(f.registry.get_live(alien).is_none());
        assert!(f.registry.get_live(rocket).is_none());
        assert_eq!(f.score.value(), 1);
        assert_eq!(f.registry.count(EntityKind::Explosion), 2);
        assert_eq!(f.registry.count(EntityKind::Blast), 0);
        assert!(f.events.contains(&GameEvent::RocketDetonated));
    }

    #[test]
    fn test_blast_catches_nearby_aliens() {
        let mut f = Fixture::new();
        let near = f.alien(300, 300);
        let far = f.alien(0, 900);
        let rocket = f
            .registry
            .add(Entity::rocket(Rect::new(150, 300, 24, 32), -11));

        assert!(f.resolver().detonate(rocket));
        assert!(f.registry.get_live(near).is_none());
        assert!(f.registry.get_live(far).is_some());
        assert!(!f.resolver().detonate(rocket));
        assert_eq!(f.score.value(), 1);
    }

    #[test]
    fn test_player_alien_collision_ends_session() {
        let mut f = Fixture::new();
        let player = f.registry.add(Entity::player(Rect::new(100, 900, 66, 42)));
        let alien = f.alien(110, 880);

        f.resolver().resolve_all();

        assert!(f.registry.player().is_none());
        assert!(f.registry.get_live(alien).is_none());
        assert!(f.registry.get(player).is_some_and(|p| !p.alive));
        assert_eq!(f.score.value(), 1);
        assert_eq!(f.registry.count(EntityKind::Explosion), 2);
        assert!(f.events.contains(&GameEvent::PlayerHit));
    }

    #[test]
    fn test_bomb_hits_player_without_score() {
        let mut f = Fixture::new();
        f.registry.add(Entity::player(Rect::new(100, 900, 66, 42)));
        let bomb = f.registry.add(Entity::bomb(Rect::new(120, 890, 10, 18), 4));

        f.resolver().resolve_all();

        assert!(f.registry.player().is_none());
        assert!(f.registry.get_live(bomb).is_none());
        assert_eq!(f.score.value(), 0);
        assert_eq!(f.registry.count(EntityKind::Explosion), 2);
        assert_eq!(
            f.events.iter().filter(|e| **e == GameEvent::PlayerHit).count(),
            1
        );
    }

    #[test]
    fn test_gift_pickup() {
        let mut f = Fixture::new();
        f.registry.add(Entity::player(Rect::new(100, 900, 66, 42)));
        let gift = f.registry.add(Entity::gift(Rect::new(110, 880, 32, 32), 0, 2));

        f.resolver().resolve_all();

        assert!(f.registry.player().is_some());
        assert!(f.registry.get_live(gift).is_none());
        assert_eq!(f.score.value(), 10);
        assert_eq!(f.registry.count(EntityKind::Explosion), 0);
        assert_eq!(f.events, vec![GameEvent::GiftCollected { id: gift }]);
    }

    #[test]
    fn test_laser_kills_each_tick_then_expires() {
        let mut f = Fixture::new();
        f.config.laser_duration = 2;
        let laser = f.registry.add(Entity::laser(Rect::new(100, 0, 8, 600)));
        let a = f.alien(90, 100);

        f.resolver().resolve_all();
        assert!(f.registry.get_live(a).is_none());
        assert!(f.registry.laser().is_some());

        let b = f.alien(90, 200);
        if let Some(l) = f.registry.get_mut(laser) {
            l.state = EntityState::Laser { duration: 2 };
        }
        f.resolver().resolve_all();
        assert!(f.registry.get_live(b).is_none());
        assert!(f.registry.laser().is_none());
        assert_eq!(f.score.value(), 2);
        assert!(f.events.contains(&GameEvent::LaserExpired));
    }

    #[test]
    fn test_resolving_twice_changes_nothing() {
        let mut f = Fixture::new();
        f.registry.add(Entity::player(Rect::new(100, 900, 66, 42)));
        f.alien(110, 880);
        f.alien(300, 300);
        f.registry.add(Entity::shot(Rect::new(310, 310, 4, 16), 11));
        f.registry.add(Entity::gift(Rect::new(90, 890, 32, 32), 0, 2));

        f.resolver().resolve_all();
        let score = f.score.value();
        let events = f.events.len();
        let entities = f.registry.len();

        f.resolver().resolve_all();
        assert_eq!(f.score.value(), score);
        assert_eq!(f.events.len(), events);
        assert_eq!(f.registry.len(), entities);
    }
}
