//! Session state and the read-only query surface
//!
//! Everything a running session owns lives in [`GameState`]: config, entities,
//! score, spawn counters, the seeded RNG and this tick's events.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityView};
use super::events::GameEvent;
use super::rect::Rect;
use super::registry::EntityRegistry;
use super::score::ScoreTracker;
use super::spawn::{SpawnScheduler, spawn_alien};
use crate::settings::{ConfigError, GameConfig};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance the simulation
    Playing,
    /// Player destroyed or quit requested; ticks are ignored
    GameOver,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub registry: EntityRegistry,
    pub score: ScoreTracker,
    pub spawner: SpawnScheduler,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
    /// Quit signal, honoured at the next tick boundary
    pub quit_requested: bool,
}

impl GameState {
    /// Start a session: one player at the bottom centre, plus the opening
    /// alien unless the config turns it off.
    ///
    /// Fails if the config does not pass [`GameConfig::validate`].
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut registry = EntityRegistry::new();

        let field = config.field();
        let ship = config.sprites.player;
        registry.add(Entity::player(Rect::from_midbottom(
            IVec2::new(field.center().x, field.bottom()),
            ship.width,
            ship.height,
        )));
        if config.spawn_initial_alien {
            spawn_alien(&mut registry, &config, &mut rng);
        }

        log::info!(
            "Session started with seed {} on a {}x{} field",
            seed,
            config.field_width,
            config.field_height
        );

        Ok(Self {
            seed,
            spawner: SpawnScheduler::new(&config),
            config,
            registry,
            score: ScoreTracker::new(),
            rng,
            time_ticks: 0,
            phase: GamePhase::Playing,
            events: Vec::new(),
            quit_requested: false,
        })
    }

    pub fn score(&self) -> u64 {
        self.score.value()
    }

    /// True once the player is gone or a quit was honoured
    pub fn is_session_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Ask the session to end at the next tick boundary
    pub fn quit(&mut self) {
        self.quit_requested = true;
    }

    /// Copies of every live entity for rendering
    pub fn live_entities(&self) -> Vec<EntityView> {
        self.registry.snapshot()
    }

    /// Events emitted by the last tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand this tick's events to the caller
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn tick_count(&self) -> u64 {
        self.time_ticks
    }
}
