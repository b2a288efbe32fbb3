//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod collision;
pub mod entity;
pub mod events;
pub mod motion;
pub mod rect;
pub mod registry;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::SimulationClock;
pub use collision::CollisionResolver;
pub use entity::{Entity, EntityId, EntityKind, EntityState, EntityView};
pub use events::GameEvent;
pub use motion::{Aftermath, apply_motion_rule};
pub use rect::Rect;
pub use registry::EntityRegistry;
pub use score::ScoreTracker;
pub use spawn::SpawnScheduler;
pub use state::{GamePhase, GameState};
pub use tick::{PlayerIntent, tick};
