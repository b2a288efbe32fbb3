//! Alien Defense - a fixed-timestep arcade shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, motion, spawning, collisions, score)
//! - `settings`: Session configuration and JSON loading
//! - `audio`: Maps simulation events to sound cues for the host layer

pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, GameConfig, SpriteSpec};
pub use sim::{GameState, PlayerIntent, tick};

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 40;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
