//! Sound cues for the host layer
//!
//! The simulation only emits [`GameEvent`]s. This module turns them into
//! sound cues with a volume; actually playing them is up to the host.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Something blew up
    Boom,
    /// A weapon was fired
    Shoot,
    /// A gift was picked up
    Collect,
}

impl SoundEffect {
    /// Asset file conventionally bound to this effect
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Boom => "boom.wav",
            SoundEffect::Shoot => "car_door.wav",
            SoundEffect::Collect => "collect.wav",
        }
    }

    /// Cue for an event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::AlienDestroyed { .. }
            | GameEvent::PlayerHit
            | GameEvent::RocketDetonated
            | GameEvent::LaserExpired => Some(SoundEffect::Boom),
            GameEvent::BulletFired | GameEvent::RocketFired | GameEvent::LaserFired => {
                Some(SoundEffect::Shoot)
            }
            GameEvent::GiftCollected { .. } => Some(SoundEffect::Collect),
        }
    }
}

/// A sound to play at a given volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub effect: SoundEffect,
    pub volume: f32,
}

/// Volume state and event-to-cue mapping
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Cues for one tick's events. Repeats of the same effect within a tick
    /// collapse into one cue.
    pub fn cues(&self, events: &[GameEvent]) -> Vec<Cue> {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return Vec::new();
        }

        let mut cues: Vec<Cue> = Vec::new();
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            if !cues.iter().any(|c| c.effect == effect) {
                cues.push(Cue { effect, volume });
            }
        }
        cues
    }
}
