//! Side-effect events
//!
//! Emitted during a tick for the audio/visual layer to consume. The
//! simulation never calls into audio or rendering itself.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An alien was destroyed by the player, a shot, a blast or the laser
    AlienDestroyed { id: EntityId },
    /// The player ship was destroyed; the session is over
    PlayerHit,
    /// The player picked up a gift
    GiftCollected { id: EntityId },
    BulletFired,
    RocketFired,
    LaserFired,
    /// A rocket blew up, by command or on contact
    RocketDetonated,
    /// A laser ran out and released its blast
    LaserExpired,
}
