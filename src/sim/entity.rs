//! Entity types
//!
//! Every simulated object is one [`Entity`]: a rect, a velocity, a liveness
//! flag and a kind-tagged sub-state.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Stable entity identifier, allocated in creation order
pub type EntityId = u32;

/// Behavioural category of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Alien,
    Bomb,
    Shot,
    Rocket,
    Laser,
    Gift,
    Explosion,
    Blast,
}

impl EntityKind {
    /// Number of kinds
    pub const COUNT: usize = 9;

    /// Kinds in per-tick update order
    pub const UPDATE_ORDER: [EntityKind; Self::COUNT] = [
        EntityKind::Player,
        EntityKind::Alien,
        EntityKind::Bomb,
        EntityKind::Shot,
        EntityKind::Rocket,
        EntityKind::Laser,
        EntityKind::Gift,
        EntityKind::Explosion,
        EntityKind::Blast,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Kind-specific state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityState {
    Player {
        /// Last non-zero move direction (-1 left, 1 right)
        facing: i32,
        /// Top edge the ship bobs around
        base_top: i32,
        /// Fire buttons held last tick (edge-triggered firing)
        reloading: bool,
        reloading_rocket: bool,
        reloading_laser: bool,
    },
    Alien {
        frame: u32,
    },
    Gift {
        frame: u32,
    },
    Bomb,
    Shot,
    Rocket,
    Laser {
        /// Ticks since the laser was fired
        duration: u32,
    },
    Explosion {
        /// Ticks left before the explosion disappears
        life: u32,
    },
    Blast,
}

impl EntityState {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityState::Player { .. } => EntityKind::Player,
            EntityState::Alien { .. } => EntityKind::Alien,
            EntityState::Gift { .. } => EntityKind::Gift,
            EntityState::Bomb => EntityKind::Bomb,
            EntityState::Shot => EntityKind::Shot,
            EntityState::Rocket => EntityKind::Rocket,
            EntityState::Laser { .. } => EntityKind::Laser,
            EntityState::Explosion { .. } => EntityKind::Explosion,
            EntityState::Blast => EntityKind::Blast,
        }
    }
}

/// A simulated object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Assigned by the registry on insertion
    pub id: EntityId,
    pub rect: Rect,
    /// Per-tick displacement
    pub vel: IVec2,
    pub alive: bool,
    /// Animation frame index for the renderer
    pub image: u32,
    pub state: EntityState,
}

impl Entity {
    pub fn new(rect: Rect, vel: IVec2, state: EntityState) -> Self {
        Self {
            id: 0,
            rect,
            vel,
            alive: true,
            image: 0,
            state,
        }
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.state.kind()
    }

    /// Mark for removal at the end of the tick
    #[inline]
    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn player(rect: Rect) -> Self {
        Self::new(
            rect,
            IVec2::ZERO,
            EntityState::Player {
                facing: -1,
                base_top: rect.top(),
                reloading: false,
                reloading_rocket: false,
                reloading_laser: false,
            },
        )
    }

    pub fn alien(rect: Rect, x_vel: i32, y_vel: i32) -> Self {
        Self::new(rect, IVec2::new(x_vel, y_vel), EntityState::Alien { frame: 0 })
    }

    pub fn gift(rect: Rect, x_vel: i32, y_vel: i32) -> Self {
        Self::new(rect, IVec2::new(x_vel, y_vel), EntityState::Gift { frame: 0 })
    }

    pub fn bomb(rect: Rect, speed: i32) -> Self {
        Self::new(rect, IVec2::new(0, speed), EntityState::Bomb)
    }

    /// `speed` is the upward distance per tick
    pub fn shot(rect: Rect, speed: i32) -> Self {
        Self::new(rect, IVec2::new(0, -speed), EntityState::Shot)
    }

    /// `speed` is signed, negative moves up
    pub fn rocket(rect: Rect, speed: i32) -> Self {
        Self::new(rect, IVec2::new(0, speed), EntityState::Rocket)
    }

    pub fn laser(rect: Rect) -> Self {
        Self::new(rect, IVec2::ZERO, EntityState::Laser { duration: 0 })
    }

    pub fn explosion(rect: Rect, life: u32) -> Self {
        Self::new(rect, IVec2::ZERO, EntityState::Explosion { life })
    }

    pub fn blast(rect: Rect) -> Self {
        Self::new(rect, IVec2::ZERO, EntityState::Blast)
    }
}

/// Read-only copy of an entity handed to renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: IVec2,
    pub bounds: Rect,
    pub frame: u32,
}

impl From<&Entity> for EntityView {
    fn from(e: &Entity) -> Self {
        Self {
            id: e.id,
            kind: e.kind(),
            position: e.rect.pos(),
            bounds: e.rect,
            frame: e.image,
        }
    }
}
