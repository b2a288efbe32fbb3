//! Entity ownership
//!
//! The registry is the only owner of entities. Each entity lives in the
//! unified map and in exactly one per-kind id list; both are updated together.
//! Player, rocket, laser and the most recently spawned alien also have
//! singleton slots.

use std::collections::BTreeMap;

use super::entity::{Entity, EntityId, EntityKind, EntityView};

#[derive(Debug, Clone)]
pub struct EntityRegistry {
    /// Every entity, iterated in ascending id (creation) order
    entities: BTreeMap<EntityId, Entity>,
    /// Ids per kind, indexed by `EntityKind::index`
    groups: [Vec<EntityId>; EntityKind::COUNT],
    player: Option<EntityId>,
    rocket: Option<EntityId>,
    laser: Option<EntityId>,
    last_alien: Option<EntityId>,
    next_id: EntityId,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    /// Empty registry. Ids start at 1; 0 is never handed out.
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            groups: std::array::from_fn(|_| Vec::new()),
            player: None,
            rocket: None,
            laser: None,
            last_alien: None,
            next_id: 1,
        }
    }

    /// Insert an entity, assigning it a fresh id
    pub fn add(&mut self, mut entity: Entity) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        entity.id = id;

        let kind = entity.kind();
        match kind {
            EntityKind::Player => {
                debug_assert!(self.player().is_none(), "second live player");
                self.player = Some(id);
            }
            EntityKind::Rocket => {
                debug_assert!(self.rocket().is_none(), "second live rocket");
                self.rocket = Some(id);
            }
            EntityKind::Laser => {
                debug_assert!(self.laser().is_none(), "second live laser");
                self.laser = Some(id);
            }
            EntityKind::Alien => self.last_alien = Some(id),
            _ => {}
        }

        self.groups[kind.index()].push(id);
        self.entities.insert(id, entity);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Live entity by id; dead ones are treated as absent
    pub fn get_live(&self, id: EntityId) -> Option<&Entity> {
        self.get(id).filter(|e| e.alive)
    }

    /// Mark an entity dead. Returns false if it was already dead or unknown.
    pub fn kill(&mut self, id: EntityId) -> bool {
        match self.entities.get_mut(&id) {
            Some(e) if e.alive => {
                e.kill();
                true
            }
            _ => false,
        }
    }

    /// All entities in id order, including ones killed this tick
    pub fn all(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Ids of one kind in id order
    pub fn ids(&self, kind: EntityKind) -> &[EntityId] {
        &self.groups[kind.index()]
    }

    /// Entities of one kind in id order, including ones killed this tick
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.groups[kind.index()]
            .iter()
            .filter_map(|id| self.entities.get(id))
    }

    /// Live entities of one kind
    pub fn live(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.of_kind(kind).filter(|e| e.alive)
    }

    /// Number of live entities of one kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.live(kind).count()
    }

    /// Total entities held, dead or alive
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn player(&self) -> Option<&Entity> {
        self.player.and_then(|id| self.get_live(id))
    }

    pub fn rocket(&self) -> Option<&Entity> {
        self.rocket.and_then(|id| self.get_live(id))
    }

    pub fn laser(&self) -> Option<&Entity> {
        self.laser.and_then(|id| self.get_live(id))
    }

    /// The most recently spawned alien, if it is still alive
    pub fn last_alien(&self) -> Option<&Entity> {
        self.last_alien.and_then(|id| self.get_live(id))
    }

    /// Purge dead entities from every collection. Run once per tick, after
    /// collisions, so entities killed mid-tick stay visible until then.
    pub fn remove_dead(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|_, e| e.alive);
        let entities = &self.entities;
        for group in &mut self.groups {
            group.retain(|id| entities.contains_key(id));
        }
        for slot in [
            &mut self.player,
            &mut self.rocket,
            &mut self.laser,
            &mut self.last_alien,
        ] {
            if slot.is_some_and(|id| !entities.contains_key(&id)) {
                *slot = None;
            }
        }
        debug_assert!(self.is_consistent());
        before - self.entities.len()
    }

    /// Read-only snapshot of the live population for rendering
    pub fn snapshot(&self) -> Vec<EntityView> {
        self.all().filter(|e| e.alive).map(EntityView::from).collect()
    }

    /// Unified map and kind lists hold exactly the same ids
    pub fn is_consistent(&self) -> bool {
        let grouped: usize = self.groups.iter().map(Vec::len).sum();
        grouped == self.entities.len()
            && self.groups.iter().enumerate().all(|(idx, group)| {
                group.iter().all(|id| {
                    self.entities
                        .get(id)
                        .is_some_and(|e| e.kind().index() == idx)
                })
            })
    }
}
