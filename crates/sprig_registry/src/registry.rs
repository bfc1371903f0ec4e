//! The [`EntityRegistry`]: owner of all entities and their components.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use sprig_component::{Component, ComponentStore, EmplaceOutcome, Entity, EntityAllocator};

use crate::command::{Command, CommandQueue, EntityCommands};

/// Per-entity data held by the registry.
#[derive(Debug)]
struct EntityRecord {
    name: String,
    components: ComponentStore,
}

/// Owns every live entity, its name, and its components.
///
/// Entities are kept in creation order. Per-entity operations treat a null or
/// dead handle as a bug in the caller and panic; missing components and
/// failed name lookups are ordinary `None`/`false` results.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    /// Entity ID allocator. IDs are never reused.
    allocator: EntityAllocator,
    /// Live entities in creation order.
    order: Vec<Entity>,
    /// Name and component store for every live entity.
    records: HashMap<Entity, EntityRecord>,
    /// Deferred mutations awaiting [`EntityRegistry::apply_commands`].
    pending: CommandQueue,
}

impl EntityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Entities ─────────────────────────────────────────────────────

    /// Create a live entity immediately. Pass `""` for an unnamed entity.
    pub fn create_entity(&mut self, name: impl Into<String>) -> Entity {
        let entity = self.allocator.allocate();
        self.insert_record(entity, name.into());
        entity
    }

    /// Returns the earliest-created live entity with the given name.
    ///
    /// Names are not unique; callers needing uniqueness must enforce it.
    #[must_use]
    pub fn get_entity(&self, name: &str) -> Option<Entity> {
        self.order
            .iter()
            .copied()
            .find(|entity| self.records.get(entity).is_some_and(|r| r.name == name))
    }

    /// Returns all live entities in creation order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.order
    }

    /// Returns `true` if `entity` is currently live.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.records.contains_key(&entity)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no entities are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the display name of a live entity.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is null or not live.
    #[must_use]
    pub fn name(&self, entity: Entity) -> &str {
        &self.record(entity).name
    }

    /// Destroy an entity and every component attached to it.
    ///
    /// Returns `false`, with no other effect, if the entity is not live.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is the null handle.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        assert!(entity.is_valid(), "destroy_entity called with a null entity handle");
        let Some(record) = self.records.remove(&entity) else {
            return false;
        };
        if let Some(pos) = self.order.iter().position(|&e| e == entity) {
            self.order.remove(pos);
        }
        debug!(
            entity = entity.id(),
            name = record.name.as_str(),
            components = record.components.len(),
            "destroyed entity"
        );
        true
    }

    /// Destroy the entity [`EntityRegistry::get_entity`] would return for `name`.
    pub fn destroy_entity_named(&mut self, name: &str) -> bool {
        match self.get_entity(name) {
            Some(entity) => self.destroy_entity(entity),
            None => false,
        }
    }

    // ── Components ───────────────────────────────────────────────────

    /// Attach `value` to `entity` unless a component of kind `C` is already
    /// present. An existing component is never overwritten.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is null or not live.
    pub fn emplace_component<C: Component>(&mut self, entity: Entity, value: C) -> EmplaceOutcome {
        let outcome = self.record_mut(entity).components.emplace(value);
        trace!(entity = entity.id(), component = C::type_name(), ?outcome, "emplace");
        outcome
    }

    /// Returns the component of kind `C` on `entity`, storing `make()` first
    /// if it is absent.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is null or not live.
    pub fn get_or_emplace_component_with<C: Component>(
        &mut self,
        entity: Entity,
        make: impl FnOnce() -> C,
    ) -> &mut C {
        self.record_mut(entity).components.get_or_emplace_with(make)
    }

    /// Returns the component of kind `C` on `entity`, if present.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is null or not live.
    #[must_use]
    pub fn get_component<C: Component>(&self, entity: Entity) -> Option<&C> {
        self.record(entity).components.get::<C>()
    }

    /// Returns the component of kind `C` on `entity` mutably, if present.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is null or not live.
    #[must_use]
    pub fn get_component_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C> {
        self.record_mut(entity).components.get_mut::<C>()
    }

    /// Returns `true` if `entity` carries a component of kind `C`.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is null or not live.
    #[must_use]
    pub fn has_component<C: Component>(&self, entity: Entity) -> bool {
        self.record(entity).components.contains::<C>()
    }

    /// Detach and return the component of kind `C`, if present.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is null or not live.
    pub fn remove_component<C: Component>(&mut self, entity: Entity) -> Option<C> {
        self.record_mut(entity).components.remove::<C>()
    }

    /// Returns the full component store of `entity`.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is null or not live.
    #[must_use]
    pub fn components(&self, entity: Entity) -> &ComponentStore {
        &self.record(entity).components
    }

    // ── Deferred mutations ───────────────────────────────────────────

    /// Reserve an entity ID and queue its creation.
    ///
    /// The entity does not appear in [`EntityRegistry::entities`] until
    /// [`EntityRegistry::apply_commands`] runs.
    pub fn spawn_deferred(&mut self, name: impl Into<String>) -> EntityCommands<'_> {
        let entity = self.allocator.allocate();
        self.pending.push(Command::Spawn {
            entity,
            name: name.into(),
        });
        EntityCommands::new(entity, &mut self.pending)
    }

    /// Queue the destruction of `entity`.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is the null handle.
    pub fn destroy_deferred(&mut self, entity: Entity) {
        assert!(entity.is_valid(), "destroy_deferred called with a null entity handle");
        self.pending.push(Command::Destroy { entity });
    }

    /// Queue an emplace of `value` on `entity`.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is the null handle.
    pub fn emplace_deferred<C: Component>(&mut self, entity: Entity, value: C) {
        assert!(entity.is_valid(), "emplace_deferred called with a null entity handle");
        self.pending.emplace(entity, value);
    }

    /// Returns the number of queued commands.
    #[must_use]
    pub fn pending_commands(&self) -> usize {
        self.pending.len()
    }

    /// Apply every queued command in FIFO order and return how many ran.
    pub fn apply_commands(&mut self) -> usize {
        let commands = self.pending.take();
        let applied = commands.len();
        for command in commands {
            self.apply(command);
        }
        if applied > 0 {
            debug!(applied, entities = self.order.len(), "applied deferred commands");
        }
        applied
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Spawn { entity, name } => self.insert_record(entity, name),
            Command::Emplace {
                entity,
                type_id,
                type_name,
                value,
            } => match self.records.get_mut(&entity) {
                Some(record) => {
                    let outcome = record.components.emplace_boxed(type_id, type_name, value);
                    trace!(entity = entity.id(), component = type_name, ?outcome, "deferred emplace");
                }
                None => warn!(
                    entity = entity.id(),
                    component = type_name,
                    "dropping deferred emplace for an entity that is not live"
                ),
            },
            Command::Destroy { entity } => {
                if !self.destroy_entity(entity) {
                    debug!(entity = entity.id(), "deferred destroy of an entity that is not live");
                }
            }
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    fn insert_record(&mut self, entity: Entity, name: String) {
        debug!(entity = entity.id(), name = name.as_str(), "created entity");
        self.order.push(entity);
        self.records.insert(
            entity,
            EntityRecord {
                name,
                components: ComponentStore::new(),
            },
        );
    }

    fn record(&self, entity: Entity) -> &EntityRecord {
        assert!(entity.is_valid(), "null entity handle");
        self.records
            .get(&entity)
            .unwrap_or_else(|| panic!("{entity} is not live in this registry"))
    }

    fn record_mut(&mut self, entity: Entity) -> &mut EntityRecord {
        assert!(entity.is_valid(), "null entity handle");
        self.records
            .get_mut(&entity)
            .unwrap_or_else(|| panic!("{entity} is not live in this registry"))
    }
}
