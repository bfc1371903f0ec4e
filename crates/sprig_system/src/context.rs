//! Per-pass execution context provided to systems.

use sprig_component::{Component, ComponentStore, EmplaceOutcome, Entity};
use sprig_registry::{EntityCommands, EntityRegistry};

/// Context provided to a system for one pass over the entity list.
///
/// Wraps the registry for the duration of the pass. Component reads, writes,
/// emplaces and removals on live entities take effect immediately; creating
/// or destroying entities is queued and becomes visible once the pass ends.
#[derive(Debug)]
pub struct SystemContext<'a> {
    /// Frame counter, starting at 1 for the first update.
    frame: u64,
    /// Seconds elapsed since the previous frame.
    dt: f32,
    registry: &'a mut EntityRegistry,
}

impl<'a> SystemContext<'a> {
    /// Create a context for one pass.
    #[must_use]
    pub fn new(frame: u64, dt: f32, registry: &'a mut EntityRegistry) -> Self {
        Self { frame, dt, registry }
    }

    /// The current frame number.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Seconds elapsed since the previous frame.
    #[must_use]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Live entities in creation order. Unchanged for the whole pass.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        self.registry.entities()
    }

    /// Earliest-created live entity with the given name.
    #[must_use]
    pub fn get_entity(&self, name: &str) -> Option<Entity> {
        self.registry.get_entity(name)
    }

    /// Returns `true` if `entity` is live.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.registry.contains(entity)
    }

    /// Display name of a live entity.
    #[must_use]
    pub fn name(&self, entity: Entity) -> &str {
        self.registry.name(entity)
    }

    /// See [`EntityRegistry::get_component`].
    #[must_use]
    pub fn get_component<C: Component>(&self, entity: Entity) -> Option<&C> {
        self.registry.get_component(entity)
    }

    /// See [`EntityRegistry::get_component_mut`].
    #[must_use]
    pub fn get_component_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C> {
        self.registry.get_component_mut(entity)
    }

    /// See [`EntityRegistry::has_component`].
    #[must_use]
    pub fn has_component<C: Component>(&self, entity: Entity) -> bool {
        self.registry.has_component::<C>(entity)
    }

    /// See [`EntityRegistry::components`].
    #[must_use]
    pub fn components(&self, entity: Entity) -> &ComponentStore {
        self.registry.components(entity)
    }

    /// See [`EntityRegistry::emplace_component`].
    pub fn emplace_component<C: Component>(&mut self, entity: Entity, value: C) -> EmplaceOutcome {
        self.registry.emplace_component(entity, value)
    }

    /// See [`EntityRegistry::remove_component`].
    pub fn remove_component<C: Component>(&mut self, entity: Entity) -> Option<C> {
        self.registry.remove_component(entity)
    }

    /// Queue the creation of a new entity. It joins the entity list after the
    /// current pass and is first visited by the next system (or next frame).
    pub fn spawn(&mut self, name: impl Into<String>) -> EntityCommands<'_> {
        self.registry.spawn_deferred(name)
    }

    /// Queue the destruction of `entity` after the current pass.
    pub fn destroy(&mut self, entity: Entity) {
        self.registry.destroy_deferred(entity);
    }

    /// Queue an emplace, typically for an entity spawned during this pass.
    pub fn emplace_deferred<C: Component>(&mut self, entity: Entity, value: C) {
        self.registry.emplace_deferred(entity, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_exposes_timing() {
        let mut registry = EntityRegistry::new();
        let ctx = SystemContext::new(3, 0.5, &mut registry);
        assert_eq!(ctx.frame(), 3);
        assert!((ctx.dt() - 0.5).abs() < f32::EPSILON);
        assert!(ctx.entities().is_empty());
    }

    #[test]
    fn test_spawn_is_deferred() {
        let mut registry = EntityRegistry::new();
        let spawned = {
            let mut ctx = SystemContext::new(1, 0.016, &mut registry);
            let id = ctx.spawn("pellet").with(7u32).id();
            assert!(!ctx.contains(id));
            assert!(ctx.entities().is_empty());
            id
        };
        assert_eq!(registry.apply_commands(), 2);
        assert_eq!(registry.get_component::<u32>(spawned), Some(&7));
    }

    #[test]
    fn test_destroy_is_deferred() {
        let mut registry = EntityRegistry::new();
        let e = registry.create_entity("target");
        {
            let mut ctx = SystemContext::new(1, 0.016, &mut registry);
            ctx.destroy(e);
            assert!(ctx.contains(e));
            assert_eq!(ctx.entities(), &[e]);
        }
        let _ = registry.apply_commands();
        assert!(!registry.contains(e));
    }

    #[test]
    fn test_component_writes_are_immediate() {
        let mut registry = EntityRegistry::new();
        let e = registry.create_entity("");
        let mut ctx = SystemContext::new(1, 0.016, &mut registry);
        assert!(ctx.emplace_component(e, 1i32).is_inserted());
        *ctx.get_component_mut::<i32>(e).unwrap() += 1;
        assert_eq!(ctx.get_component::<i32>(e), Some(&2));
        assert!(ctx.has_component::<i32>(e));
        assert_eq!(ctx.remove_component::<i32>(e), Some(2));
        assert!(ctx.components(e).is_empty());
    }
}
