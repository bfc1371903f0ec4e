//! Per-entity, type-erased component storage.
//!
//! A [`ComponentStore`] maps each [`ComponentTypeId`] present on an entity to
//! a boxed value. Values are recovered through `downcast_ref`/`downcast_mut`,
//! so asking for the wrong kind yields `None` rather than reinterpreting
//! memory. New kinds need no registration: the map is open-world.

use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::component::{Component, ComponentTypeId};

/// Result of an emplace attempt.
///
/// Emplace never overwrites: a second emplace of the same kind leaves the
/// first value in place and reports [`EmplaceOutcome::AlreadyPresent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum EmplaceOutcome {
    /// The value was stored.
    Inserted,
    /// A component of this kind already existed; the new value was dropped.
    AlreadyPresent,
}

impl EmplaceOutcome {
    /// Returns `true` if the value was stored.
    #[must_use]
    pub fn is_inserted(self) -> bool {
        matches!(self, Self::Inserted)
    }
}

/// One stored component together with its kind's name.
struct Slot {
    name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

/// The components attached to a single entity.
#[derive(Default)]
pub struct ComponentStore {
    slots: HashMap<ComponentTypeId, Slot>,
}

impl ComponentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Store `value` unless a component of kind `C` is already present.
    pub fn emplace<C: Component>(&mut self, value: C) -> EmplaceOutcome {
        self.emplace_boxed(C::component_type_id(), C::type_name(), Box::new(value))
    }

    /// Type-erased form of [`ComponentStore::emplace`].
    ///
    /// `value` must be a boxed instance of the kind identified by `type_id`;
    /// deferred commands use this to carry values whose type is no longer
    /// statically known.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not of the kind named by `type_id`.
    pub fn emplace_boxed(
        &mut self,
        type_id: ComponentTypeId,
        name: &'static str,
        value: Box<dyn Any + Send + Sync>,
    ) -> EmplaceOutcome {
        assert_eq!(
            (*value).type_id(),
            type_id.type_id(),
            "boxed value does not match component kind `{name}`"
        );
        match self.slots.entry(type_id) {
            Entry::Occupied(_) => EmplaceOutcome::AlreadyPresent,
            Entry::Vacant(slot) => {
                slot.insert(Slot { name, value });
                EmplaceOutcome::Inserted
            }
        }
    }

    /// Returns the component of kind `C`, if present.
    #[must_use]
    pub fn get<C: Component>(&self) -> Option<&C> {
        self.slots
            .get(&C::component_type_id())
            .and_then(|slot| slot.value.downcast_ref::<C>())
    }

    /// Returns the component of kind `C` mutably, if present.
    #[must_use]
    pub fn get_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.slots
            .get_mut(&C::component_type_id())
            .and_then(|slot| slot.value.downcast_mut::<C>())
    }

    /// Returns the component of kind `C`, storing `make()` first if absent.
    pub fn get_or_emplace_with<C: Component>(&mut self, make: impl FnOnce() -> C) -> &mut C {
        let slot = self
            .slots
            .entry(C::component_type_id())
            .or_insert_with(|| Slot {
                name: C::type_name(),
                value: Box::new(make()),
            });
        slot.value
            .downcast_mut::<C>()
            .unwrap_or_else(|| unreachable!("slot keyed by the TypeId of its value"))
    }

    /// Returns `true` if a component of kind `C` is present.
    #[must_use]
    pub fn contains<C: Component>(&self) -> bool {
        self.contains_id(C::component_type_id())
    }

    /// Returns `true` if a component with the given kind ID is present.
    #[must_use]
    pub fn contains_id(&self, type_id: ComponentTypeId) -> bool {
        self.slots.contains_key(&type_id)
    }

    /// Remove and return the component of kind `C`, if present.
    pub fn remove<C: Component>(&mut self) -> Option<C> {
        let slot = self.slots.remove(&C::component_type_id())?;
        slot.value.downcast::<C>().ok().map(|boxed| *boxed)
    }

    /// Returns the number of components stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no components are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the type names of all stored components, sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.slots.values().map(|slot| slot.name).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentStore")
            .field("components", &self.type_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Health(u32);

    #[test]
    fn test_emplace_then_get() {
        let mut store = ComponentStore::new();
        assert_eq!(store.emplace(Position { x: 1.0, y: 2.0 }), EmplaceOutcome::Inserted);
        assert_eq!(store.get::<Position>(), Some(&Position { x: 1.0, y: 2.0 }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_second_emplace_does_not_overwrite() {
        let mut store = ComponentStore::new();
        assert!(store.emplace(Health(10)).is_inserted());
        assert_eq!(store.emplace(Health(99)), EmplaceOutcome::AlreadyPresent);
        assert_eq!(store.get::<Health>(), Some(&Health(10)));
    }

    #[test]
    fn test_missing_kind_is_none() {
        let mut store = ComponentStore::new();
        let _ = store.emplace(Health(1));
        assert!(store.get::<Position>().is_none());
        assert!(store.get_mut::<Position>().is_none());
        assert!(!store.contains::<Position>());
    }

    #[test]
    fn test_get_mut_writes_through() {
        let mut store = ComponentStore::new();
        let _ = store.emplace(Position { x: 0.0, y: 0.0 });
        store.get_mut::<Position>().unwrap().x = 5.0;
        assert_eq!(store.get::<Position>().unwrap().x, 5.0);
    }

    #[test]
    fn test_get_or_emplace_with_is_idempotent() {
        let mut store = ComponentStore::new();
        store.get_or_emplace_with(|| Health(3)).0 += 1;
        store.get_or_emplace_with(|| Health(100)).0 += 1;
        assert_eq!(store.get::<Health>(), Some(&Health(5)));
    }

    #[test]
    fn test_remove_returns_value() {
        let mut store = ComponentStore::new();
        let _ = store.emplace(Health(7));
        assert_eq!(store.remove::<Health>(), Some(Health(7)));
        assert!(store.remove::<Health>().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_emplace_boxed_uses_given_kind() {
        let mut store = ComponentStore::new();
        let outcome = store.emplace_boxed(
            ComponentTypeId::of::<Health>(),
            "Health",
            Box::new(Health(4)),
        );
        assert!(outcome.is_inserted());
        assert_eq!(store.get::<Health>(), Some(&Health(4)));
    }

    #[test]
    #[should_panic(expected = "does not match component kind")]
    fn test_emplace_boxed_rejects_mismatched_value() {
        let mut store = ComponentStore::new();
        let _ = store.emplace_boxed(ComponentTypeId::of::<Health>(), "Health", Box::new(1u8));
    }

    #[test]
    fn test_type_names_sorted() {
        let mut store = ComponentStore::new();
        let _ = store.emplace(Position { x: 0.0, y: 0.0 });
        let _ = store.emplace(Health(1));
        let names = store.type_names();
        assert_eq!(names.len(), 2);
        assert!(names[0] <= names[1]);
    }
}
