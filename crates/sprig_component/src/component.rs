//! Core [`Component`] trait and component kind identity.
//!
//! Any `Send + Sync + 'static` type is a component: the trait is blanket
//! implemented, so gameplay code never writes an `impl Component` block and no
//! closed list of kinds exists anywhere in the engine.
//!
//! ## Kind Identity
//!
//! [`ComponentTypeId`] wraps [`std::any::TypeId`]. It is stable for the
//! lifetime of the process, which is all in-memory storage needs; it is not
//! meant to be persisted or sent across process boundaries.

use std::any::{Any, TypeId};

/// A unique identifier for a component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentTypeId(TypeId);

impl ComponentTypeId {
    /// Returns the [`ComponentTypeId`] for component type `C`.
    #[must_use]
    pub fn of<C: Component>() -> Self {
        Self(TypeId::of::<C>())
    }

    /// Returns the underlying [`TypeId`].
    #[must_use]
    pub fn type_id(self) -> TypeId {
        self.0
    }
}

/// The component marker trait.
///
/// Components must be `Send + Sync` so a future parallel scheduler can hand
/// disjoint entity sets to worker threads without changing component types.
///
/// # Examples
///
/// ```rust
/// use sprig_component::{Component, ComponentTypeId};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// assert_eq!(Health::component_type_id(), ComponentTypeId::of::<Health>());
/// ```
pub trait Component: Any + Send + Sync {
    /// Returns the [`ComponentTypeId`] for this component.
    fn component_type_id() -> ComponentTypeId
    where
        Self: Sized,
    {
        ComponentTypeId::of::<Self>()
    }

    /// A human-readable name for this component kind, used in logs and panics.
    fn type_name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}

impl<T: Any + Send + Sync> Component for T {}
