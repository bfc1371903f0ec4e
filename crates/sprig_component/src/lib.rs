//! # sprig_component
//!
//! The "E" and "C" in ECS: defines what an entity handle is, what counts as a
//! component, and how an entity's components are stored.
//!
//! This crate provides:
//!
//! - [`Entity`]: lightweight `u64` entity handles.
//! - [`EntityAllocator`]: monotonically increasing ID allocator.
//! - [`Component`]: marker trait satisfied by any `Send + Sync + 'static` type.
//! - [`ComponentStore`]: per-entity, type-erased map from kind to value.
//! - [`Query`]: declarative component filter used by systems.

pub mod component;
pub mod entity;
pub mod query;
pub mod store;

pub use component::{Component, ComponentTypeId};
pub use entity::{Entity, EntityAllocator};
pub use query::{Query, QueryFilter};
pub use store::{ComponentStore, EmplaceOutcome};
