//! # sprig_registry
//!
//! The entity registry is the single owner of every entity and every component
//! value in a game. It offers two mutation paths:
//!
//! - **Immediate**: [`EntityRegistry::create_entity`],
//!   [`EntityRegistry::destroy_entity`] and friends, for setup code and
//!   anything else running between frames.
//! - **Deferred**: [`EntityRegistry::spawn_deferred`],
//!   [`EntityRegistry::destroy_deferred`] and
//!   [`EntityRegistry::emplace_deferred`] record [`Command`]s that are applied
//!   in FIFO order by [`EntityRegistry::apply_commands`]. Systems only see this
//!   path, so the entity list never changes under an iteration in progress.

pub mod command;
pub mod registry;

pub use command::{Command, CommandQueue, EntityCommands};
pub use registry::EntityRegistry;
pub use sprig_component::{Component, ComponentStore, EmplaceOutcome, Entity};
