//! # sprig_system
//!
//! Per-frame behaviour for the sprig ECS.
//!
//! A [`System`] is visited once per matching entity, per frame, in entity
//! creation order. The [`Scheduler`] owns systems in registration order and
//! drives one pass per system each time [`Scheduler::update`] is called:
//!
//! 1. Apply commands queued since the previous frame.
//! 2. For each system: snapshot the entity list, visit every entity its
//!    [`Query`](sprig_component::Query) matches, then apply the commands the
//!    pass queued.
//!
//! Systems reach the registry only through a [`SystemContext`], which allows
//! in-place component access but queues every change to the entity set.
//!
//! ## Usage
//!
//! ```rust
//! use sprig_registry::EntityRegistry;
//! use sprig_system::{FnSystem, Scheduler};
//! use sprig_component::Query;
//!
//! struct Position(f32);
//!
//! let mut registry = EntityRegistry::new();
//! let player = registry.create_entity("player");
//! let _ = registry.emplace_component(player, Position(0.0));
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.add_system(FnSystem::new(
//!     "walk",
//!     Query::all().with::<Position>(),
//!     |ctx, entity| {
//!         let dt = ctx.dt();
//!         if let Some(pos) = ctx.get_component_mut::<Position>(entity) {
//!             pos.0 += dt;
//!         }
//!         Ok(())
//!     },
//! ));
//!
//! scheduler.update(&mut registry, 1.0).unwrap();
//! assert_eq!(registry.get_component::<Position>(player).unwrap().0, 1.0);
//! ```

pub mod context;
pub mod error;
pub mod scheduler;
pub mod system;

pub use context::SystemContext;
pub use error::ScheduleError;
pub use scheduler::Scheduler;
pub use system::{FnSystem, System};
