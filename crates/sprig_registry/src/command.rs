//! Deferred structural mutations.
//!
//! Systems never change the entity set directly. They record [`Command`]s in
//! the registry's [`CommandQueue`]; the scheduler drains the queue once the
//! current pass over the entity list has finished.
//!
//! ## Invariants
//! - Commands are applied in the order they were recorded.
//! - A spawned entity's ID is allocated when the spawn is recorded, so later
//!   commands in the same queue may target it.
//! - A command whose target no longer exists at apply time is skipped.

use std::any::Any;

use sprig_component::{Component, ComponentTypeId, Entity};

/// A recorded entity-set or component mutation.
pub enum Command {
    /// Make a pre-allocated entity live.
    Spawn {
        /// The ID reserved for the new entity.
        entity: Entity,
        /// Display name; may be empty.
        name: String,
    },

    /// Attach a component unless one of the same kind is already present.
    Emplace {
        /// Target entity.
        entity: Entity,
        /// Kind of `value`.
        type_id: ComponentTypeId,
        /// Kind name, kept for logging.
        type_name: &'static str,
        /// The component value.
        value: Box<dyn Any + Send + Sync>,
    },

    /// Destroy an entity and all of its components.
    Destroy {
        /// Entity to remove.
        entity: Entity,
    },
}

impl Command {
    /// The entity this command targets.
    #[must_use]
    pub fn entity(&self) -> Entity {
        match self {
            Self::Spawn { entity, .. } | Self::Emplace { entity, .. } | Self::Destroy { entity } => {
                *entity
            }
        }
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spawn { entity, name } => f
                .debug_struct("Spawn")
                .field("entity", entity)
                .field("name", name)
                .finish(),
            Self::Emplace {
                entity, type_name, ..
            } => f
                .debug_struct("Emplace")
                .field("entity", entity)
                .field("component", type_name)
                .finish(),
            Self::Destroy { entity } => f.debug_struct("Destroy").field("entity", entity).finish(),
        }
    }
}

/// FIFO queue of pending [`Command`]s.
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Record a command.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Record an emplace of `value` on `entity`.
    pub fn emplace<C: Component>(&mut self, entity: Entity, value: C) {
        self.push(Command::Emplace {
            entity,
            type_id: C::component_type_id(),
            type_name: C::type_name(),
            value: Box::new(value),
        });
    }

    /// Take every pending command, leaving the queue empty.
    pub fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Returns the number of pending commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate pending commands in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }
}

/// Builder returned by a deferred spawn; attaches components to the entity
/// that will be created when the queue is applied.
#[derive(Debug)]
pub struct EntityCommands<'a> {
    entity: Entity,
    queue: &'a mut CommandQueue,
}

impl<'a> EntityCommands<'a> {
    pub(crate) fn new(entity: Entity, queue: &'a mut CommandQueue) -> Self {
        Self { entity, queue }
    }

    /// The ID reserved for the spawned entity.
    #[must_use]
    pub fn id(&self) -> Entity {
        self.entity
    }

    /// Queue a component for the spawned entity.
    #[must_use]
    pub fn with<C: Component>(self, value: C) -> Self {
        self.queue.emplace(self.entity, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_preserves_order() {
        let mut queue = CommandQueue::new();
        let e = Entity::from_raw(1);
        queue.push(Command::Spawn {
            entity: e,
            name: "a".to_string(),
        });
        queue.emplace(e, 5u32);
        queue.push(Command::Destroy { entity: e });

        let kinds: Vec<_> = queue
            .iter()
            .map(|c| match c {
                Command::Spawn { .. } => "spawn",
                Command::Emplace { .. } => "emplace",
                Command::Destroy { .. } => "destroy",
            })
            .collect();
        assert_eq!(kinds, vec!["spawn", "emplace", "destroy"]);
        assert!(queue.iter().all(|c| c.entity() == e));
    }

    #[test]
    fn test_take_empties_queue() {
        let mut queue = CommandQueue::new();
        queue.push(Command::Destroy {
            entity: Entity::from_raw(3),
        });
        assert_eq!(queue.len(), 1);
        let taken = queue.take();
        assert_eq!(taken.len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_entity_commands_with_queues_emplaces() {
        let mut queue = CommandQueue::new();
        let e = Entity::from_raw(9);
        let id = EntityCommands::new(e, &mut queue).with(1u8).with("tag").id();
        assert_eq!(id, e);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_emplace_debug_names_component() {
        let mut queue = CommandQueue::new();
        queue.emplace(Entity::from_raw(2), 1.5f32);
        let rendered = format!("{:?}", queue.iter().next().unwrap());
        assert!(rendered.contains("f32"));
    }
}
