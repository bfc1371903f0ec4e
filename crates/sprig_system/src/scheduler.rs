//! Frame scheduler: runs every system once per frame in registration order.
//!
//! Registration order is the execution order: a system added earlier sees the
//! registry before a later one and its component writes are visible to every
//! later system in the same frame.

use tracing::{debug, info, trace};

use sprig_component::Entity;
use sprig_registry::EntityRegistry;

use crate::context::SystemContext;
use crate::error::ScheduleError;
use crate::system::System;

/// Owns the ordered list of systems and drives one update pass per frame.
#[derive(Default)]
pub struct Scheduler {
    /// Systems in registration (and execution) order.
    systems: Vec<Box<dyn System>>,
    /// Number of frames started so far.
    frame: u64,
    /// Entity snapshot reused across passes.
    snapshot: Vec<Entity>,
}

impl Scheduler {
    /// Create a scheduler with no systems.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a system. It will run after every system added before it.
    pub fn add_system<S: System + 'static>(&mut self, system: S) -> &mut Self {
        info!(
            system = system.name(),
            position = self.systems.len(),
            "registered system"
        );
        self.systems.push(Box::new(system));
        self
    }

    /// Returns the number of registered systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns `true` if no systems are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Returns the number of frames started so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Returns system names in execution order.
    #[must_use]
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Run one frame: every system, in order, each over a snapshot of the
    /// live entities, passing the same `dt` to all of them.
    ///
    /// Commands queued between frames are applied first; commands queued by a
    /// system are applied as soon as its pass ends.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::SystemFailed`] for the first system error.
    /// Remaining entities and systems are skipped for this frame; commands
    /// already queued are kept for the next one.
    pub fn update(&mut self, registry: &mut EntityRegistry, dt: f32) -> Result<(), ScheduleError> {
        self.frame += 1;
        let frame = self.frame;

        let carried = registry.apply_commands();
        debug!(
            frame,
            dt,
            systems = self.systems.len(),
            entities = registry.len(),
            carried,
            "frame start"
        );

        for system in &mut self.systems {
            let query = system.query();
            self.snapshot.clear();
            self.snapshot.extend_from_slice(registry.entities());

            let mut visited = 0usize;
            let mut ctx = SystemContext::new(frame, dt, registry);
            for &entity in &self.snapshot {
                if !query.is_all() && !query.matches(ctx.components(entity)) {
                    continue;
                }
                visited += 1;
                if let Err(source) = system.update(&mut ctx, entity) {
                    return Err(ScheduleError::SystemFailed {
                        system: system.name().to_string(),
                        frame,
                        source: source.into(),
                    });
                }
            }

            let applied = registry.apply_commands();
            trace!(frame, system = system.name(), visited, applied, "system pass complete");
        }

        Ok(())
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("systems", &self.system_names())
            .field("frame", &self.frame)
            .finish()
    }
}
