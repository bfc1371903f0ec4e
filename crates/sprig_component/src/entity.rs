//! Entity handles and the ID allocator behind them.

use serde::{Deserialize, Serialize};

/// Opaque handle naming one entity in one registry.
///
/// A handle is a plain `u64`: copying it never touches the registry, and it
/// says nothing about whether the entity is still alive. Ask the registry.
/// ID 0 is never issued and serves as the null handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity(u64);

impl Entity {
    /// The null handle. No registry ever issues it.
    pub const INVALID: Entity = Entity(0);

    /// Wrap a raw ID. Mostly useful in tests and when decoding saved handles.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The raw ID.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// `false` only for [`Entity::INVALID`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity #{}", self.0)
    }
}

/// Hands out entity IDs in increasing order, starting at 1.
///
/// Retired IDs are never handed out again, so a stale handle can only ever
/// miss; it cannot alias a newer entity.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    issued: u64,
}

impl EntityAllocator {
    /// An allocator that has issued nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ID.
    ///
    /// # Panics
    ///
    /// Panics if the `u64` ID space is exhausted.
    pub fn allocate(&mut self) -> Entity {
        self.issued = self
            .issued
            .checked_add(1)
            .unwrap_or_else(|| panic!("entity ID space exhausted"));
        Entity(self.issued)
    }
}
