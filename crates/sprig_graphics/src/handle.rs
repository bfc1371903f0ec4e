//! Shared resource handles.

use std::ops::Deref;
use std::sync::Arc;

use uuid::Uuid;

struct Shared<T> {
    id: Uuid,
    name: String,
    value: T,
}

/// A reference-counted handle to a loaded resource.
///
/// Handles are cheap to clone and safe to store inside components. The ECS
/// never looks inside; only the renderer backend interprets the value.
pub struct Handle<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Handle<T> {
    /// Wrap a freshly loaded value under the given logical name.
    #[must_use]
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                id: Uuid::new_v4(),
                name: name.into(),
                value,
            }),
        }
    }

    /// Unique ID assigned when the resource was loaded.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    /// Logical name the resource was loaded under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Returns `true` if both handles refer to the same loaded resource.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.shared, &b.shared)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Deref for Handle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.shared.value
    }
}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shared.id == other.shared.id
    }
}

impl<T> Eq for Handle<T> {}

impl<T> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("id", &self.shared.id)
            .field("name", &self.shared.name)
            .finish()
    }
}
