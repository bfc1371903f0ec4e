//! Name-keyed resource loading.
//!
//! [`ResourceProvider`] is the contract game code loads through.
//! [`ResourceCache`] implements it over an in-memory table of file data:
//! the archive or virtual filesystem that fills the table stays outside the
//! engine.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ResourceError;
use crate::handle::Handle;

/// A kind of resource that can be decoded from raw file data.
pub trait Resource: Sized + Send + Sync + 'static {
    /// Decode `bytes` loaded under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if the data is malformed.
    fn decode(name: &str, bytes: &[u8]) -> Result<Self, ResourceError>;
}

/// Loads and unloads resources by logical name.
pub trait ResourceProvider {
    /// Load (or fetch the already-loaded) resource `name` of kind `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if no data exists for `name`, or
    /// [`ResourceError::Decode`] if it cannot be decoded as `T`.
    fn load<T: Resource>(&mut self, name: &str) -> Result<Handle<T>, ResourceError>;

    /// Drop the cache entry for `name` of kind `T`. Handles already given out
    /// stay valid. Returns `false` if nothing was loaded under that name.
    fn unload<T: Resource>(&mut self, name: &str) -> bool;
}

/// In-memory [`ResourceProvider`].
///
/// Loading the same name as the same kind twice returns the same handle until
/// it is unloaded.
#[derive(Default)]
pub struct ResourceCache {
    /// Raw file data by logical name.
    files: HashMap<String, Vec<u8>>,
    /// Loaded handles by (kind, name). Values are `Handle<T>` for that kind.
    loaded: HashMap<(TypeId, String), Box<dyn Any + Send + Sync>>,
}

impl ResourceCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register file data under `name`, replacing any previous data.
    pub fn add_file_data(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        let name = name.into();
        let data = data.into();
        debug!(name = name.as_str(), bytes = data.len(), "registered file data");
        self.files.insert(name, data);
    }

    /// Forget the file data registered under `name`.
    pub fn remove_file_data(&mut self, name: &str) -> bool {
        self.files.remove(name).is_some()
    }

    /// Returns `true` if a resource of kind `T` is loaded under `name`.
    #[must_use]
    pub fn is_loaded<T: Resource>(&self, name: &str) -> bool {
        self.loaded
            .contains_key(&(TypeId::of::<T>(), name.to_string()))
    }

    /// Returns the loaded resource of kind `T` whose handle carries `id`.
    ///
    /// Only resources still in the cache are found; an unloaded resource is
    /// gone even while old handles to it live on.
    #[must_use]
    pub fn get_by_id<T: Resource>(&self, id: Uuid) -> Option<Handle<T>> {
        self.loaded
            .values()
            .filter_map(|entry| entry.downcast_ref::<Handle<T>>())
            .find(|handle| handle.id() == id)
            .cloned()
    }

    /// Returns the number of loaded resources across all kinds.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}

impl ResourceProvider for ResourceCache {
    fn load<T: Resource>(&mut self, name: &str) -> Result<Handle<T>, ResourceError> {
        let key = (TypeId::of::<T>(), name.to_string());
        if let Some(handle) = self
            .loaded
            .get(&key)
            .and_then(|entry| entry.downcast_ref::<Handle<T>>())
        {
            return Ok(handle.clone());
        }

        let bytes = self
            .files
            .get(name)
            .ok_or_else(|| ResourceError::NotFound(name.to_string()))?;
        let handle = Handle::new(name, T::decode(name, bytes)?);
        info!(
            name,
            kind = std::any::type_name::<T>(),
            id = %handle.id(),
            "loaded resource"
        );
        self.loaded.insert(key, Box::new(handle.clone()));
        Ok(handle)
    }

    fn unload<T: Resource>(&mut self, name: &str) -> bool {
        let removed = self
            .loaded
            .remove(&(TypeId::of::<T>(), name.to_string()))
            .is_some();
        if removed {
            debug!(name, kind = std::any::type_name::<T>(), "unloaded resource");
        }
        removed
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("files", &self.files.len())
            .field("loaded", &self.loaded.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Text(String);

    impl Resource for Text {
        fn decode(name: &str, bytes: &[u8]) -> Result<Self, ResourceError> {
            String::from_utf8(bytes.to_vec())
                .map(Text)
                .map_err(|e| ResourceError::Decode {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
        }
    }

    #[derive(Debug)]
    struct Length(usize);

    impl Resource for Length {
        fn decode(_name: &str, bytes: &[u8]) -> Result<Self, ResourceError> {
            Ok(Length(bytes.len()))
        }
    }

    #[test]
    fn test_load_decodes_file_data() {
        let mut cache = ResourceCache::new();
        cache.add_file_data("greeting", "hello");
        let handle = cache.load::<Text>("greeting").unwrap();
        assert_eq!(*handle, Text("hello".to_string()));
        assert_eq!(handle.name(), "greeting");
        assert!(cache.is_loaded::<Text>("greeting"));
    }

    #[test]
    fn test_second_load_returns_same_handle() {
        let mut cache = ResourceCache::new();
        cache.add_file_data("greeting", "hello");
        let a = cache.load::<Text>("greeting").unwrap();
        let b = cache.load::<Text>("greeting").unwrap();
        assert!(Handle::ptr_eq(&a, &b));
        assert_eq!(cache.loaded_count(), 1);
    }

    #[test]
    fn test_same_name_different_kinds_are_separate() {
        let mut cache = ResourceCache::new();
        cache.add_file_data("data", "abc");
        let text = cache.load::<Text>("data").unwrap();
        let len = cache.load::<Length>("data").unwrap();
        assert_eq!(text.0, "abc");
        assert_eq!(len.0, 3);
        assert_eq!(cache.loaded_count(), 2);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let mut cache = ResourceCache::new();
        let err = cache.load::<Text>("nope").unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(ref n) if n == "nope"));
    }

    #[test]
    fn test_decode_error_surfaces() {
        let mut cache = ResourceCache::new();
        cache.add_file_data("bad", vec![0xFF, 0xFE]);
        let err = cache.load::<Text>("bad").unwrap_err();
        assert!(matches!(err, ResourceError::Decode { .. }));
        assert!(!cache.is_loaded::<Text>("bad"));
    }

    #[test]
    fn test_unload_keeps_existing_handles_valid() {
        let mut cache = ResourceCache::new();
        cache.add_file_data("greeting", "hello");
        let handle = cache.load::<Text>("greeting").unwrap();
        assert!(cache.unload::<Text>("greeting"));
        assert!(!cache.unload::<Text>("greeting"));
        assert_eq!(handle.0, "hello");

        let reloaded = cache.load::<Text>("greeting").unwrap();
        assert!(!Handle::ptr_eq(&handle, &reloaded));
    }

    #[test]
    fn test_get_by_id_finds_loaded_handle() {
        let mut cache = ResourceCache::new();
        cache.add_file_data("greeting", "hello");
        cache.add_file_data("other", "bye");
        let handle = cache.load::<Text>("greeting").unwrap();
        let _ = cache.load::<Text>("other").unwrap();

        let found = cache.get_by_id::<Text>(handle.id()).unwrap();
        assert!(Handle::ptr_eq(&found, &handle));
        assert!(cache.get_by_id::<Length>(handle.id()).is_none());
        assert!(cache.get_by_id::<Text>(Uuid::new_v4()).is_none());

        assert!(cache.unload::<Text>("greeting"));
        assert!(cache.get_by_id::<Text>(handle.id()).is_none());
    }

    #[test]
    fn test_remove_file_data() {
        let mut cache = ResourceCache::new();
        cache.add_file_data("x", "1");
        assert!(cache.remove_file_data("x"));
        assert!(!cache.remove_file_data("x"));
        assert!(cache.load::<Text>("x").is_err());
    }
}
