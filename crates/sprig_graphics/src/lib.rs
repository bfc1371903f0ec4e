//! # sprig_graphics
//!
//! The narrow boundary between the ECS core and the graphics stack.
//!
//! - [`Handle`]: cheap-clone, opaque reference to a loaded resource.
//! - [`Resource`] / [`ResourceProvider`]: load and unload resources by
//!   logical name.
//! - [`ResourceCache`]: in-memory provider backed by a name-keyed file table.
//! - [`Renderer`] / [`Sprite`]: what render systems hand to the backend.
//!
//! Nothing here talks to a GPU. Backends implement [`Renderer`]; file
//! archives feed [`ResourceCache::add_file_data`].

pub mod cache;
pub mod error;
pub mod handle;
pub mod renderer;
pub mod texture;

pub use cache::{Resource, ResourceCache, ResourceProvider};
pub use error::ResourceError;
pub use handle::Handle;
pub use renderer::{Renderer, Sprite};
pub use texture::Texture;
