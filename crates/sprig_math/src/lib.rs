//! # sprig_math
//!
//! 2D math for the sprig ECS. Re-exports [`glam`] for linear algebra and
//! defines the spatial component kinds shared by gameplay and rendering
//! systems. Like every component, they are plain values with no trait impls
//! required by the ECS.

pub mod collider;
pub mod transform;
pub mod velocity;

// Re-export glam types for convenience.
pub use glam::{UVec2, Vec2, Vec4};

pub use collider::Collider;
pub use transform::Transform2D;
pub use velocity::Velocity;
