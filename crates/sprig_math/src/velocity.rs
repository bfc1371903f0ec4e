//! Linear velocity component.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Linear velocity in pixels per second.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Velocity {
    /// Velocity vector.
    pub linear: Vec2,
}

impl Velocity {
    /// Zero velocity.
    pub const ZERO: Self = Self { linear: Vec2::ZERO };

    /// Create a new velocity.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            linear: Vec2::new(x, y),
        }
    }

    /// Displacement covered in `dt` seconds.
    #[must_use]
    pub fn step(&self, dt: f32) -> Vec2 {
        self.linear * dt
    }

    /// Returns `true` if the velocity is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.linear == Vec2::ZERO
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::ZERO
    }
}
