//! Axis-aligned box collider.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box centred on the entity's position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Collider {
    /// Half the box width and height, in pixels.
    pub half_extents: Vec2,
}

impl Collider {
    /// A collider `width` × `height` pixels.
    #[must_use]
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            half_extents: Vec2::new(width, height) * 0.5,
        }
    }

    /// Returns `true` if this box at `center` overlaps `other` at `other_center`.
    ///
    /// Touching edges do not count as overlap.
    #[must_use]
    pub fn overlaps(&self, center: Vec2, other: &Collider, other_center: Vec2) -> bool {
        let delta = (center - other_center).abs();
        let reach = self.half_extents + other.half_extents;
        delta.x < reach.x && delta.y < reach.y
    }
}
