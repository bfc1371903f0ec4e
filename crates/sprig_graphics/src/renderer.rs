//! Renderer boundary.

use glam::{Vec2, Vec4};
use sprig_math::Transform2D;

use crate::handle::Handle;
use crate::texture::Texture;

/// Drawable sprite component.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Texture to draw.
    pub texture: Handle<Texture>,
    /// Pivot in normalised texture coordinates; `(0.5, 0.5)` is the centre.
    pub origin: Vec2,
    /// RGBA colour multiplier.
    pub tint: Vec4,
}

impl Sprite {
    /// A centred, untinted sprite.
    #[must_use]
    pub fn new(texture: Handle<Texture>) -> Self {
        Self {
            texture,
            origin: Vec2::splat(0.5),
            tint: Vec4::ONE,
        }
    }

    /// Set the pivot.
    #[must_use]
    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = Vec2::new(x, y);
        self
    }

    /// Set the colour multiplier.
    #[must_use]
    pub fn with_tint(mut self, tint: Vec4) -> Self {
        self.tint = tint;
        self
    }

    /// Size of the drawn quad in pixels under `transform`'s scale.
    #[must_use]
    pub fn world_size(&self, transform: &Transform2D) -> Vec2 {
        self.texture.size.as_vec2() * transform.scale
    }
}

/// Receives one draw call per visible sprite per frame.
///
/// Batching and GPU state are the backend's business.
pub trait Renderer {
    /// Queue `sprite` for drawing at `transform`.
    fn draw(&mut self, sprite: &Sprite, transform: &Transform2D);
}
