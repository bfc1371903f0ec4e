//! Headless renderer backend.

use tracing::trace;

use sprig_graphics::{Renderer, Sprite};
use sprig_math::Transform2D;

/// A [`Renderer`] that records draw calls to the trace log instead of a GPU.
#[derive(Debug, Default)]
pub struct LogRenderer {
    draws: u64,
}

impl LogRenderer {
    /// Create a renderer with no draws recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, sprite: &Sprite, transform: &Transform2D) {
        self.draws += 1;
        let size = sprite.world_size(transform);
        trace!(
            draw = self.draws,
            texture = sprite.texture.name(),
            x = transform.position.x,
            y = transform.position.y,
            w = size.x,
            h = size.y,
            "draw"
        );
    }
}
