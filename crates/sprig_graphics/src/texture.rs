//! Texture metadata resource.

use glam::UVec2;

use crate::cache::Resource;
use crate::error::ResourceError;

/// A decoded texture as seen by the engine: its pixel size.
///
/// Pixel data lives with the renderer backend. The in-memory bundle format is
/// a UTF-8 descriptor `"<width>x<height>"`, e.g. `"32x16"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    /// Size in pixels.
    pub size: UVec2,
}

impl Resource for Texture {
    fn decode(name: &str, bytes: &[u8]) -> Result<Self, ResourceError> {
        let fail = |reason: &str| ResourceError::Decode {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        let text = std::str::from_utf8(bytes).map_err(|_| fail("descriptor is not UTF-8"))?;
        let (w, h) = text
            .trim()
            .split_once('x')
            .ok_or_else(|| fail("expected `<width>x<height>`"))?;
        let width = w.parse().map_err(|_| fail("invalid width"))?;
        let height = h.parse().map_err(|_| fail("invalid height"))?;
        Ok(Self {
            size: UVec2::new(width, height),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_descriptor() {
        let tex = Texture::decode("wall", b"32x16\n").unwrap();
        assert_eq!(tex.size, UVec2::new(32, 16));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(Texture::decode("wall", b"32 by 16").is_err());
        assert!(Texture::decode("wall", b"axb").is_err());
        assert!(Texture::decode("wall", &[0xFF]).is_err());
    }
}
