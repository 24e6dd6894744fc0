//! Grayscale intensity sources
//!
//! Density-varying sampling and image-derived edge weights read a scalar
//! intensity at domain positions. Any type implementing [`IntensitySampler`]
//! can serve; [`GrayscaleImage`] is the stock 8-bit implementation.

use glam::Vec2;

use crate::config::DOMAIN_SIZE;
use crate::error::{GraphError, Result};

/// Trait for sampling a scalar intensity at positions in the 100×100 domain
pub trait IntensitySampler {
    /// Intensity in `[0, 1]` at `position` (0 = black, 1 = white)
    fn intensity(&self, position: Vec2) -> f32;
}

impl<F> IntensitySampler for F
where
    F: Fn(Vec2) -> f32,
{
    fn intensity(&self, position: Vec2) -> f32 {
        self(position).clamp(0.0, 1.0)
    }
}

/// Row-major 8-bit grayscale image stretched over the logical domain
///
/// Position `(x, y)` maps to pixel `(x / 100 · width, y / 100 · height)`,
/// clamped to the image edge.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayscaleImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl GrayscaleImage {
    /// Wrap a pixel buffer
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the image is empty or `pixels.len() != width * height`
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GraphError::InvalidConfig(format!(
                "image must not be empty (got {}x{})",
                width, height
            )));
        }
        if pixels.len() != width * height {
            return Err(GraphError::InvalidConfig(format!(
                "pixel buffer holds {} values, expected {}x{} = {}",
                pixels.len(),
                width,
                height,
                width * height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is zero
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> u8,
    {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    /// Image width in pixels
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw pixel value, or `None` outside the image
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Pixel coordinate covering a domain position
    fn pixel_at(&self, position: Vec2) -> (usize, usize) {
        let px = (position.x / DOMAIN_SIZE * self.width as f32).floor();
        let py = (position.y / DOMAIN_SIZE * self.height as f32).floor();
        let px = px.clamp(0.0, (self.width - 1) as f32) as usize;
        let py = py.clamp(0.0, (self.height - 1) as f32) as usize;
        (px, py)
    }
}

impl IntensitySampler for GrayscaleImage {
    fn intensity(&self, position: Vec2) -> f32 {
        let (x, y) = self.pixel_at(position);
        self.pixels[y * self.width + x] as f32 / 255.0
    }
}
