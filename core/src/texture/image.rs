//! Image Texture

use super::*;
use crate::scene::SceneError;
use std::ops::{Add, Mul};

/// Texture backed by a row-major raster and sampled with nearest neighbour
/// lookup. Coordinates outside [0, 1] clamp to the border.
#[derive(Clone, Debug)]
pub struct ImageTexture<T> {
    /// Width in texels.
    width: usize,

    /// Height in texels.
    height: usize,

    /// Texels, `width * height` entries.
    data: Vec<T>,

    /// Average texel value.
    mean: T,
}

impl<T> ImageTexture<T>
where
    T: Copy + Default + Add<Output = T> + Mul<Float, Output = T>,
{
    /// Create a new `ImageTexture`.
    ///
    /// * `width`  - Width in texels.
    /// * `height` - Height in texels.
    /// * `data`   - Row-major texels.
    pub fn new(width: usize, height: usize, data: Vec<T>) -> Result<Self, SceneError> {
        if width == 0 || height == 0 || data.len() != width * height {
            return Err(SceneError::TextureData {
                width,
                height,
                len: data.len(),
            });
        }

        let inv_n = 1.0 / data.len() as Float;
        let mean = data.iter().fold(T::default(), |acc, &v| acc + v * inv_n);

        Ok(Self {
            width,
            height,
            data,
            mean,
        })
    }

    /// Returns the texel at integer coordinates.
    ///
    /// * `x` - Column.
    /// * `y` - Row.
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[y * self.width + x]
    }

    /// Returns the resolution as `(width, height)`.
    pub fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

impl<T> Texture<T> for ImageTexture<T>
where
    T: Copy + Default + Add<Output = T> + Mul<Float, Output = T>,
{
    fn evaluate_uv(&self, u: Float, v: Float) -> T {
        let x = (u * self.width as Float).max(0.0) as usize;
        let y = (v * self.height as Float).max(0.0) as usize;
        self.get(x.min(self.width - 1), y.min(self.height - 1))
    }

    fn mean(&self) -> T {
        self.mean
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
