//! Constant Texture

use super::*;
use crate::spectrum::*;

/// Implements a texture that returns the same value everywhere.
#[derive(Clone, Debug)]
pub struct ConstantTexture<T> {
    /// The texture value.
    value: T,
}

impl<T> ConstantTexture<T> {
    /// Create a new `ConstantTexture<T>`.
    ///
    /// * `value` - The texture value.
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T> Texture<T> for ConstantTexture<T>
where
    T: Copy,
{
    fn evaluate_uv(&self, _u: Float, _v: Float) -> T {
        self.value
    }

    fn mean(&self) -> T {
        self.value
    }
}

/// Returns a shared constant `Spectrum` texture.
///
/// * `value` - The texture value.
pub fn constant_spectrum(value: Spectrum) -> ArcTexture<Spectrum> {
    Arc::new(ConstantTexture::new(value))
}
