//! Textures

use crate::interaction::SurfaceInteraction;
use crate::pbrt::Float;
use std::sync::Arc;

/// Texture interface.
pub trait Texture<T: Copy> {
    /// Evaluate the texture at surface interaction.
    ///
    /// * `si` - Surface interaction.
    fn evaluate(&self, si: &SurfaceInteraction) -> T {
        self.evaluate_uv(si.uv.x, si.uv.y)
    }

    /// Evaluate the texture at texture coordinates.
    ///
    /// * `u` - U-coordinate in [0, 1].
    /// * `v` - V-coordinate in [0, 1].
    fn evaluate_uv(&self, u: Float, v: Float) -> T;

    /// Returns the average texture value.
    fn mean(&self) -> T;
}

/// Atomic reference counted `Texture`.
pub type ArcTexture<T> = Arc<dyn Texture<T> + Send + Sync>;

mod constant;
mod image;

// Re-export
pub use constant::*;
pub use image::*;
