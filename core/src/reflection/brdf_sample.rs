//! BRDF Sample

use crate::geometry::*;
use crate::spectrum::*;

/// Stores the result of sampling a BRDF.
#[derive(Copy, Clone, Debug, Default)]
pub struct BrdfSample {
    /// Sampled outgoing direction in the shading frame.
    pub wo: Vector3f,

    /// Cosine weighted BRDF value divided by the PDF of `wo`.
    pub value: Spectrum,
}

impl BrdfSample {
    /// Returns a new `BrdfSample`.
    ///
    /// * `wo`    - Sampled outgoing direction.
    /// * `value` - Cosine weighted BRDF value divided by the PDF.
    pub fn new(wo: Vector3f, value: Spectrum) -> Self {
        Self { wo, value }
    }
}
