//! Orthonormal Frames

use super::{Dot, Vector3f};
use crate::pbrt::abs;

/// An orthonormal basis used to move directions between world space and a
/// local shading space in which the normal is +z.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    /// First tangent.
    pub s: Vector3f,

    /// Second tangent.
    pub t: Vector3f,

    /// Normal.
    pub n: Vector3f,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            s: Vector3f::new(1.0, 0.0, 0.0),
            t: Vector3f::new(0.0, 1.0, 0.0),
            n: Vector3f::new(0.0, 0.0, 1.0),
        }
    }
}

impl Frame {
    /// Returns a frame whose third axis is the given unit normal.
    ///
    /// * `n` - Unit normal.
    pub fn from_normal(n: &Vector3f) -> Self {
        let (s, t) = coordinate_system(n);
        Self { s, t, n: *n }
    }

    /// Transforms a world space direction into the frame.
    ///
    /// * `v` - World space direction.
    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.s), v.dot(&self.t), v.dot(&self.n))
    }

    /// Transforms a local direction back into world space.
    ///
    /// * `v` - Local direction.
    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.s * v.x + self.t * v.y + self.n * v.z
    }
}

/// Create a new coordinate system from a single unit vector and return
/// the two tangent vectors. `(v2, v3, v1)` is right handed.
///
/// * `v1` - The unit vector.
pub fn coordinate_system(v1: &Vector3f) -> (Vector3f, Vector3f) {
    let v2 = if abs(v1.x) > abs(v1.y) {
        Vector3f::new(-v1.z, 0.0, v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3f::new(0.0, v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };

    let v3 = v1.cross(&v2);

    (v2, v3)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
