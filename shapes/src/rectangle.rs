//! Rectangles

use super::*;

/// A planar parallelogram spanned by two half-edge vectors around a centre.
/// Corners are `center ± half_u ± half_v` and the normal is
/// `normalize(half_u × half_v)`. Hits from either side report that normal.
#[derive(Copy, Clone, Debug)]
pub struct Rectangle {
    /// Centre.
    pub center: Point3f,

    /// Half of the first edge.
    pub half_u: Vector3f,

    /// Half of the second edge.
    pub half_v: Vector3f,

    /// Unit normal.
    pub normal: Vector3f,
}

impl Default for Rectangle {
    /// Returns the 2x2 square in the z = 0 plane facing +z.
    fn default() -> Self {
        Self::new(
            Point3f::zero(),
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
        )
    }
}

impl Rectangle {
    /// Create a new rectangle.
    ///
    /// * `center` - Centre.
    /// * `half_u` - Half of the first edge.
    /// * `half_v` - Half of the second edge.
    pub fn new(center: Point3f, half_u: Vector3f, half_v: Vector3f) -> Self {
        Self {
            center,
            half_u,
            half_v,
            normal: half_u.cross(&half_v).normalize(),
        }
    }

    /// Returns the corners in the order (-u-v), (+u-v), (-u+v), (+u+v) so that
    /// `v0 + s(v1 - v0) + t(v2 - v0)` spans the rectangle for s, t in [0, 1].
    pub fn vertices(&self) -> [Point3f; 4] {
        let c = self.center;
        [
            c - self.half_u - self.half_v,
            c + self.half_u - self.half_v,
            c - self.half_u + self.half_v,
            c + self.half_u + self.half_v,
        ]
    }

    /// Returns the point for a parametrization in [0, 1]².
    ///
    /// * `u` - Position along the first edge.
    /// * `v` - Position along the second edge.
    pub fn point_at(&self, u: Float, v: Float) -> Point3f {
        self.center + self.half_u * (2.0 * u - 1.0) + self.half_v * (2.0 * v - 1.0)
    }
}

impl Shape for Rectangle {
    fn get_type(&self) -> &'static str {
        "rectangle"
    }

    fn world_bound(&self) -> Bounds3f {
        let [v0, v1, v2, v3] = self.vertices();
        Bounds3f::new(v0, v3).union(&v1).union(&v2)
    }

    fn intersect(&self, r: &Ray) -> Option<ShapeHit> {
        let denom = r.d.dot(&self.normal);
        if denom == 0.0 {
            return None;
        }

        let t = (self.center - r.o).dot(&self.normal) / denom;
        if !(t > 0.0) {
            return None;
        }

        // Project onto the (non-orthogonal) edge basis.
        let d = r.at(t) - self.center;
        let uu = self.half_u.length_squared();
        let vv = self.half_v.length_squared();
        let uv = self.half_u.dot(&self.half_v);
        let du = d.dot(&self.half_u);
        let dv = d.dot(&self.half_v);
        let det = uu * vv - uv * uv;
        if det <= 0.0 {
            return None;
        }
        let a = (du * vv - dv * uv) / det;
        let b = (dv * uu - du * uv) / det;
        if abs(a) > 1.0 || abs(b) > 1.0 {
            return None;
        }

        Some(ShapeHit {
            t,
            n: self.normal,
            uv: Point2f::new(0.5 * (a + 1.0), 0.5 * (b + 1.0)),
        })
    }

    fn area(&self) -> Float {
        4.0 * self.half_u.cross(&self.half_v).length()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
