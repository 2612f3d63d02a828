//! 3-D Axis Aligned Bounding Boxes.

use super::{Point3f, Union, Vector3f};
use crate::pbrt::{lerp, max, Float, INFINITY};
use std::fmt;

/// 3-D axis aligned bounding box over `Float` coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3f {
    /// Minimum bounds.
    pub p_min: Point3f,

    /// Maximum bounds.
    pub p_max: Point3f,
}

impl Default for Bounds3f {
    /// Returns an empty box: the minimum is +∞ and maximum is -∞ so that any
    /// union picks up the other operand.
    fn default() -> Self {
        Self {
            p_min: Point3f::new(INFINITY, INFINITY, INFINITY),
            p_max: Point3f::new(-INFINITY, -INFINITY, -INFINITY),
        }
    }
}

impl Bounds3f {
    /// Creates a new bounding box enclosing two corner points.
    ///
    /// * `p1` - First corner.
    /// * `p2` - Second corner.
    pub fn new(p1: Point3f, p2: Point3f) -> Self {
        Self {
            p_min: p1.min(&p2),
            p_max: p1.max(&p2),
        }
    }

    /// Returns true if the box encloses no volume and no point.
    pub fn is_empty(&self) -> bool {
        self.p_min.x > self.p_max.x || self.p_min.y > self.p_max.y || self.p_min.z > self.p_max.z
    }

    /// Returns the vector from the minimum to the maximum corner.
    pub fn diagonal(&self) -> Vector3f {
        self.p_max - self.p_min
    }

    /// Returns the centre of the box.
    pub fn center(&self) -> Point3f {
        0.5 * self.p_min + 0.5 * self.p_max
    }

    /// Returns the largest edge length.
    pub fn maximum_extent(&self) -> Float {
        let d = self.diagonal();
        max(d.x, max(d.y, d.z))
    }

    /// Returns the position of a point relative to the corners, where the
    /// minimum maps to 0 and the maximum maps to 1 along each axis. Flat axes
    /// map to 0.
    ///
    /// * `p` - The point.
    pub fn offset(&self, p: &Point3f) -> Vector3f {
        let mut o = *p - self.p_min;
        let d = self.diagonal();
        for axis in 0..3 {
            o[axis] = if d[axis] > 0.0 { o[axis] / d[axis] } else { 0.0 };
        }
        o
    }

    /// Linearly interpolates between the corners per axis.
    ///
    /// * `t` - Interpolation parameters; 0 maps to the minimum corner.
    pub fn lerp(&self, t: &Point3f) -> Point3f {
        Point3f::new(
            lerp(t.x, self.p_min.x, self.p_max.x),
            lerp(t.y, self.p_min.y, self.p_max.y),
            lerp(t.z, self.p_min.z, self.p_max.z),
        )
    }

    /// Returns true if the point is inside the box (boundary included).
    ///
    /// * `p` - The point.
    pub fn contains(&self, p: &Point3f) -> bool {
        p.x >= self.p_min.x
            && p.x <= self.p_max.x
            && p.y >= self.p_min.y
            && p.y <= self.p_max.y
            && p.z >= self.p_min.z
            && p.z <= self.p_max.z
    }
}

impl Union<Bounds3f> for Bounds3f {
    /// Return the smallest box enclosing both boxes.
    ///
    /// * `other` - The other box.
    fn union(&self, other: &Bounds3f) -> Self {
        Self {
            p_min: self.p_min.min(&other.p_min),
            p_max: self.p_max.max(&other.p_max),
        }
    }
}

impl Union<Point3f> for Bounds3f {
    /// Return the smallest box enclosing this box and a point.
    ///
    /// * `other` - The point.
    fn union(&self, other: &Point3f) -> Self {
        Self {
            p_min: self.p_min.min(other),
            p_max: self.p_max.max(other),
        }
    }
}

impl fmt::Display for Bounds3f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}]", self.p_min, self.p_max)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty_and_union_identity() {
        let b = Bounds3f::default();
        assert!(b.is_empty());
        let u = b.union(&Bounds3f::new(Point3f::new(-1.0, -1.0, -1.0), Point3f::new(1.0, 2.0, 3.0)));
        assert!(u.p_min == Point3f::new(-1.0, -1.0, -1.0));
        assert!(u.p_max == Point3f::new(1.0, 2.0, 3.0));
        assert!(u.maximum_extent() == 4.0);
    }

    #[test]
    fn offset_maps_corners() {
        let b = Bounds3f::new(Point3f::new(0.0, 0.0, 0.0), Point3f::new(2.0, 4.0, 0.0));
        let o = b.offset(&Point3f::new(1.0, 4.0, 0.0));
        assert!(o == Vector3f::new(0.5, 1.0, 0.0));
        assert!(b.contains(&Point3f::new(2.0, 0.0, 0.0)));
        assert!(!b.contains(&Point3f::new(2.1, 0.0, 0.0)));
    }
}
