//! Spheres

use super::*;

/// A sphere.
#[derive(Copy, Clone, Debug)]
pub struct Sphere {
    /// Centre.
    pub center: Point3f,

    /// Radius of sphere.
    pub radius: Float,
}

impl Default for Sphere {
    /// Returns the unit sphere at the origin.
    fn default() -> Self {
        Self::new(Point3f::zero(), 1.0)
    }
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// * `center` - Centre.
    /// * `radius` - Radius of sphere.
    pub fn new(center: Point3f, radius: Float) -> Self {
        Self { center, radius }
    }

    /// Returns the surface parametrization of a point on the sphere: u follows
    /// the polar angle from +y and v the azimuth about y.
    ///
    /// * `n` - Unit normal at the point.
    pub fn uv(n: &Vector3f) -> Point2f {
        let u = clamp(n.y, -1.0, 1.0).acos() * INV_PI;
        let v = (n.z.atan2(n.x) + PI_OVER_TWO) * INV_PI;
        Point2f::new(u, v)
    }
}

impl Shape for Sphere {
    fn get_type(&self) -> &'static str {
        "sphere"
    }

    fn world_bound(&self) -> Bounds3f {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        Bounds3f::new(self.center - r, self.center + r)
    }

    fn intersect(&self, r: &Ray) -> Option<ShapeHit> {
        // Solve |o + t d - c|² = radius² with a unit direction.
        let oc = r.o - self.center;
        let b = oc.dot(&r.d);
        let c = oc.length_squared() - self.radius * self.radius;
        let discrim = b * b - c;
        if discrim < 0.0 {
            return None;
        }

        let root = discrim.sqrt();
        // Stable pairing of the roots.
        let q = if b > 0.0 { -b - root } else { -b + root };
        let (mut t0, mut t1) = if q == 0.0 { (0.0, 0.0) } else { (c / q, q) };
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        let t = if t0 > 0.0 {
            t0
        } else if t1 > 0.0 {
            t1
        } else {
            return None;
        };

        let n = (r.at(t) - self.center).normalize();
        Some(ShapeHit { t, n, uv: Sphere::uv(&n) })
    }

    fn area(&self) -> Float {
        FOUR_PI * self.radius * self.radius
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn hit_from_outside() {
        let s = Sphere::default();
        let hit = s
            .intersect(&Ray::new(Point3f::new(5.0, 0.0, 0.0), Vector3f::new(-1.0, 0.0, 0.0)))
            .unwrap();
        assert!(approx_eq!(f32, hit.t, 4.0, epsilon = 1e-5));
        assert!(approx_eq!(f32, hit.n.x, 1.0, epsilon = 1e-5));
        assert!(approx_eq!(f32, hit.uv.x, 0.5, epsilon = 1e-5));
        assert!(approx_eq!(f32, hit.uv.y, 0.5, epsilon = 1e-5));
    }

    #[test]
    fn hit_from_inside_and_miss() {
        let s = Sphere::new(Point3f::new(0.0, 1.0, 0.0), 2.0);
        let hit = s
            .intersect(&Ray::new(Point3f::new(0.0, 1.0, 0.0), Vector3f::new(0.0, 0.0, 1.0)))
            .unwrap();
        assert!(approx_eq!(f32, hit.t, 2.0, epsilon = 1e-5));
        assert!(s
            .intersect(&Ray::new(Point3f::new(0.0, 10.0, 0.0), Vector3f::new(1.0, 0.0, 0.0)))
            .is_none());
        assert!(s
            .intersect(&Ray::new(Point3f::new(0.0, 10.0, 0.0), Vector3f::new(0.0, 1.0, 0.0)))
            .is_none());
    }

    #[test]
    fn bounds_and_area() {
        let s = Sphere::new(Point3f::new(1.0, 0.0, 0.0), 0.5);
        let b = s.world_bound();
        assert!(b.p_min == Point3f::new(0.5, -0.5, -0.5));
        assert!(b.p_max == Point3f::new(1.5, 0.5, 0.5));
        assert!(approx_eq!(f32, s.area(), PI, epsilon = 1e-5));
    }
}
