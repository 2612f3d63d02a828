//! 3-D Points

use super::Vector3;
use crate::pbrt::{max, min, Float};
use num_traits::{Num, Zero};
use std::fmt;
use std::ops::{Add, AddAssign, Index, Mul, Sub, SubAssign};

/// A 3-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D point containing `Float` values.
pub type Point3f = Point3<Float>;

impl<T: Num> Point3<T> {
    /// Creates a new 3-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a new 3-D point at the origin.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Returns the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance(&self, other: &Self) -> T
    where
        T: num_traits::Float,
    {
        (*self - *other).length()
    }

    /// Returns the square of the ditance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance_squared(&self, other: &Self) -> T
    where
        T: Copy,
    {
        (*self - *other).length_squared()
    }

    /// Return the component-wise minimum coordinate values with another point.
    ///
    /// * `other` - The other point.
    pub fn min(&self, other: &Self) -> Self
    where
        T: PartialOrd + Copy,
    {
        Self::new(min(self.x, other.x), min(self.y, other.y), min(self.z, other.z))
    }

    /// Return the component-wise maximum coordinate values with another point.
    ///
    /// * `other` - The other point.
    pub fn max(&self, other: &Self) -> Self
    where
        T: PartialOrd + Copy,
    {
        Self::new(max(self.x, other.x), max(self.y, other.y), max(self.z, other.z))
    }
}

impl<T: Num> Add<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    /// Offsets the point by the given vector.
    ///
    /// * `other` - The vector to add.
    fn add(self, other: Vector3<T>) -> Self::Output {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<T: Num> Add for Point3<T> {
    type Output = Point3<T>;

    /// Adds the coordinates of another point. Used for weighted sums.
    ///
    /// * `other` - The point to add.
    fn add(self, other: Self) -> Self::Output {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<T: Num + Copy> AddAssign<Vector3<T>> for Point3<T> {
    /// Offsets the point by the given vector.
    ///
    /// * `other` - The vector to add.
    fn add_assign(&mut self, other: Vector3<T>) {
        *self = Point3::new(self.x + other.x, self.y + other.y, self.z + other.z);
    }
}

impl<T: Num> Sub for Point3<T> {
    type Output = Vector3<T>;

    /// Returns the vector between two points.
    ///
    /// * `other` - The point to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: Num> Sub<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    /// Offsets the point by the negated vector.
    ///
    /// * `other` - The vector to subtract.
    fn sub(self, other: Vector3<T>) -> Self::Output {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: Num + Copy> SubAssign<Vector3<T>> for Point3<T> {
    /// Offsets the point by the negated vector.
    ///
    /// * `other` - The vector to subtract.
    fn sub_assign(&mut self, other: Vector3<T>) {
        *self = Point3::new(self.x - other.x, self.y - other.y, self.z - other.z);
    }
}

impl<T: Num + Copy> Mul<T> for Point3<T> {
    type Output = Self;

    /// Scale the coordinates.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: T) -> Self::Output {
        Self::new(f * self.x, f * self.y, f * self.z)
    }
}

impl Mul<Point3f> for Float {
    type Output = Point3f;

    /// Scale the coordinates.
    ///
    /// * `p` - The point.
    fn mul(self, p: Point3f) -> Self::Output {
        p * self
    }
}

impl<T> Index<usize> for Point3<T> {
    type Output = T;

    /// Index the point by an integer.
    ///
    /// * `i` - An integer in {0, 1, 2}.
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid index for std::Index on Point3<T>"),
        }
    }
}

impl<T> From<Vector3<T>> for Point3<T> {
    /// Convert a 3-D vector to a 3-D point.
    ///
    /// * `v` - 3-D vector.
    fn from(v: Vector3<T>) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl<T: fmt::Display> fmt::Display for Point3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
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
    fn distance_between_points() {
        let p1 = Point3f::new(1.0, 2.0, 2.0);
        let p2 = Point3f::zero();
        assert!(approx_eq!(f32, p1.distance(&p2), 3.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, p1.distance_squared(&p2), 9.0, epsilon = 1e-6));
    }

    #[test]
    fn point_minus_point_is_vector() {
        let v = Point3f::new(1.0, 1.0, 1.0) - Point3f::new(0.0, 1.0, 2.0);
        assert!(v == Vector3::new(1.0, 0.0, -1.0));
    }

    #[test]
    fn weighted_sum_of_points() {
        let p = 0.5 * Point3f::new(2.0, 0.0, 0.0) + 0.5 * Point3f::new(0.0, 2.0, 0.0);
        assert!(p == Point3f::new(1.0, 1.0, 0.0));
    }
}
