//! RGB Spectrum.

use crate::pbrt::*;
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// Number of spectral samples to use for `RGBSpectrum`.
pub const RGB_SAMPLES: usize = 3;

/// RGBSpectrum represents a spectral power distribution (SPD) with
/// a weighted sum of red, green and blue components.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RGBSpectrum {
    /// The sampled spectral values.
    c: [Float; RGB_SAMPLES],
}

impl RGBSpectrum {
    /// Create a new `RGBSpectrum` with a constant value across all
    /// wavelengths.
    ///
    /// * `v` - Constant value.
    pub fn new(v: Float) -> Self {
        Self {
            c: [v; RGB_SAMPLES],
        }
    }

    /// Create a new `RGBSpectrum` from RGB values.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub fn rgb(r: Float, g: Float, b: Float) -> Self {
        Self { c: [r, g, b] }
    }

    /// Returns the RGB coefficients.
    pub fn to_rgb(&self) -> [Float; 3] {
        self.c
    }

    /// Returns true if all sample values are zero.
    pub fn is_black(&self) -> bool {
        self.c.iter().all(|&v| v == 0.0)
    }

    /// Returns true if any sample value is NaN.
    pub fn has_nans(&self) -> bool {
        self.c.iter().any(|v| v.is_nan())
    }

    /// Returns true if any sample value is infinite.
    pub fn has_infs(&self) -> bool {
        self.c.iter().any(|v| v.is_infinite())
    }

    /// Returns true if any sample value is negative.
    pub fn has_negatives(&self) -> bool {
        self.c.iter().any(|&v| v < 0.0)
    }

    /// Returns the average of the sample values.
    pub fn mean(&self) -> Float {
        (self.c[0] + self.c[1] + self.c[2]) / RGB_SAMPLES as Float
    }

    /// Returns the largest sample value.
    pub fn max_component_value(&self) -> Float {
        max(self.c[0], max(self.c[1], self.c[2]))
    }

    /// Returns the y-coefficient of XYZ colour.
    pub fn y(&self) -> Float {
        0.212671 * self.c[0] + 0.715160 * self.c[1] + 0.072169 * self.c[2]
    }

    /// Applies `f` to each sample value.
    ///
    /// * `f` - The function.
    pub fn map<F: Fn(Float) -> Float>(&self, f: F) -> Self {
        Self {
            c: [f(self.c[0]), f(self.c[1]), f(self.c[2])],
        }
    }

    /// Clamps the sample values.
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    pub fn clamp(&self, low: Float, high: Float) -> Self {
        self.map(|v| clamp(v, low, high))
    }

    /// Takes the square root of all sample values.
    pub fn sqrt(&self) -> Self {
        self.map(Float::sqrt)
    }
}

impl Default for RGBSpectrum {
    /// Return a black `RGBSpectrum`.
    fn default() -> Self {
        Self {
            c: [0.0; RGB_SAMPLES],
        }
    }
}

impl From<[Float; 3]> for RGBSpectrum {
    /// Create a new `RGBSpectrum` from RGB values.
    ///
    /// * `c` - RGB values.
    fn from(c: [Float; 3]) -> Self {
        Self { c }
    }
}

impl Add for RGBSpectrum {
    type Output = Self;

    /// Adds the corresponding sample values from another `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn add(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] + other.c[0],
                self.c[1] + other.c[1],
                self.c[2] + other.c[2],
            ],
        }
    }
}

impl AddAssign for RGBSpectrum {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for RGBSpectrum {
    type Output = Self;

    /// Subtracts the corresponding sample values from another `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn sub(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] - other.c[0],
                self.c[1] - other.c[1],
                self.c[2] - other.c[2],
            ],
        }
    }
}

impl SubAssign for RGBSpectrum {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul for RGBSpectrum {
    type Output = Self;

    /// Multiplies the corresponding sample values from another `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn mul(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] * other.c[0],
                self.c[1] * other.c[1],
                self.c[2] * other.c[2],
            ],
        }
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales the sample values with a constant factor.
    ///
    /// * `f` - Scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        self.map(|v| v * f)
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    /// Scales the sample values of an `RGBSpectrum`.
    ///
    /// * `s` - Sample values.
    fn mul(self, s: RGBSpectrum) -> Self::Output {
        s * self
    }
}

impl MulAssign for RGBSpectrum {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl MulAssign<Float> for RGBSpectrum {
    fn mul_assign(&mut self, f: Float) {
        *self = *self * f;
    }
}

impl Div for RGBSpectrum {
    type Output = Self;

    /// Divides the corresponding sample values from another
    /// `RGBSpectrum`.
    ///
    /// * `other` - The other `RGBSpectrum`.
    fn div(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] / other.c[0],
                self.c[1] / other.c[1],
                self.c[2] / other.c[2],
            ],
        }
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = Self;

    /// Divides the sample values with given factor.
    ///
    /// * `f` - Scaling value.
    fn div(self, f: Float) -> Self::Output {
        let inv = 1.0 / f;
        self.map(|v| v * inv)
    }
}

impl DivAssign<Float> for RGBSpectrum {
    fn div_assign(&mut self, f: Float) {
        *self = *self / f;
    }
}

impl Neg for RGBSpectrum {
    type Output = Self;

    /// Scale the values by -1.
    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;

    /// Index the sample value.
    ///
    /// * `i` -  The index.
    fn index(&self, i: usize) -> &Self::Output {
        &self.c[i]
    }
}

impl IndexMut<usize> for RGBSpectrum {
    /// Index the sample to get a mutable sample value.
    ///
    /// * `i` - The index.
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.c[i]
    }
}

impl fmt::Display for RGBSpectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.c[0], self.c[1], self.c[2])
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
    fn mean_and_max() {
        let s = RGBSpectrum::rgb(0.2, 0.5, 0.8);
        assert!(approx_eq!(f32, s.mean(), 0.5, epsilon = 1e-6));
        assert!(s.max_component_value() == 0.8);
    }

    #[test]
    fn bad_values_detected() {
        assert!(RGBSpectrum::rgb(Float::NAN, 0.0, 0.0).has_nans());
        assert!(RGBSpectrum::rgb(0.0, INFINITY, 0.0).has_infs());
        assert!(RGBSpectrum::rgb(0.0, 0.0, -1.0).has_negatives());
        assert!(RGBSpectrum::default().is_black());
    }

    #[test]
    fn arithmetic() {
        let a = RGBSpectrum::rgb(1.0, 2.0, 3.0);
        let b = RGBSpectrum::new(2.0);
        assert!(a * b == RGBSpectrum::rgb(2.0, 4.0, 6.0));
        assert!(a / 2.0 == RGBSpectrum::rgb(0.5, 1.0, 1.5));
        assert!(a + b - b == a);
        assert!(0.5 * a == a * 0.5);
    }
}
