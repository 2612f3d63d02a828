//! 1D Distribution.

use crate::pbrt::*;

/// Represents a discrete distribution over a list of non-negative weights and
/// provides methods to sample it by inverting its CDF.
#[derive(Clone, Debug)]
pub struct Distribution1D {
    /// The weights.
    pub func: Vec<Float>,

    /// Normalized CDF for `func` with `func.len() + 1` entries.
    pub cdf: Vec<Float>,

    /// Sum of `func`.
    pub func_sum: Float,
}

impl Distribution1D {
    /// Returns a new `Distribution1D` for the given weights. When all weights
    /// are zero the distribution is uniform.
    ///
    /// - `f` - Non-negative weights.
    pub fn new(f: Vec<Float>) -> Self {
        let n = f.len();

        let mut cdf: Vec<Float> = Vec::with_capacity(n + 1);
        cdf.push(0.0);
        for i in 1..n + 1 {
            cdf.push(cdf[i - 1] + f[i - 1]);
        }

        let func_sum = cdf[n];
        if func_sum == 0.0 {
            for (i, v) in cdf.iter_mut().enumerate().skip(1).take(n) {
                *v = i as Float / n as Float;
            }
        } else {
            for v in cdf.iter_mut().skip(1).take(n) {
                *v /= func_sum;
            }
        }

        Self { func: f, cdf, func_sum }
    }

    /// Returns the number of entries.
    pub fn count(&self) -> usize {
        self.func.len()
    }

    /// Returns true if there are no entries to sample.
    pub fn is_empty(&self) -> bool {
        self.func.is_empty()
    }

    /// Return an index and its probability from the discrete distribution
    /// given a random sample. Entries with zero weight are never selected
    /// unless every weight is zero.
    ///
    /// - `u` - The random sample in [0, 1).
    pub fn sample_discrete(&self, u: Float) -> (usize, Float) {
        let offset = find_interval(self.cdf.len(), |index| self.cdf[index] <= u);
        (offset, self.discrete_pdf(offset))
    }

    /// Return the probability of sampling the given index.
    ///
    /// * `index` - Sample index.
    pub fn discrete_pdf(&self, index: usize) -> Float {
        debug_assert!(index < self.count());
        if self.func_sum > 0.0 {
            self.func[index] / self.func_sum
        } else {
            1.0 / self.count() as Float
        }
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
    fn probabilities_follow_weights() {
        let d = Distribution1D::new(vec![1.0, 0.0, 3.0]);
        assert!(approx_eq!(f32, d.discrete_pdf(0), 0.25, epsilon = 1e-6));
        assert!(approx_eq!(f32, d.discrete_pdf(2), 0.75, epsilon = 1e-6));
        assert_eq!(d.sample_discrete(0.1).0, 0);
        assert_eq!(d.sample_discrete(0.25).0, 2);
        assert_eq!(d.sample_discrete(0.99).0, 2);
    }

    #[test]
    fn zero_weights_are_uniform() {
        let d = Distribution1D::new(vec![0.0, 0.0]);
        let (i, pdf) = d.sample_discrete(0.7);
        assert_eq!(i, 1);
        assert!(approx_eq!(f32, pdf, 0.5, epsilon = 1e-6));
    }

    #[test]
    fn pmf_sums_to_one() {
        let d = Distribution1D::new(vec![0.3, 2.0, 0.7, 1.1]);
        let s: Float = (0..d.count()).map(|i| d.discrete_pdf(i)).sum();
        assert!(approx_eq!(f32, s, 1.0, epsilon = 1e-5));
    }
}
