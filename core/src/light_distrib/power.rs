//! Power Light Distribution.

use super::LightDistribution;
use crate::geometry::*;
use crate::light::*;
use crate::sampling::*;

/// PowerLightDistribution returns a distribution with sampling probability
/// proportional to the total emitted power for each light. It ignores the
/// provided point, so it works well when the most powerful lights are also
/// the most important contributors everywhere in the scene.
pub struct PowerLightDistribution {
    distrib: Option<Distribution1D>,
}

impl PowerLightDistribution {
    /// Create a new instance of `PowerLightDistribution`.
    ///
    /// * `lights` - The finite lights of the scene.
    pub fn new(lights: &[ArcLight]) -> Self {
        Self {
            distrib: compute_light_power_distribution(lights),
        }
    }
}

impl LightDistribution for PowerLightDistribution {
    fn lookup(&self, _p: &Point3f) -> Option<&Distribution1D> {
        self.distrib.as_ref()
    }
}

/// Returns a distribution proportional to light power or `None` if there are
/// no lights. Lights with zero total power fall back to uniform selection.
///
/// * `lights` - The lights.
pub fn compute_light_power_distribution(lights: &[ArcLight]) -> Option<Distribution1D> {
    if lights.is_empty() {
        return None;
    }

    let light_power: Vec<_> = lights.iter().map(|light| light.power().max(0.0)).collect();
    if light_power.iter().all(|&p| p == 0.0) {
        warn!("All {} lights have zero power; selecting them uniformly.", lights.len());
    }
    Some(Distribution1D::new(light_power))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::super::tests::TestLight;
    use super::*;
    use float_cmp::*;
    use std::sync::Arc;

    #[test]
    fn proportional_to_power() {
        let lights: Vec<ArcLight> = vec![
            Arc::new(TestLight::new(Point3f::zero(), 1.0)),
            Arc::new(TestLight::new(Point3f::zero(), 3.0)),
        ];
        let d = PowerLightDistribution::new(&lights);
        let (i, pdf) = d.sample(&Point3f::zero(), 0.5).unwrap();
        assert_eq!(i, 1);
        assert!(approx_eq!(f32, pdf, 0.75, epsilon = 1e-6));
        let (i, pdf) = d.sample(&Point3f::zero(), 0.1).unwrap();
        assert_eq!(i, 0);
        assert!(approx_eq!(f32, pdf, 0.25, epsilon = 1e-6));
    }

    #[test]
    fn no_lights_no_distribution() {
        let d = PowerLightDistribution::new(&[]);
        assert!(d.sample(&Point3f::zero(), 0.5).is_none());
    }

    #[test]
    fn zero_power_is_uniform() {
        let lights: Vec<ArcLight> = vec![
            Arc::new(TestLight::new(Point3f::zero(), 0.0)),
            Arc::new(TestLight::new(Point3f::zero(), 0.0)),
        ];
        let d = PowerLightDistribution::new(&lights);
        let (_, pdf) = d.sample(&Point3f::zero(), 0.7).unwrap();
        assert!(approx_eq!(f32, pdf, 0.5, epsilon = 1e-6));
    }
}
