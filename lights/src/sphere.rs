//! Sphere Area Source

use lumen::geometry::*;
use lumen::interaction::*;
use lumen::light::*;
use lumen::pbrt::*;
use lumen::rng::*;
use lumen::sampling::*;
use lumen::spectrum::*;
use shapes::*;

/// Slack on the cone boundary for directions produced by `sample()`.
const CONE_EPSILON: Float = 1e-5;

/// Implements a spherical area light. Points outside the sphere sample the
/// cone of directions subtended by it; points inside sample the full sphere of
/// directions.
#[derive(Clone, Debug)]
pub struct SphereLight {
    /// Light source type.
    pub light_type: LightType,

    /// The emitting sphere.
    pub sphere: Sphere,

    /// Emitted radiance.
    pub emission: Spectrum,

    /// Identifier of the emissive geometry representing the sphere.
    pub geometry_id: Option<usize>,
}

impl SphereLight {
    /// Returns a new `SphereLight`.
    ///
    /// * `sphere`      - The emitting sphere.
    /// * `emission`    - Emitted radiance.
    /// * `geometry_id` - Identifier of the emissive geometry.
    pub fn new(sphere: Sphere, emission: Spectrum, geometry_id: Option<usize>) -> Self {
        Self {
            light_type: LightType::empty(),
            sphere,
            emission,
            geometry_id,
        }
    }

    /// Returns the cosine of the cone half-angle and `1 - cos` of it as seen
    /// from a point at distance `dist` from the centre. The second value is
    /// computed without cancellation for distant spheres.
    ///
    /// * `dist` - Distance to the centre; must exceed the radius.
    fn cone(&self, dist: Float) -> (Float, Float) {
        let sin2_theta_max = self.sphere.radius * self.sphere.radius / (dist * dist);
        let cos_theta_max = max(0.0, 1.0 - sin2_theta_max).sqrt();
        (cos_theta_max, sin2_theta_max / (1.0 + cos_theta_max))
    }

    /// Returns the distance along a ray from an interior point to the surface.
    ///
    /// * `p` - Interior point.
    /// * `w` - Unit direction.
    fn exit_distance(&self, p: &Point3f, w: &Vector3f) -> Float {
        let oc = *p - self.sphere.center;
        let b = oc.dot(w);
        let c = oc.length_squared() - self.sphere.radius * self.sphere.radius;
        -b + max(0.0, b * b - c).sqrt()
    }
}

impl Light for SphereLight {
    fn get_type(&self) -> LightType {
        self.light_type
    }

    fn sample(&self, si: &SurfaceInteraction, sampler: &mut Sampler) -> LightSample {
        let to_center = self.sphere.center - si.p;
        let dist = to_center.length();
        let u = sampler.next_2d();

        if dist <= self.sphere.radius {
            let w = uniform_sample_sphere(&u);
            let expected_distance = self.exit_distance(&si.p, &w);
            return LightSample::new(-w, self.emission, uniform_sphere_pdf(), expected_distance);
        }

        let (cos_theta_max, one_minus_cos) = self.cone(dist);
        let cone_dir = uniform_sample_cone(&u, cos_theta_max);
        let frame = Frame::from_normal(&(to_center / dist));
        let direction = -frame.to_world(&cone_dir).normalize();

        let r2 = self.sphere.radius * self.sphere.radius;
        let cos_theta = cone_dir.z;
        let expected_distance =
            dist * cos_theta - max(0.0, r2 - dist * dist * (1.0 - cos_theta * cos_theta)).sqrt();

        LightSample::new(
            direction,
            self.emission,
            1.0 / (TWO_PI * one_minus_cos),
            expected_distance,
        )
    }

    fn eval(&self, _d: &Vector3f) -> Spectrum {
        self.emission
    }

    fn pdf(&self, p: &Point3f, d: &Vector3f) -> Float {
        let to_center = self.sphere.center - *p;
        let dist = to_center.length();
        if dist <= self.sphere.radius {
            return uniform_sphere_pdf();
        }

        let (cos_theta_max, one_minus_cos) = self.cone(dist);
        if (-*d).dot(&(to_center / dist)) < cos_theta_max - CONE_EPSILON {
            return 0.0;
        }
        1.0 / (TWO_PI * one_minus_cos)
    }

    fn power(&self) -> Float {
        self.sphere.area() * self.emission.mean()
    }

    fn distance(&self, p: &Point3f) -> Float {
        p.distance(&self.sphere.center)
    }

    fn geometry_id(&self) -> Option<usize> {
        self.geometry_id
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn light() -> SphereLight {
        SphereLight::new(
            Sphere::new(Point3f::new(0.0, 4.0, 0.0), 1.0),
            Spectrum::new(2.0),
            Some(0),
        )
    }

    fn interaction_at(p: Point3f) -> SurfaceInteraction {
        SurfaceInteraction::new(1.0, p, Vector3f::new(0.0, 1.0, 0.0), Point2f::default(), None, 1)
    }

    #[test]
    fn samples_hit_the_sphere_at_expected_distance() {
        let light = light();
        let si = interaction_at(Point3f::zero());
        let mut sampler = Sampler::new(3);
        for _ in 0..1000 {
            let ls = light.sample(&si, &mut sampler);
            let hit = light.sphere.intersect(&Ray::new(si.p, -ls.direction)).unwrap();
            assert!(approx_eq!(f32, hit.t, ls.expected_distance, epsilon = 1e-3));
            assert!(approx_eq!(f32, light.pdf(&si.p, &ls.direction), ls.pdf, epsilon = 1e-3));
        }
    }

    #[test]
    fn pdf_recovers_subtended_solid_angle() {
        // Fraction of uniformly distributed directions that hit the sphere.
        let light = light();
        let p = Point3f::zero();
        let mut sampler = Sampler::new(11);
        let n = 200_000;
        let hits = (0..n)
            .filter(|_| {
                let w = uniform_sample_sphere(&sampler.next_2d());
                light.sphere.intersect(&Ray::new(p, w)).is_some()
            })
            .count();
        let solid_angle = FOUR_PI * hits as Float / n as Float;
        let expected = 1.0 / light.pdf(&p, &Vector3f::new(0.0, -1.0, 0.0));
        assert!(approx_eq!(f32, solid_angle, expected, epsilon = 0.01));
        assert!(light.pdf(&p, &Vector3f::new(0.0, 1.0, 0.0)) == 0.0);
    }

    #[test]
    fn cone_samples_pass_chi_square() {
        // cos θ is uniform over [cos θmax, 1] for uniform cone sampling.
        let light = light();
        let si = interaction_at(Point3f::zero());
        let axis = Vector3f::new(0.0, 1.0, 0.0);
        let (cos_theta_max, _) = light.cone(4.0);

        let bins = 10;
        let n = 100_000;
        let mut histogram = vec![0usize; bins];
        let mut sampler = Sampler::new(5);
        for _ in 0..n {
            let ls = light.sample(&si, &mut sampler);
            let cos_theta = (-ls.direction).dot(&axis);
            let t = (1.0 - cos_theta) / (1.0 - cos_theta_max);
            histogram[min((t * bins as Float) as usize, bins - 1)] += 1;
        }

        let expected = n as Float / bins as Float;
        let chi2: Float = histogram
            .iter()
            .map(|&c| (c as Float - expected) * (c as Float - expected) / expected)
            .sum();
        // 99.9th percentile of χ² with 9 degrees of freedom.
        assert!(chi2 < 27.88, "chi2 = {}", chi2);
    }

    #[test]
    fn interior_points_sample_all_directions() {
        let light = light();
        let si = interaction_at(Point3f::new(0.0, 4.5, 0.0));
        let mut sampler = Sampler::new(9);
        for _ in 0..100 {
            let ls = light.sample(&si, &mut sampler);
            assert!(approx_eq!(f32, ls.pdf, 1.0 / FOUR_PI, epsilon = 1e-6));
            let q = si.p - ls.direction * ls.expected_distance;
            assert!(approx_eq!(f32, q.distance(&light.sphere.center), 1.0, epsilon = 1e-4));
        }
    }

    #[test]
    fn power_and_distance() {
        let light = light();
        assert!(approx_eq!(f32, light.power(), 8.0 * PI, epsilon = 1e-4));
        assert!(approx_eq!(f32, light.distance(&Point3f::zero()), 4.0, epsilon = 1e-6));
        assert_eq!(light.geometry_id(), Some(0));
        assert!(!light.is_dirac() && !light.is_infinite());
    }
}
