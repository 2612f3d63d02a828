//! Rectangle Area Source

use lumen::geometry::*;
use lumen::interaction::*;
use lumen::light::*;
use lumen::pbrt::*;
use lumen::rng::*;
use lumen::spectrum::*;
use shapes::*;

/// Implements a rectangular area light sampled uniformly by area.
#[derive(Clone, Debug)]
pub struct RectangleLight {
    /// Light source type.
    pub light_type: LightType,

    /// The emitting rectangle.
    pub rectangle: Rectangle,

    /// Emitted radiance.
    pub emission: Spectrum,

    /// Identifier of the emissive geometry representing the rectangle.
    pub geometry_id: Option<usize>,
}

impl RectangleLight {
    /// Returns a new `RectangleLight`.
    ///
    /// * `rectangle`   - The emitting rectangle.
    /// * `emission`    - Emitted radiance.
    /// * `geometry_id` - Identifier of the emissive geometry.
    pub fn new(rectangle: Rectangle, emission: Spectrum, geometry_id: Option<usize>) -> Self {
        Self {
            light_type: LightType::empty(),
            rectangle,
            emission,
            geometry_id,
        }
    }

    /// Converts an area density at a point of the rectangle to a solid angle
    /// density as seen from a point at distance `dist`.
    ///
    /// * `dist` - Distance between both points.
    /// * `d`    - Unit direction between both points.
    fn solid_angle_pdf(&self, dist: Float, d: &Vector3f) -> Float {
        let cos_light = abs(self.rectangle.normal.dot(d));
        if cos_light == 0.0 {
            return 0.0;
        }
        dist * dist / (self.rectangle.area() * cos_light)
    }
}

impl Light for RectangleLight {
    fn get_type(&self) -> LightType {
        self.light_type
    }

    fn sample(&self, si: &SurfaceInteraction, sampler: &mut Sampler) -> LightSample {
        let [v0, v1, v2, _] = self.rectangle.vertices();
        let u = sampler.next_2d();
        let point = v0 + (v1 - v0) * u.x + (v2 - v0) * u.y;

        let mut direction = si.p - point;
        let dist = direction.length();
        if dist == 0.0 {
            return LightSample::new(self.rectangle.normal, self.emission, 0.0, 0.0);
        }
        direction /= dist;

        LightSample::new(
            direction,
            self.emission,
            self.solid_angle_pdf(dist, &direction),
            dist,
        )
    }

    fn eval(&self, _d: &Vector3f) -> Spectrum {
        self.emission
    }

    fn pdf(&self, p: &Point3f, d: &Vector3f) -> Float {
        self.rectangle
            .intersect(&Ray::new(*p, -*d))
            .map_or(0.0, |hit| self.solid_angle_pdf(hit.t, d))
    }

    fn power(&self) -> Float {
        self.rectangle.area() * self.emission.mean()
    }

    fn distance(&self, p: &Point3f) -> Float {
        p.distance(&self.rectangle.center)
    }

    fn geometry_id(&self) -> Option<usize> {
        self.geometry_id
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
