//! Perspective Camera

use lumen::camera::*;
use lumen::geometry::*;
use lumen::pbrt::*;

/// Pinhole camera looking from a position toward a target with +y as the
/// up direction.
#[derive(Copy, Clone, Debug)]
pub struct PerspectiveCamera {
    /// Camera position.
    pub pos: Point3f,

    /// Target position.
    pub center: Point3f,

    /// Field of view angle across the image plane's horizontal axis in
    /// degrees.
    pub fov: Float,

    /// Aspect ratio (width / height).
    pub aspect: Float,

    /// Unit viewing direction.
    forward: Vector3f,

    /// Image plane horizontal axis.
    right: Vector3f,

    /// Image plane vertical axis.
    up: Vector3f,

    /// tan(fov / 2).
    tan_half_fov: Float,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(Point3f::new(-1.0, 0.0, 0.0), Point3f::zero(), 40.0, 1.0)
    }
}

impl PerspectiveCamera {
    /// Create a new perspective camera.
    ///
    /// * `pos`    - Camera position.
    /// * `center` - Target position.
    /// * `fov`    - The field-of-view angle in degrees.
    /// * `aspect` - Aspect ratio (width / height).
    pub fn new(pos: Point3f, center: Point3f, fov: Float, aspect: Float) -> Self {
        let mut camera = Self {
            pos,
            center,
            fov,
            aspect,
            forward: Vector3f::new(0.0, 0.0, -1.0),
            right: Vector3f::new(1.0, 0.0, 0.0),
            up: Vector3f::new(0.0, 1.0, 0.0),
            tan_half_fov: 1.0,
        };
        camera.init();
        camera
    }

    /// Sets the camera position.
    ///
    /// * `pos` - Camera position.
    pub fn with_position(mut self, pos: Point3f) -> Self {
        self.pos = pos;
        self.init();
        self
    }

    /// Sets the target position.
    ///
    /// * `center` - Target position.
    pub fn with_center(mut self, center: Point3f) -> Self {
        self.center = center;
        self.init();
        self
    }

    /// Sets the field of view.
    ///
    /// * `fov` - The field-of-view angle in degrees.
    pub fn with_fov(mut self, fov: Float) -> Self {
        self.fov = fov;
        self.init();
        self
    }

    /// Sets the aspect ratio.
    ///
    /// * `aspect` - Aspect ratio (width / height).
    pub fn with_aspect(mut self, aspect: Float) -> Self {
        self.aspect = aspect;
        self.init();
        self
    }

    /// Recomputes the viewing frame from the public parameters.
    fn init(&mut self) {
        let d = self.center - self.pos;
        if d.length_squared() == 0.0 {
            warn!("Camera position and target coincide at {}; looking down -z", self.pos);
            self.forward = Vector3f::new(0.0, 0.0, -1.0);
        } else {
            self.forward = d.normalize();
        }

        // Pick another reference when looking straight up or down.
        let world_up = if abs(self.forward.y) > 0.999 {
            Vector3f::new(0.0, 0.0, 1.0)
        } else {
            Vector3f::new(0.0, 1.0, 0.0)
        };
        self.right = self.forward.cross(&world_up).normalize();
        self.up = self.right.cross(&self.forward);
        self.tan_half_fov = (self.fov.to_radians() * 0.5).tan();
    }
}

impl Camera for PerspectiveCamera {
    fn generate_ray(&self, u: Float, v: Float) -> Ray {
        let t = self.tan_half_fov;
        let d = self.right * (u * t) + self.up * (v * t / self.aspect) + self.forward;
        Ray::new(self.pos, d.normalize())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
