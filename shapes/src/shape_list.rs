//! Shape List

use super::*;
use lumen::scene::*;

/// Brute force intersection backend over a list of shapes. The geometry
/// identifier of a shape is its index in the list.
#[derive(Clone, Default)]
pub struct ShapeList {
    shapes: Vec<ArcShape>,
    world_bound: Bounds3f,
}

impl ShapeList {
    /// Returns an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shape and returns its geometry identifier.
    ///
    /// * `shape` - The shape.
    pub fn push(&mut self, shape: ArcShape) -> usize {
        debug!("Adding {} #{} bounds {}", shape.get_type(), self.shapes.len(), shape.world_bound());
        self.world_bound = self.world_bound.union(&shape.world_bound());
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Returns the shape with a geometry identifier.
    ///
    /// * `id` - Geometry identifier.
    pub fn get(&self, id: usize) -> Option<&ArcShape> {
        self.shapes.get(id)
    }

    /// Returns the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Intersector for ShapeList {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut nearest: Option<Hit> = None;
        for (id, shape) in self.shapes.iter().enumerate() {
            if let Some(hit) = shape.intersect(ray) {
                if nearest.map_or(true, |n| hit.t < n.t) {
                    nearest = Some(Hit::new(hit.t, hit.n, hit.uv, id));
                }
            }
        }
        nearest
    }

    fn occluded(&self, ray: &Ray, max_distance: Float) -> bool {
        self.shapes.iter().any(|shape| shape.intersect_p(ray, max_distance))
    }

    fn world_bound(&self) -> Bounds3f {
        self.world_bound
    }

    fn geometry_count(&self) -> usize {
        self.shapes.len()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
