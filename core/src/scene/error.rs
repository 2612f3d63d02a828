//! Scene Errors

use crate::pbrt::Float;
use thiserror::Error;

/// Errors raised while assembling a scene. Rendering itself never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A composite BRDF refers to a BRDF that does not exist.
    #[error("BRDF #{id} is out of range; the scene has {len} BRDFs")]
    InvalidBrdf { id: usize, len: usize },

    /// BRDF composition refers back to itself.
    #[error("BRDF #{id} is part of a composition cycle")]
    CyclicBrdf { id: usize },

    /// Microfacet roughness scale components must be strictly positive.
    #[error("BRDF #{id} has a non-positive roughness scale ({sx}, {sy})")]
    Roughness { id: usize, sx: Float, sy: Float },

    /// Texture raster dimensions do not match its data.
    #[error("texture of {width}x{height} texels cannot hold {len} values")]
    TextureData { width: usize, height: usize, len: usize },

    /// A geometry list does not match the intersection backend.
    #[error("{materials} materials given for {geometries} geometries")]
    GeometryCount { materials: usize, geometries: usize },

    /// A light was given parameters it cannot work with.
    #[error("invalid light: {0}")]
    InvalidLight(String),
}
