//! Reflection models

use crate::geometry::*;
use crate::interaction::*;
use crate::microfacet::*;
use crate::pbrt::*;
use crate::rng::*;
use crate::sampling::*;
use crate::spectrum::*;
use crate::texture::*;

mod arena;
mod brdf;
mod brdf_sample;
mod brdf_type;
mod diffuse_microfacet;
mod emissive;
mod fresnel;
mod lambertian;
mod micrograin_layer;
mod mix;
mod rough_microfacet;

// Re-export
pub use arena::*;
pub use brdf::*;
pub use brdf_sample::*;
pub use brdf_type::*;
pub use diffuse_microfacet::*;
pub use emissive::*;
pub use fresnel::*;
pub use lambertian::*;
pub use micrograin_layer::*;
pub use mix::*;
pub use rough_microfacet::*;

#[cfg(test)]
mod tests;
