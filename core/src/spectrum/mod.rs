//! Spectrum

mod rgb_spectrum;

// Re-export
pub use rgb_spectrum::*;

/// Radiometric quantities are carried as RGB triples.
pub type Spectrum = RGBSpectrum;
