//! Light Type

use bitflags::bitflags;

bitflags! {
    /// Capability flags of a light source.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct LightType: u8 {
        /// Emits along a single direction or from a single point; cannot be
        /// hit by BRDF sampling.
        const DIRAC = 1;

        /// Located at infinity; contributes to rays that escape the scene.
        const INFINITE = 2;
    }
}

impl LightType {
    /// Returns true if all the given flags are set.
    ///
    /// * `flags` - Flags to check.
    pub fn matches(&self, flags: LightType) -> bool {
        self.contains(flags)
    }
}
