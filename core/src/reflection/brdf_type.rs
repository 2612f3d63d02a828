//! BRDF Types

use bitflags::bitflags;

bitflags! {
    /// Capability flags of a BRDF.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct BrdfType: u8 {
        const DIFFUSE = 1;
        const ROUGH = 2;
        const DIRAC = 4;
        const REFLECTION = 8;
        const EMISSIVE = 16;
    }
}

impl BrdfType {
    /// Tests a single type flag and returns whether it is set or not.
    ///
    /// * `other` - BRDF type flag to match.
    pub fn matches(&self, other: Self) -> bool {
        self.bits() & other.bits() > 0
    }
}
