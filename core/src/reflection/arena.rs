//! BRDF Arena

use super::*;
use crate::scene::SceneError;
use std::fmt;

/// Index of a BRDF in a `BrdfArena`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BrdfId(pub usize);

impl fmt::Display for BrdfId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns all BRDFs of a scene. Composite BRDFs reference their children by
/// `BrdfId`; `validate` guarantees every reference resolves and that the
/// reference graph has no cycles.
#[derive(Clone, Default)]
pub struct BrdfArena {
    brdfs: Vec<Brdf>,
}

impl BrdfArena {
    /// Returns an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a BRDF and returns its identifier.
    ///
    /// * `brdf` - The BRDF.
    pub fn push<B: Into<Brdf>>(&mut self, brdf: B) -> BrdfId {
        self.brdfs.push(brdf.into());
        BrdfId(self.brdfs.len() - 1)
    }

    /// Returns the number of BRDFs.
    pub fn len(&self) -> usize {
        self.brdfs.len()
    }

    /// Returns true if the arena holds no BRDFs.
    pub fn is_empty(&self) -> bool {
        self.brdfs.is_empty()
    }

    /// Returns a handle to the BRDF with the given identifier.
    ///
    /// * `id` - The identifier; must be valid.
    pub fn get(&self, id: BrdfId) -> BrdfRef<'_> {
        BrdfRef {
            arena: self,
            brdf: &self.brdfs[id.0],
        }
    }

    /// Checks that all references resolve, roughness scales are positive and
    /// composition is acyclic.
    pub fn validate(&self) -> Result<(), SceneError> {
        for (i, brdf) in self.brdfs.iter().enumerate() {
            for child in brdf.children() {
                if child.0 >= self.brdfs.len() {
                    return Err(SceneError::InvalidBrdf {
                        id: child.0,
                        len: self.brdfs.len(),
                    });
                }
            }
            if let Some((sx, sy)) = brdf.roughness_scale() {
                if !(sx > 0.0 && sy > 0.0) {
                    return Err(SceneError::Roughness { id: i, sx, sy });
                }
            }
        }

        #[derive(Copy, Clone, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        fn visit(arena: &BrdfArena, id: usize, marks: &mut [Mark]) -> Result<(), SceneError> {
            match marks[id] {
                Mark::Done => Ok(()),
                Mark::InProgress => Err(SceneError::CyclicBrdf { id }),
                Mark::Unvisited => {
                    marks[id] = Mark::InProgress;
                    for child in arena.brdfs[id].children() {
                        visit(arena, child.0, marks)?;
                    }
                    marks[id] = Mark::Done;
                    Ok(())
                }
            }
        }

        let mut marks = vec![Mark::Unvisited; self.brdfs.len()];
        for id in 0..self.brdfs.len() {
            visit(self, id, &mut marks)?;
        }
        Ok(())
    }
}

/// A BRDF together with the arena that resolves its children.
#[derive(Copy, Clone)]
pub struct BrdfRef<'a> {
    arena: &'a BrdfArena,
    brdf: &'a Brdf,
}

impl<'a> BrdfRef<'a> {
    /// Returns the underlying BRDF.
    pub fn brdf(&self) -> &'a Brdf {
        self.brdf
    }

    /// Returns the cosine weighted BRDF value.
    ///
    /// * `wi`      - Incident direction.
    /// * `wo`      - Outgoing direction.
    /// * `si`      - Surface interaction.
    /// * `sampler` - Sampler for stochastic models.
    pub fn eval(
        &self,
        wi: &Vector3f,
        wo: &Vector3f,
        si: &SurfaceInteraction,
        sampler: &mut Sampler,
    ) -> Spectrum {
        self.brdf.eval(self.arena, wi, wo, si, sampler)
    }

    /// Samples an outgoing direction.
    ///
    /// * `wi`      - Incident direction.
    /// * `si`      - Surface interaction.
    /// * `sampler` - Sampler.
    pub fn sample(&self, wi: &Vector3f, si: &SurfaceInteraction, sampler: &mut Sampler) -> BrdfSample {
        self.brdf.sample(self.arena, wi, si, sampler)
    }

    /// Returns the PDF of sampling `wo` given `wi`.
    ///
    /// * `wi` - Incident direction.
    /// * `wo` - Outgoing direction.
    /// * `si` - Surface interaction.
    pub fn pdf(&self, wi: &Vector3f, wo: &Vector3f, si: &SurfaceInteraction) -> Float {
        self.brdf.pdf(self.arena, wi, wo, si)
    }

    /// Returns the emitted radiance.
    pub fn emission(&self) -> Spectrum {
        self.brdf.emission(self.arena)
    }

    /// Returns the capability flags.
    pub fn flags(&self) -> BrdfType {
        self.brdf.flags(self.arena)
    }

    /// Returns true if the BRDF emits light.
    pub fn is_emissive(&self) -> bool {
        self.flags().matches(BrdfType::EMISSIVE)
    }
}
