use std::fmt;

/// Identity of a particle: its index into the particle store.
///
/// Identities are contiguous (`0..N`) and never reused during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ParticleId(usize);

impl ParticleId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for ParticleId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
