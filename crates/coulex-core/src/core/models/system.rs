use super::ids::ParticleId;
use super::particle::Particle;
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SystemError {
    #[error("Particle {id} has a non-finite position or charge")]
    NonFiniteParticle { id: ParticleId },
    #[error("Bond references particle {id}, but the system only has {count} particles")]
    ParticleOutOfRange { id: ParticleId, count: usize },
    #[error("Particle {id} cannot be bonded to itself")]
    SelfBond { id: ParticleId },
    #[error("Adjacency table has {adjacency} entries for {particles} particles")]
    AdjacencyLengthMismatch { particles: usize, adjacency: usize },
}

/// The particle store: positions, charges and symmetric bond adjacency.
///
/// Particle identities are the contiguous indices `0..len()`. Once built, the store is
/// never mutated, which is what allows the energy phase to share it across workers
/// without any synchronization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleSystem {
    /// Primary particle storage, indexed by `ParticleId`.
    particles: Vec<Particle>,
    /// Directly bonded neighbors of each particle, indexed by `ParticleId`.
    adjacency: Vec<Vec<ParticleId>>,
    /// Number of unique undirected bonds.
    bond_count: usize,
}

impl ParticleSystem {
    /// Creates a new, empty particle system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a system from already-prepared parts.
    ///
    /// Only the table lengths are checked. Bond symmetry and the range of neighbor ids
    /// are the caller's responsibility; the bond-distance classifier rejects
    /// out-of-range neighbors when it meets them.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::AdjacencyLengthMismatch`] if `adjacency` does not have
    /// exactly one entry per particle.
    pub fn from_parts(
        particles: Vec<Particle>,
        adjacency: Vec<Vec<ParticleId>>,
    ) -> Result<Self, SystemError> {
        if particles.len() != adjacency.len() {
            return Err(SystemError::AdjacencyLengthMismatch {
                particles: particles.len(),
                adjacency: adjacency.len(),
            });
        }
        let directed: usize = adjacency.iter().map(Vec::len).sum();
        Ok(Self {
            particles,
            adjacency,
            bond_count: directed / 2,
        })
    }

    /// Number of particles in the system.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Retrieves a particle by its ID.
    ///
    /// # Return
    ///
    /// Returns `Some(&Particle)` if the particle exists, otherwise `None`.
    #[inline]
    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.index())
    }

    /// All particles, in identity order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Directly bonded neighbors of a particle.
    ///
    /// # Return
    ///
    /// Returns `Some(&[ParticleId])` if the particle exists, otherwise `None`.
    #[inline]
    pub fn neighbors(&self, id: ParticleId) -> Option<&[ParticleId]> {
        self.adjacency.get(id.index()).map(Vec::as_slice)
    }

    /// Number of unique bonds.
    pub fn bond_count(&self) -> usize {
        self.bond_count
    }

    /// Iterator over every particle identity, in order.
    pub fn ids(&self) -> impl Iterator<Item = ParticleId> + '_ {
        (0..self.particles.len()).map(ParticleId::new)
    }

    /// Iterator over every bond exactly once, as `(lower, higher)` identity pairs.
    pub fn bonds(&self) -> impl Iterator<Item = (ParticleId, ParticleId)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(index, neighbors)| {
                let id = ParticleId::new(index);
                neighbors
                    .iter()
                    .filter(move |&&other| other > id)
                    .map(move |&other| (id, other))
            })
    }
}

/// Incremental, validating constructor for [`ParticleSystem`].
#[derive(Debug, Default)]
pub struct ParticleSystemBuilder {
    system: ParticleSystem,
}

impl ParticleSystemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(particles: usize) -> Self {
        Self {
            system: ParticleSystem {
                particles: Vec::with_capacity(particles),
                adjacency: Vec::with_capacity(particles),
                bond_count: 0,
            },
        }
    }

    /// Appends a particle and returns its identity.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::NonFiniteParticle`] if any coordinate or the charge is NaN
    /// or infinite.
    pub fn add_particle(
        &mut self,
        position: Point3<f64>,
        charge: f64,
    ) -> Result<ParticleId, SystemError> {
        let id = ParticleId::new(self.system.particles.len());
        let particle = Particle::new(position, charge);
        if !particle.is_finite() {
            return Err(SystemError::NonFiniteParticle { id });
        }
        self.system.particles.push(particle);
        self.system.adjacency.push(Vec::new());
        Ok(id)
    }

    /// Adds a symmetric bond between two existing particles.
    ///
    /// Adding a bond that already exists is a no-op.
    ///
    /// # Return
    ///
    /// Returns `Ok(true)` if the bond is new, `Ok(false)` if it was already present.
    ///
    /// # Errors
    ///
    /// Returns an error if either identity is out of range or both are the same particle.
    pub fn add_bond(&mut self, a: ParticleId, b: ParticleId) -> Result<bool, SystemError> {
        let count = self.system.particles.len();
        for id in [a, b] {
            if id.index() >= count {
                return Err(SystemError::ParticleOutOfRange { id, count });
            }
        }
        if a == b {
            return Err(SystemError::SelfBond { id: a });
        }
        if self.system.adjacency[a.index()].contains(&b) {
            return Ok(false);
        }
        self.system.adjacency[a.index()].push(b);
        self.system.adjacency[b.index()].push(a);
        self.system.bond_count += 1;
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.system.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.system.particles.is_empty()
    }

    pub fn build(self) -> ParticleSystem {
        self.system
    }
}
