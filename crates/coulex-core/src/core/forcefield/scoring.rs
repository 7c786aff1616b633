use super::energy::{EnergyCalculationError, EnergyCalculator};
use super::screening::ScreeningRule;
use crate::core::models::ids::ParticleId;
use crate::core::models::system::ParticleSystem;
use crate::core::topology::bond_distance::BondDistanceTable;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Particle with ID {0} not found in the system")]
    ParticleNotFound(ParticleId),
    #[error("No bond-distance classification available for particle {0}")]
    MissingClassification(ParticleId),
    #[error("Particles {first} and {second} are coincident")]
    CoincidentParticles {
        first: ParticleId,
        second: ParticleId,
    },
}

/// Screened pair energies of a particle system, addressed by particle identity.
///
/// Holds only shared references to immutable data, so one scorer can be used from many
/// worker threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    system: &'a ParticleSystem,
    table: &'a BondDistanceTable,
    rule: ScreeningRule,
}

impl<'a> Scorer<'a> {
    pub fn new(
        system: &'a ParticleSystem,
        table: &'a BondDistanceTable,
        rule: ScreeningRule,
    ) -> Self {
        Self {
            system,
            table,
            rule,
        }
    }

    pub fn system(&self) -> &'a ParticleSystem {
        self.system
    }

    /// Raw (coefficient-free) screened Coulomb energy of `target` as seen from `source`,
    /// using the source's classification map.
    pub fn pair_energy(&self, source: ParticleId, target: ParticleId) -> Result<f64, ScoringError> {
        let source_particle = self
            .system
            .particle(source)
            .ok_or(ScoringError::ParticleNotFound(source))?;
        let target_particle = self
            .system
            .particle(target)
            .ok_or(ScoringError::ParticleNotFound(target))?;
        let source_map = self
            .table
            .get(source)
            .ok_or(ScoringError::MissingClassification(source))?;

        EnergyCalculator::screened_coulomb(
            source_particle,
            target_particle,
            source_map.get(target),
            &self.rule,
        )
        .map_err(|e| match e {
            EnergyCalculationError::ZeroDistance => ScoringError::CoincidentParticles {
                first: source,
                second: target,
            },
        })
    }
}
