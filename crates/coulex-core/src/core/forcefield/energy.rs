use super::potentials;
use super::screening::{Screening, ScreeningRule};
use crate::core::models::particle::Particle;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnergyCalculationError {
    #[error("Particles are at the same position; the Coulomb term is undefined")]
    ZeroDistance,
}

pub struct EnergyCalculator;

impl EnergyCalculator {
    /// Unscreened Coulomb term of a pair.
    ///
    /// # Errors
    ///
    /// Returns [`EnergyCalculationError::ZeroDistance`] for coincident particles.
    pub fn raw_coulomb(a: &Particle, b: &Particle) -> Result<f64, EnergyCalculationError> {
        let dist = a.distance_to(b);
        if dist == 0.0 {
            return Err(EnergyCalculationError::ZeroDistance);
        }
        Ok(potentials::coulomb(dist, a.charge, b.charge))
    }

    /// Screened Coulomb contribution of the ordered pair `(source, target)`.
    ///
    /// `bond_distance` is the target's entry in the source's classification map. The
    /// distance check comes first, so coincident particles are reported even when the
    /// pair would be excluded.
    pub fn screened_coulomb(
        source: &Particle,
        target: &Particle,
        bond_distance: Option<usize>,
        rule: &ScreeningRule,
    ) -> Result<f64, EnergyCalculationError> {
        let v = Self::raw_coulomb(source, target)?;
        let screening = rule.classify(bond_distance);
        Ok(match screening {
            Screening::Excluded => 0.0,
            _ => v * screening.factor(),
        })
    }
}
