use crate::core::forcefield::screening::ScreeningRule;
use std::num::NonZeroUsize;
use thiserror::Error;

/// Coulomb constant in kJ·Å/(mol·e²): converts `q1 * q2 / r` with charges in elementary
/// charges and distances in Ångström into kJ/mol.
pub const DEFAULT_ENERGY_COEFF: f64 = 1389.38757;

/// 1-2 and 1-3 pairs excluded, 1-4 pairs halved.
pub const DEFAULT_MAX_LINK: usize = ScreeningRule::DEFAULT_MAX_LINK;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Number of hardware execution units, or 1 if it cannot be determined.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Tunables of the total-energy computation.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyConfig {
    /// Screening radius in bonds; also the classification depth.
    pub max_link: usize,
    /// Unit-conversion constant applied once to the summed raw energy.
    pub energy_coeff: f64,
    /// Number of parallel workers the pair summation is split across.
    pub workers: usize,
}

impl EnergyConfig {
    pub fn screening_rule(&self) -> ScreeningRule {
        ScreeningRule::new(self.max_link)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_link == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_link",
                reason: "the screening radius must be at least one bond".to_string(),
            });
        }
        if !self.energy_coeff.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "energy_coeff",
                reason: format!("expected a finite number, got {}", self.energy_coeff),
            });
        }
        if self.workers == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "workers",
                reason: "at least one worker is required".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            max_link: DEFAULT_MAX_LINK,
            energy_coeff: DEFAULT_ENERGY_COEFF,
            workers: available_workers(),
        }
    }
}

#[derive(Default)]
pub struct EnergyConfigBuilder {
    max_link: Option<usize>,
    energy_coeff: Option<f64>,
    workers: Option<usize>,
}

impl EnergyConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_link(mut self, max_link: usize) -> Self {
        self.max_link = Some(max_link);
        self
    }
    pub fn energy_coeff(mut self, coeff: f64) -> Self {
        self.energy_coeff = Some(coeff);
        self
    }
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// `max_link` and `energy_coeff` are required; `workers` falls back to the number of
    /// available hardware execution units.
    pub fn build(self) -> Result<EnergyConfig, ConfigError> {
        let config = EnergyConfig {
            max_link: self
                .max_link
                .ok_or(ConfigError::MissingParameter("max_link"))?,
            energy_coeff: self
                .energy_coeff
                .ok_or(ConfigError::MissingParameter("energy_coeff"))?,
            workers: self.workers.unwrap_or_else(available_workers),
        };
        config.validate()?;
        Ok(config)
    }
}
