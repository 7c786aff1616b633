use thiserror::Error;

use super::config::ConfigError;
use crate::core::forcefield::scoring::ScoringError;
use crate::core::models::ids::ParticleId;
use crate::core::topology::TopologyError;

/// Broad category of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input system or configuration is malformed; fixing the input fixes the error.
    InvalidInput,
    /// A failure inside the engine itself.
    Internal,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error(
        "Particle {particle} is bonded to particle {neighbor}, but the system only has {count} particles"
    )]
    BondOutOfRange {
        particle: ParticleId,
        neighbor: ParticleId,
        count: usize,
    },

    #[error("Particles {first} and {second} occupy the same position")]
    CoincidentParticles {
        first: ParticleId,
        second: ParticleId,
    },

    #[error("Bond-distance classification failed: {0}")]
    Topology(TopologyError),

    #[error("Energy scoring failed: {0}")]
    Scoring(ScoringError),

    #[error("Total energy is not a finite number: {value}")]
    NonFiniteEnergy { value: f64 },

    #[error("Worker {worker} failed: {reason}")]
    WorkerFailed { worker: usize, reason: String },

    #[error("Failed to build the worker thread pool: {0}")]
    ThreadPool(String),

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Config { .. }
            | EngineError::BondOutOfRange { .. }
            | EngineError::CoincidentParticles { .. }
            | EngineError::NonFiniteEnergy { .. } => ErrorKind::InvalidInput,
            EngineError::Topology(_)
            | EngineError::Scoring(_)
            | EngineError::WorkerFailed { .. }
            | EngineError::ThreadPool(_)
            | EngineError::Internal(_) => ErrorKind::Internal,
        }
    }

    #[inline]
    pub fn is_input_error(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}

impl From<TopologyError> for EngineError {
    fn from(err: TopologyError) -> Self {
        match err {
            TopologyError::NeighborOutOfRange {
                particle,
                neighbor,
                count,
            } => EngineError::BondOutOfRange {
                particle,
                neighbor,
                count,
            },
            other => EngineError::Topology(other),
        }
    }
}

impl From<ScoringError> for EngineError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::CoincidentParticles { first, second } => {
                EngineError::CoincidentParticles { first, second }
            }
            other => EngineError::Scoring(other),
        }
    }
}
