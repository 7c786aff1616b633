//! # Bond Topology Module
//!
//! Graph algorithms over the bond adjacency of a [`ParticleSystem`].
//!
//! - [`bond_distance`] - Depth-bounded, level-synchronous breadth-first classification of
//!   bond distances from a source particle. This feeds the non-bonded screening rule.
//! - [`components`] - Connected components of the bond graph, for reporting.
//!
//! [`ParticleSystem`]: crate::core::models::system::ParticleSystem

use crate::core::models::ids::ParticleId;
use thiserror::Error;

pub mod bond_distance;
pub mod components;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Particle {0} not found in the system")]
    ParticleNotFound(ParticleId),
    #[error("Particle {particle} is bonded to {neighbor}, outside the range of {count} particles")]
    NeighborOutOfRange {
        particle: ParticleId,
        neighbor: ParticleId,
        count: usize,
    },
}
