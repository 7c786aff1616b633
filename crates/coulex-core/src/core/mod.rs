//! # Core Module
//!
//! Fundamental building blocks of the energy calculation.
//!
//! - **Particle Representation** ([`models`]) - Particles, identifiers and the bonded particle store
//! - **Bond Topology** ([`topology`]) - Bond-distance classification and connected components
//! - **Electrostatics** ([`forcefield`]) - Raw Coulomb term, screening rule and pair energy
//! - **File I/O** ([`io`]) - Reading the whitespace-separated coordinate, bond and charge files
//!
//! Everything in this layer is stateless with respect to a run: the particle store is
//! immutable once built, and the classification maps are plain values owned by whoever
//! computed them.

pub mod forcefield;
pub mod io;
pub mod models;
pub mod topology;
