//! # Force Field Module
//!
//! Screened electrostatics between pairs of particles.
//!
//! ## Overview
//!
//! The non-bonded electrostatic energy of a pair is the raw Coulomb term
//! `q_a * q_b / r`, multiplied by a screening factor that depends only on how many bonds
//! separate the two particles:
//!
//! | bond distance              | factor |
//! |----------------------------|--------|
//! | `1 ..< max_link` (1-2, 1-3) | 0      |
//! | `max_link` (1-4)           | 1/2    |
//! | farther or unreachable     | 1      |
//!
//! The global energy coefficient is *not* applied here; it is applied once to the final
//! sum by the reducer.
//!
//! ## Key Components
//!
//! - [`potentials`] - The raw Coulomb kernel
//! - [`screening`] - Mapping from bond distance to interaction strength
//! - [`energy`] - Screened pair energy of two particles
//! - [`scoring`] - Pair energies looked up by particle identity against a classification table

pub mod energy;
pub mod potentials;
pub mod scoring;
pub mod screening;
