//! # COULEX Core Library
//!
//! Computes the total electrostatic energy of a set of point charges connected by a
//! bond graph, using the molecular-mechanics non-bonded screening convention: 1-2 and
//! 1-3 bonded pairs are excluded, 1-4 pairs are halved, and every other pair (including
//! pairs in disconnected components) contributes the full Coulomb term.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Immutable data models (`ParticleSystem`), the bond-graph
//!   traversal that classifies bond distances, the pure pairwise energy function, and
//!   plain-text input parsing.
//!
//! - **[`engine`]: The Logic Core.** Configuration, error taxonomy, progress reporting and
//!   the two computational phases: per-particle classification and the strided parallel
//!   all-pairs reduction.
//!
//! - **[`workflows`]: The Public API.** The "compute total energy" entry point, which ties
//!   the phases together behind an explicit publish barrier.

pub mod core;
pub mod engine;
pub mod workflows;
