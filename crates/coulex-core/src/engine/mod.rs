//! # Engine Module
//!
//! The computational layer of COULEX: everything between an immutable
//! [`ParticleSystem`](crate::core::models::system::ParticleSystem) and a scalar energy.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Screening radius, energy coefficient and worker count
//! - **Error Handling** ([`error`]) - The engine error taxonomy and its input/internal split
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Worker Pool** ([`workers`]) - The fixed-size pool both phases run on
//! - **Tasks** ([`tasks`]) - Phase 1 (bond-distance classification) and phase 2 (the
//!   strided all-pairs reduction)
//!
//! Phase 1 produces a [`BondDistanceTable`](crate::core::topology::bond_distance::BondDistanceTable)
//! that is fully built before phase 2 starts and only read from then on; no worker ever
//! writes to shared state.

pub mod config;
pub mod error;
pub mod progress;
pub mod tasks;
pub mod workers;
