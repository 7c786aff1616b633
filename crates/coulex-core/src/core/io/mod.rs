//! Provides input functionality for particle systems.
//!
//! The only supported format is the plain whitespace-separated triple of files
//! (coordinates, bonds, charges) described in [`plain`]. Loading is entirely separate
//! from the energy computation; the engine only ever sees a built
//! [`ParticleSystem`](crate::core::models::system::ParticleSystem).

pub mod plain;
