//! # Core Models Module
//!
//! Data structures representing a bonded system of point charges.
//!
//! - [`ids`] - Stable, contiguous particle identifiers
//! - [`particle`] - A single charged point with a 3D position
//! - [`system`] - The particle store with symmetric bond adjacency
//!
//! ```ignore
//! use coulex::core::models::system::ParticleSystemBuilder;
//! use nalgebra::Point3;
//!
//! let mut builder = ParticleSystemBuilder::new();
//! let a = builder.add_particle(Point3::new(0.0, 0.0, 0.0), 0.4)?;
//! let b = builder.add_particle(Point3::new(1.0, 0.0, 0.0), -0.4)?;
//! builder.add_bond(a, b)?;
//! let system = builder.build();
//! ```

pub mod ids;
pub mod particle;
pub mod system;
