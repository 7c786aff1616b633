//! # Workflows Module
//!
//! Top-level entry points of the COULEX library.
//!
//! A workflow validates its configuration, sets up the worker pool, runs the engine
//! phases in order and turns their raw output into a result in physical units.
//!
//! - **Energy Workflow** ([`energy`]) - Total screened electrostatic energy of a
//!   particle system.

pub mod energy;
