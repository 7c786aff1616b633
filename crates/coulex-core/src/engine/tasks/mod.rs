//! The two computational phases of the energy workflow.
//!
//! [`classification`] builds the bond-distance table for every particle; [`pair_sum`]
//! reduces the screened pair energies over all unique pairs. Both run on the engine's
//! [`WorkerPool`](super::workers::WorkerPool) and report through the same
//! [`ProgressReporter`](super::progress::ProgressReporter).

pub mod classification;
pub mod pair_sum;
