use crate::core::models::ids::ParticleId;
use crate::core::models::system::ParticleSystem;
use crate::core::topology::TopologyError;
use crate::core::topology::bond_distance::{BondDistanceMap, BondDistanceTable, classify};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Classifies every particle of the system up to `max_depth` bonds.
///
/// Each particle is classified independently, so the work is spread over the current
/// rayon pool. The returned table is indexed by particle identity and is complete: any
/// failing particle aborts the phase.
#[instrument(skip_all, name = "classification_task")]
pub fn run(
    system: &ParticleSystem,
    max_depth: usize,
    reporter: &ProgressReporter,
) -> Result<BondDistanceTable, EngineError> {
    info!(
        particles = system.len(),
        max_depth, "Starting bond-distance classification."
    );
    reporter.report(Progress::PhaseStart {
        name: "Bond-Distance Classification",
    });
    reporter.report(Progress::TaskStart {
        total_steps: system.len() as u64,
    });

    let sources: Vec<ParticleId> = system.ids().collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = sources.iter();

    #[cfg(feature = "parallel")]
    let iterator = sources.par_iter();

    let maps: Result<Vec<BondDistanceMap>, TopologyError> = iterator
        .map(|&source| {
            let map = classify(system, source, max_depth);
            reporter.report(Progress::TaskIncrement);
            map
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    let table = BondDistanceTable::new(max_depth, maps?);

    info!(
        classified_pairs = table.entry_count(),
        "Bond-distance classification finished."
    );
    reporter.report(Progress::PhaseFinish);
    Ok(table)
}
