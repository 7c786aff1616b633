use crate::core::forcefield::scoring::Scorer;
use crate::core::models::system::ParticleSystem;
use crate::engine::config::EnergyConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use crate::engine::workers::WorkerPool;
use tracing::{info, instrument};

/// Outcome of a total-energy computation.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyReport {
    /// Total energy, `raw_energy * energy_coeff`.
    pub energy: f64,
    /// Sum of the screened raw Coulomb terms over all unique pairs.
    pub raw_energy: f64,
    /// Per-worker raw partials, in worker order.
    pub partials: Vec<f64>,
    pub workers: usize,
    pub pairs_visited: u64,
    /// Number of `(source, other)` entries in the bond-distance table.
    pub classified_pairs: usize,
}

/// Computes the total screened electrostatic energy of `system`.
///
/// Phase 1 classifies every particle's bond neighborhood up to `config.max_link`; only
/// once the complete table exists does phase 2 sum the pair energies across
/// `config.workers` strided workers. The energy coefficient is applied once, to the
/// combined raw sum.
///
/// # Errors
///
/// Returns an input error for an invalid configuration, a bond to a non-existent
/// particle, coincident particles or a non-finite total; worker failures are reported as
/// internal errors. No partial result is ever returned.
#[instrument(skip_all, name = "energy_workflow")]
pub fn run(
    system: &ParticleSystem,
    config: &EnergyConfig,
    reporter: &ProgressReporter,
) -> Result<EnergyReport, EngineError> {
    config.validate()?;
    info!(
        particles = system.len(),
        bonds = system.bond_count(),
        max_link = config.max_link,
        workers = config.workers,
        "Starting total energy calculation."
    );

    let pool = WorkerPool::new(config.workers)?;
    let workers = pool.workers();
    let rule = config.screening_rule();

    // === Phase 1: Bond-Distance Classification ===
    let table = pool.install(|| tasks::classification::run(system, rule.max_link(), reporter))?;

    // === Phase 2: All-Pairs Summation over the published table ===
    let scorer = Scorer::new(system, &table, rule);
    let sum = pool.install(|| tasks::pair_sum::run(&scorer, workers, reporter))?;

    let energy = sum.raw_energy * config.energy_coeff;
    if !energy.is_finite() {
        return Err(EngineError::NonFiniteEnergy { value: energy });
    }

    info!(energy, raw_energy = sum.raw_energy, "Total energy calculation finished.");
    reporter.report(Progress::Message(format!(
        "{} pairs summed across {} workers ({} within {} bonds)",
        sum.pairs_visited,
        workers,
        table.entry_count() / 2,
        rule.max_link()
    )));
    Ok(EnergyReport {
        energy,
        raw_energy: sum.raw_energy,
        partials: sum.partials,
        workers,
        pairs_visited: sum.pairs_visited,
        classified_pairs: table.entry_count(),
    })
}

/// Total energy of `system` without progress reporting.
pub fn compute_total_energy(
    system: &ParticleSystem,
    config: &EnergyConfig,
) -> Result<f64, EngineError> {
    run(system, config, &ProgressReporter::new()).map(|report| report.energy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::ParticleId;
    use crate::core::models::system::ParticleSystemBuilder;
    use crate::engine::config::{ConfigError, DEFAULT_ENERGY_COEFF};
    use crate::engine::error::ErrorKind;
    use nalgebra::Point3;
    use std::sync::Mutex;

    fn id(n: usize) -> ParticleId {
        ParticleId::new(n)
    }

    fn config(workers: usize) -> EnergyConfig {
        EnergyConfig {
            workers,
            ..EnergyConfig::default()
        }
    }

    fn system(positions: &[[f64; 3]], charges: &[f64], bonds: &[(usize, usize)]) -> ParticleSystem {
        let mut builder = ParticleSystemBuilder::with_capacity(positions.len());
        for (pos, &q) in positions.iter().zip(charges) {
            builder
                .add_particle(Point3::new(pos[0], pos[1], pos[2]), q)
                .unwrap();
        }
        for &(a, b) in bonds {
            builder.add_bond(id(a), id(b)).unwrap();
        }
        builder.build()
    }

    fn lattice(side: usize) -> ParticleSystem {
        let mut positions = Vec::new();
        let mut charges = Vec::new();
        let mut bonds = Vec::new();
        for x in 0..side {
            for y in 0..side {
                let index = positions.len();
                positions.push([1.5 * x as f64, 1.5 * y as f64, 0.1 * ((x * y) % 3) as f64]);
                charges.push(if (x + y) % 2 == 0 { 0.4 } else { -0.35 });
                if y > 0 {
                    bonds.push((index - 1, index));
                }
                if x > 0 && y % 3 == 0 {
                    bonds.push((index - side, index));
                }
            }
        }
        system(&positions, &charges, &bonds)
    }

    #[test]
    fn three_particle_chain_with_alternating_charges_is_fully_excluded() {
        let chain = system(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            &[1.0, -1.0, 1.0],
            &[(0, 1), (1, 2)],
        );
        let report = run(&chain, &config(2), &ProgressReporter::new()).unwrap();
        assert_eq!(report.raw_energy, 0.0);
        assert_eq!(report.energy, 0.0);
        assert_eq!(report.pairs_visited, 3);
    }

    #[test]
    fn four_particle_chain_halves_the_one_four_pair() {
        // Chain 0-1-2-3 folded into a unit square, so 0 and 3 are one unit apart.
        let chain = system(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            &[1.0, 1.0, 1.0, 1.0],
            &[(0, 1), (1, 2), (2, 3)],
        );
        for workers in [1, 2, 3, 8] {
            let report = run(&chain, &config(workers), &ProgressReporter::new()).unwrap();
            assert_eq!(report.raw_energy, 0.5);
            assert_eq!(report.energy, 0.5 * DEFAULT_ENERGY_COEFF);
            assert_eq!(report.pairs_visited, 6);
        }
    }

    #[test]
    fn equilateral_triangle_chain_is_fully_excluded() {
        let half_height = 3.0_f64.sqrt() / 2.0;
        let chain = system(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, half_height, 0.0]],
            &[1.0, -1.0, 1.0],
            &[(0, 1), (1, 2)],
        );
        for workers in [1, 2, 4] {
            let report = run(&chain, &config(workers), &ProgressReporter::new()).unwrap();
            assert_eq!(report.energy, 0.0);
        }
    }

    #[test]
    fn regular_tetrahedron_chain_halves_only_the_end_pair() {
        // Particles 0 and 3 sit on the x axis so their separation is exactly 1.
        let chain = system(
            &[
                [0.0, 0.0, 0.0],
                [0.5, 3.0_f64.sqrt() / 2.0, 0.0],
                [0.5, 3.0_f64.sqrt() / 6.0, (2.0_f64 / 3.0).sqrt()],
                [1.0, 0.0, 0.0],
            ],
            &[1.0, 1.0, 1.0, 1.0],
            &[(0, 1), (1, 2), (2, 3)],
        );
        for workers in [1, 3, 6] {
            let report = run(&chain, &config(workers), &ProgressReporter::new()).unwrap();
            assert_eq!(report.raw_energy, 0.5);
            assert_eq!(report.energy, 0.5 * DEFAULT_ENERGY_COEFF);
        }
    }

    #[test]
    fn disconnected_pair_contributes_full_coulomb_term() {
        let pair = system(&[[0.0, 0.0, 0.0], [0.0, 2.0, 0.0]], &[2.0, 3.0], &[]);
        let energy = compute_total_energy(&pair, &config(4)).unwrap();
        assert_eq!(energy, 3.0 * DEFAULT_ENERGY_COEFF);
    }

    #[test]
    fn empty_system_has_zero_energy() {
        let report = run(&ParticleSystem::new(), &config(3), &ProgressReporter::new()).unwrap();
        assert_eq!(report.energy, 0.0);
        assert_eq!(report.partials, vec![0.0; 3]);
    }

    #[test]
    fn energy_coefficient_is_applied_once() {
        let pair = system(&[[0.0, 0.0, 0.0], [0.0, 0.0, 4.0]], &[1.0, 2.0], &[]);
        let config = EnergyConfig {
            energy_coeff: 10.0,
            workers: 2,
            ..EnergyConfig::default()
        };
        let report = run(&pair, &config, &ProgressReporter::new()).unwrap();
        assert_eq!(report.raw_energy, 0.5);
        assert_eq!(report.energy, 5.0);
    }

    #[test]
    fn result_is_stable_across_worker_counts() {
        let system = lattice(6);
        let reference = compute_total_energy(&system, &config(1)).unwrap();
        for workers in [2, 4, 5, 13, 40] {
            let energy = compute_total_energy(&system, &config(workers)).unwrap();
            let tolerance = 1e-9 * reference.abs().max(1.0);
            assert!(
                (energy - reference).abs() < tolerance,
                "workers = {workers}: {energy} vs {reference}"
            );
        }
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let system = lattice(5);
        let first = run(&system, &config(3), &ProgressReporter::new()).unwrap();
        let second = run(&system, &config(3), &ProgressReporter::new()).unwrap();
        assert_eq!(first.energy.to_bits(), second.energy.to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn larger_screening_radius_excludes_more_pairs() {
        let chain = system(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [3.0, 0.0, 0.0], [4.0, 0.0, 0.0]],
            &[1.0; 5],
            &[(0, 1), (1, 2), (2, 3), (3, 4)],
        );
        let default = run(&chain, &config(1), &ProgressReporter::new()).unwrap();
        // 1-4 pairs (0,3) and (1,4) are halved; (0,4) is full.
        assert!((default.raw_energy - (1.0 / 3.0 + 0.25)).abs() < 1e-12);

        let wide = EnergyConfig {
            max_link: 4,
            workers: 1,
            ..EnergyConfig::default()
        };
        let report = run(&chain, &wide, &ProgressReporter::new()).unwrap();
        assert_eq!(report.raw_energy, 0.125);
    }

    #[test]
    fn coincident_particles_are_an_input_error() {
        let bonded = system(&[[1.0, 1.0, 1.0], [1.0, 1.0, 1.0]], &[1.0, 1.0], &[(0, 1)]);
        let err = compute_total_energy(&bonded, &config(2)).unwrap_err();
        assert!(matches!(err, EngineError::CoincidentParticles { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn invalid_configuration_is_rejected_before_any_work() {
        let pair = system(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], &[1.0, 1.0], &[]);
        let err = compute_total_energy(&pair, &config(0)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Config {
                source: ConfigError::InvalidParameter { name: "workers", .. }
            }
        ));
    }

    #[test]
    fn non_finite_total_is_reported() {
        let pair = system(&[[0.0, 0.0, 0.0], [1.0e-300, 0.0, 0.0]], &[1.0e10, 1.0e10], &[]);
        let err = compute_total_energy(&pair, &config(1)).unwrap_err();
        assert!(matches!(err, EngineError::NonFiniteEnergy { .. }));
    }

    #[test]
    fn phases_are_reported_in_order() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PhaseStart { name } = event {
                events.lock().unwrap().push(name);
            }
        }));
        run(&lattice(3), &config(2), &reporter).unwrap();
        drop(reporter);
        assert_eq!(
            events.into_inner().unwrap(),
            vec!["Bond-Distance Classification", "Pair Summation"]
        );
    }

    #[test]
    fn summary_message_reports_pairs_and_workers() {
        let messages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Message(text) = event {
                messages.lock().unwrap().push(text);
            }
        }));
        let chain = system(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [3.0, 0.0, 0.0]],
            &[1.0; 4],
            &[(0, 1), (1, 2), (2, 3)],
        );
        run(&chain, &config(2), &reporter).unwrap();
        drop(reporter);
        assert_eq!(
            messages.into_inner().unwrap(),
            vec!["6 pairs summed across 2 workers (6 within 3 bonds)".to_string()]
        );
    }
}
