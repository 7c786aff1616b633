use super::load_system;
use crate::cli::EnergyArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::utils::progress::ProgressView;
use coulex::engine::progress::ProgressReporter;
use coulex::workflows;
use std::io::Write;
use tracing::info;

pub fn run(args: EnergyArgs, threads: Option<usize>, quiet: bool) -> Result<()> {
    if threads == Some(0) {
        return Err(CliError::Argument(
            "--threads must be at least 1".to_string(),
        ));
    }

    info!("Merging configuration from file and CLI arguments...");
    let final_config = config::resolve(&args, threads)?;
    let system = load_system(&args.input)?;

    let view = if quiet {
        ProgressView::hidden()
    } else {
        ProgressView::stderr()
    };
    let reporter = ProgressReporter::with_callback(view.callback());

    info!("Invoking the core energy workflow...");
    let report = workflows::energy::run(&system, &final_config, &reporter)?;
    info!(
        workers = report.workers,
        pairs = report.pairs_visited,
        classified_pairs = report.classified_pairs,
        "Energy workflow finished."
    );

    write_result(&mut std::io::stdout().lock(), report.energy)?;
    Ok(())
}

pub fn write_result(out: &mut impl Write, energy: f64) -> std::io::Result<()> {
    writeln!(out, "Result: {}", energy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use coulex::engine::config::DEFAULT_ENERGY_COEFF;
    use std::fs;

    #[test]
    fn result_line_uses_shortest_float_representation() {
        let mut out = Vec::new();
        write_result(&mut out, 694.693785).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Result: 694.693785\n");
    }

    #[test]
    fn zero_threads_is_an_argument_error() {
        let cli = Cli::parse_from(["coulex", "energy"]);
        let Commands::Energy(args) = cli.command else {
            panic!("Expected 'energy' subcommand");
        };
        assert!(matches!(
            run(args, Some(0), true),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn energy_of_input_files_matches_library() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("atoms.txt"), "0 0 0\n0 2 0\n").unwrap();
        fs::write(dir.path().join("bonds.txt"), "").unwrap();
        fs::write(dir.path().join("charges.txt"), "2 3\n").unwrap();

        let cli = Cli::parse_from([
            "coulex",
            "energy",
            "--input-dir",
            dir.path().to_str().unwrap(),
        ]);
        let Commands::Energy(args) = cli.command else {
            panic!("Expected 'energy' subcommand");
        };

        let config = config::resolve(&args, Some(2)).unwrap();
        let system = load_system(&args.input).unwrap();
        let energy = workflows::energy::compute_total_energy(&system, &config).unwrap();
        assert_eq!(energy, 3.0 * DEFAULT_ENERGY_COEFF);
    }
}
