use clap::{Args, Parser, Subcommand};
use coulex::core::io::plain::InputPaths;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "COULEX Developers",
    version,
    about = "COULEX CLI - Screened electrostatic energy of bonded point-charge systems.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of workers for the energy summation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the total screened electrostatic energy of the system.
    Energy(EnergyArgs),
    /// List the connected components of the bond graph.
    Components(InputArgs),
    /// Print the bonded neighbors of every particle.
    Links(InputArgs),
}

/// Locations of the three plain-text input files.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Directory holding atoms.txt, bonds.txt and charges.txt.
    /// Defaults to the working directory.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Particle coordinates, whitespace-separated `x y z` triples.
    #[arg(long, value_name = "PATH")]
    pub atoms: Option<PathBuf>,

    /// Bonds, whitespace-separated pairs of particle indices.
    #[arg(long, value_name = "PATH")]
    pub bonds: Option<PathBuf>,

    /// Charges, one whitespace-separated value per particle.
    #[arg(long, value_name = "PATH")]
    pub charges: Option<PathBuf>,
}

impl InputArgs {
    /// Default file names inside the input directory, with explicit file flags taking precedence.
    pub fn paths(&self) -> InputPaths {
        let mut paths = self
            .input_dir
            .as_ref()
            .map(InputPaths::in_dir)
            .unwrap_or_default();
        if let Some(atoms) = &self.atoms {
            paths.atoms = atoms.clone();
        }
        if let Some(bonds) = &self.bonds {
            paths.bonds = bonds.clone();
        }
        if let Some(charges) = &self.charges {
            paths.charges = charges.clone();
        }
        paths
    }
}

/// Arguments for the `energy` subcommand.
#[derive(Args, Debug)]
pub struct EnergyArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the screening radius in bonds.
    #[arg(long, value_name = "INT")]
    pub max_link: Option<usize>,

    /// Override the energy unit coefficient.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub energy_coeff: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S energy.max-link=4
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
