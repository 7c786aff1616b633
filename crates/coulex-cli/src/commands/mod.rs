pub mod components;
pub mod energy;
pub mod links;

use crate::cli::InputArgs;
use crate::error::Result;
use coulex::core::io::plain::PlainTextInput;
use coulex::core::models::system::ParticleSystem;
use tracing::info;

/// Loads the particle system named by the input flags.
pub fn load_system(input: &InputArgs) -> Result<ParticleSystem> {
    let paths = input.paths();
    info!(
        "Loading particles from {:?}, {:?} and {:?}",
        paths.atoms, paths.bonds, paths.charges
    );
    let system = PlainTextInput::read_from_paths(&paths)?;
    info!(
        particles = system.len(),
        bonds = system.bond_count(),
        "Input loaded."
    );
    Ok(system)
}
