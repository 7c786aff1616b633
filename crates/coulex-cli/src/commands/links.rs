use super::load_system;
use crate::cli::InputArgs;
use crate::error::{CliError, Result};
use coulex::core::models::system::ParticleSystem;
use std::io::Write;

pub fn run(args: InputArgs) -> Result<()> {
    let system = load_system(&args)?;
    write_links(&mut std::io::stdout().lock(), &system).map_err(CliError::Io)
}

/// One `<id>: <neighbor> <neighbor> ...` line per particle, in bond insertion order.
pub fn write_links(out: &mut impl Write, system: &ParticleSystem) -> std::io::Result<()> {
    for id in system.ids() {
        write!(out, "{}:", id)?;
        for neighbor in system.neighbors(id).unwrap_or_default() {
            write!(out, " {}", neighbor)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
