use super::load_system;
use crate::cli::InputArgs;
use crate::error::{CliError, Result};
use coulex::core::topology::components::{Component, connected_components};
use coulex::engine::error::EngineError;
use std::io::Write;
use tracing::info;

pub fn run(args: InputArgs) -> Result<()> {
    let system = load_system(&args)?;
    let components = connected_components(&system).map_err(EngineError::from)?;
    info!(count = components.len(), "Connected components found.");

    write_components(&mut std::io::stdout().lock(), &components).map_err(CliError::Io)
}

/// One `<root>: <size>` line per component, roots in ascending order.
pub fn write_components(out: &mut impl Write, components: &[Component]) -> std::io::Result<()> {
    for component in components {
        writeln!(out, "{}: {}", component.root, component.len())?;
    }
    Ok(())
}
