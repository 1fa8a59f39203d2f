//! Airports command handler listing the served hubs.

use anyhow::Result;
use skycargo_cli::output::{render_airports, OutputFormat};
use skycargo_cli::terminal::ColorPalette;
use skycargo_lib::AirportRegistry;

/// Print every airport in the registry, sorted by code.
pub fn handle_airports_command(format: OutputFormat) -> Result<()> {
    let rendered = render_airports(
        AirportRegistry::builtin().all(),
        format,
        &ColorPalette::detect(),
    )?;
    print!("{rendered}");
    Ok(())
}
