//! Inspect command implementation (tile tooltip)

use std::process::ExitCode;

use crate::palette::BiomePalette;

use super::{Session, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the inspect command - describe one tile
pub fn run_inspect(session: &Session, x: i64, y: i64) -> ExitCode {
    let world = match session.load_world() {
        Ok(world) => world,
        Err(code) => return code,
    };

    match world.describe_tile(&BiomePalette::default(), x, y) {
        Some(text) => {
            println!("{}", text);
            ExitCode::from(EXIT_SUCCESS)
        }
        None => {
            eprintln!(
                "Error: tile ({}, {}) is outside the {}x{} map",
                x,
                y,
                world.grids.biome.width(),
                world.grids.biome.height()
            );
            ExitCode::from(EXIT_ERROR)
        }
    }
}
