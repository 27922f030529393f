//! Paint command implementation
//!
//! Read-modify-write: loads the world, applies one brush stroke and saves
//! all three grids.

use std::process::ExitCode;

use crate::brush::{Brush, ModifierBrush};
use crate::palette::BiomePalette;

use super::{Session, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the paint command
pub fn run_paint(
    session: &Session,
    x: i64,
    y: i64,
    biome: Option<i64>,
    modifier: Option<i64>,
    erase_modifier: bool,
    region: Option<i64>,
    greater_region: Option<i64>,
    clear_greater_region: bool,
    radius: u32,
    dry_run: bool,
) -> ExitCode {
    let modifier = match (modifier, erase_modifier) {
        (_, true) => ModifierBrush::Erase,
        (Some(m), false) => ModifierBrush::Apply(m),
        (None, false) => ModifierBrush::Keep,
    };

    let mut brush = Brush { biome, modifier, region, greater_region, radius };
    if clear_greater_region {
        brush = brush.clear_greater_region();
    }

    if brush.biome.is_none()
        && brush.modifier == ModifierBrush::Keep
        && brush.region.is_none()
        && brush.greater_region.is_none()
    {
        eprintln!("Error: nothing to paint. Select at least one of --biome, --modifier, --erase-modifier, --region, --greater-region, --clear-greater-region");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut world = match session.load_world() {
        Ok(world) => world,
        Err(code) => return code,
    };

    let painted = brush.apply(&mut world.grids, x, y);
    if painted == 0 {
        eprintln!(
            "Warning: stroke at ({}, {}) is entirely outside the {}x{} map",
            x,
            y,
            world.grids.biome.width(),
            world.grids.biome.height()
        );
    }

    if let Some(text) = world.describe_tile(&BiomePalette::default(), x, y) {
        println!("{}", text);
    }

    if dry_run {
        println!("Painted {} tile(s) (dry run, not saved)", painted);
        return ExitCode::from(EXIT_SUCCESS);
    }

    match world.save(&session.paths) {
        Ok(()) => {
            println!("Painted {} tile(s)", painted);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
