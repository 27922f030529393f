//! Render command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::cell::Cell;
use crate::output::save_png;
use crate::palette::BiomePalette;
use crate::renderer::{highlighted_tiles, scale};

use super::{Session, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the render command - write the biome map as a PNG
pub fn run_render(session: &Session, output: &Path, highlight: Option<i64>) -> ExitCode {
    let world = match session.load_world() {
        Ok(world) => world,
        Err(code) => return code,
    };

    let palette = BiomePalette::default();
    let style = session.config.display.highlight_style();
    let frame = world.render_frame(&palette, highlight, &style);
    let tiles = highlighted_tiles(&world.grids.greater_region, highlight, frame.width(), frame.height()).count();
    let frame = scale(frame, session.config.display.scale);

    if let Err(e) = save_png(&frame, output) {
        eprintln!("Error: Failed to save '{}': {}", output.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    if let Some(id) = highlight {
        println!(
            "Highlighted {} ({} tiles)",
            world.lore.greater_region_cell_label(Cell::Scalar(id)),
            tiles
        );
    }

    println!("Saved: {} ({}x{})", output.display(), frame.width(), frame.height());
    ExitCode::from(EXIT_SUCCESS)
}
