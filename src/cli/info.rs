//! Info command implementation

use std::process::ExitCode;

use crate::cell::Cell;
use crate::palette::BiomePalette;
use crate::world::GridSummary;

use super::{Session, EXIT_ERROR, EXIT_SUCCESS};

fn print_grid(title: &str, summary: &GridSummary, label: impl Fn(i64) -> String) {
    println!(
        "{}: {}x{} ({} empty, {} tagged)",
        title, summary.height, summary.width, summary.empty, summary.tagged
    );
    for (id, count) in &summary.counts {
        println!("  {:<28} {}", label(*id), count);
    }
}

/// Execute the info command
pub fn run_info(session: &Session, json: bool) -> ExitCode {
    let world = match session.load_world() {
        Ok(world) => world,
        Err(code) => return code,
    };
    let summary = world.summary();

    if json {
        return match serde_json::to_string_pretty(&summary) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    let palette = BiomePalette::default();
    print_grid("Biome", &summary.biome, |id| palette.label(id));
    print_grid("Region", &summary.region, |id| world.lore.region_label(id));
    print_grid("Greater region", &summary.greater_region, |id| {
        world.lore.greater_region_cell_label(Cell::Scalar(id))
    });

    println!("Region names: {}", summary.region_names.len());
    println!("Greater region names: {}", summary.greater_region_names.len());
    ExitCode::from(EXIT_SUCCESS)
}
