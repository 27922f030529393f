//! Integration tests for world loading, painting, rendering and saving
//!
//! These tests drive the library through the same surface an editor uses,
//! with real save files in a temporary directory.

use std::fs;
use std::path::Path;

use image::Rgb;
use realmgrid::brush::{Brush, ModifierBrush};
use realmgrid::cell::Cell;
use realmgrid::codec::{decode, encode, load_grid, save_grid, GridIoError};
use realmgrid::grid::Grid;
use realmgrid::palette::BiomePalette;
use realmgrid::renderer::{render_biome, render_frame, HighlightStyle};
use realmgrid::store::{GridKind, WorldPaths, DEFAULT_COLUMN_HEIGHT};
use realmgrid::world::{load_world, WorldError};
use sha2::{Digest, Sha256};
use tempfile::TempDir;

const LORE: &str = r#"{
  "version": 3,
  "regions": {
    "title": ["Ashvale", "Mirefen", "Cinder Reach"],
    "history": ["...", "...", "..."]
  },
  "greaterRegions": {
    "title": ["The Hollow Crown", "Duskmarch"],
    "banner": [0, 1]
  }
}"#;

/// Write a small world: a 16-tile biome strip and 2x4 region grids.
fn write_world(dir: &Path) -> WorldPaths {
    let paths = WorldPaths::in_dir(dir);

    // 16 biome tokens infer a single row
    let biome = "[2,[2,12],10,-4.0,0,0,0,0,11,11,11,11,5,5,5,[5,3]]";
    let region = "[0,1,0,1,2,2,-4.0,-4.0]";
    let greater = "[1,1,0,0,-4.0,-4.0,1,0]";

    fs::write(&paths.biome, biome).expect("should write biome grid");
    fs::write(&paths.region, region).expect("should write region grid");
    fs::write(&paths.greater_region, greater).expect("should write greater region grid");
    fs::write(&paths.lore, LORE).expect("should write lore");
    paths
}

fn digest(bytes: &[u8]) -> String {
    Sha256::digest(bytes).iter().map(|b| format!("{:02x}", b)).collect()
}

#[test]
fn test_load_world_from_files() {
    let temp = TempDir::new().expect("should create temp dir");
    let paths = write_world(temp.path());

    let world = load_world(&paths, 2).expect("should load world");
    assert_eq!((world.grids.biome.height(), world.grids.biome.width()), (1, 16));
    assert_eq!((world.grids.region.height(), world.grids.region.width()), (2, 4));

    assert_eq!(world.cell_at(GridKind::Biome, 1, 0), Cell::Tagged(2, 12));
    assert_eq!(world.cell_at(GridKind::Region, 0, 1), Cell::Scalar(1));
    assert_eq!(world.cell_at(GridKind::Region, 3, 0), Cell::Empty);
    assert_eq!(world.lore.region_name(2), Some("Cinder Reach"));
    assert_eq!(world.lore.greater_region_name(1), Some("Duskmarch"));
}

#[test]
fn test_load_world_missing_files() {
    let temp = TempDir::new().expect("should create temp dir");
    let paths = WorldPaths::in_dir(temp.path());

    let world = load_world(&paths, DEFAULT_COLUMN_HEIGHT).expect("missing files are not errors");
    assert_eq!((world.grids.biome.height(), world.grids.biome.width()), (256, 256));
    assert_eq!((world.grids.region.height(), world.grids.region.width()), (224, 256));
    assert!(world.grids.greater_region.iter().all(|(_, _, c)| c == Cell::Empty));
    assert!(world.lore.region_names.is_empty());
}

#[test]
fn test_load_world_unreadable_grid() {
    let temp = TempDir::new().expect("should create temp dir");
    let paths = WorldPaths::in_dir(temp.path());
    // A directory where the biome file should be cannot be read as a file
    fs::create_dir(&paths.biome).expect("should create directory");

    let err = load_world(&paths, DEFAULT_COLUMN_HEIGHT).unwrap_err();
    assert!(matches!(err, WorldError::Grid(GridIoError::Read { .. })));
}

#[test]
fn test_file_round_trip_preserves_cells() {
    let temp = TempDir::new().expect("should create temp dir");
    let path = temp.path().join("regionGrid.save");

    let mut grid = Grid::empty(4, 6);
    grid.set(0, 0, Cell::Scalar(3));
    grid.set(3, 5, Cell::Tagged(7, 12));
    grid.set(2, 1, Cell::Scalar(0));
    save_grid(&grid, &path).expect("should save grid");

    let loaded = load_grid(&path, Some(4)).expect("should load grid");
    assert_eq!(loaded, grid);
    assert_eq!(encode(&loaded), fs::read_to_string(&path).expect("should read grid"));
}

#[test]
fn test_decode_native_biome_grid() {
    // A full 256x256 biome save infers 256 rows
    let text = format!("[{}]", vec!["10"; 256 * 256].join(","));
    let grid = decode(&text, None);
    assert_eq!((grid.height(), grid.width()), (256, 256));
    assert_eq!(grid.get(255, 255), Cell::Scalar(10));
}

#[test]
fn test_render_is_byte_identical() {
    let temp = TempDir::new().expect("should create temp dir");
    let paths = write_world(temp.path());
    let palette = BiomePalette::default();
    let style = HighlightStyle::default();

    let world = load_world(&paths, 2).expect("should load world");
    let first = world.render_frame(&palette, Some(1), &style).into_raw();

    let reloaded = load_world(&paths, 2).expect("should reload world");
    let second = reloaded.render_frame(&palette, Some(1), &style).into_raw();

    assert_eq!(digest(&first), digest(&second));
}

#[test]
fn test_highlight_changes_only_matching_tiles() {
    let mut biomes = Grid::empty(2, 2);
    let mut greater = Grid::empty(2, 2);
    for row in 0..2 {
        for col in 0..2 {
            biomes.set(row, col, Cell::Scalar(2));
        }
    }
    greater.set(1, 0, Cell::Scalar(4));
    greater.set(0, 1, Cell::Scalar(5));

    let palette = BiomePalette::default();
    let base = render_biome(&biomes, &palette);
    let frame = render_frame(&biomes, &greater, Some(4), &palette, &HighlightStyle::default());

    assert_eq!(*frame.get_pixel(0, 1), Rgb([140, 82, 24]));
    assert_eq!(frame.get_pixel(1, 0), base.get_pixel(1, 0));
    assert_eq!(frame.get_pixel(0, 0), base.get_pixel(0, 0));
    assert_eq!(frame.get_pixel(1, 1), base.get_pixel(1, 1));
}

#[test]
fn test_paint_save_reload() {
    let temp = TempDir::new().expect("should create temp dir");
    let paths = write_world(temp.path());

    let mut world = load_world(&paths, 2).expect("should load world");
    let brush = Brush {
        biome: Some(9),
        modifier: ModifierBrush::Apply(12),
        region: Some(2),
        ..Brush::default()
    }
    .clear_greater_region();

    assert_eq!(brush.apply(&mut world.grids, 3, 0), 1);
    world.save(&paths).expect("should save world");

    let reloaded = load_world(&paths, 2).expect("should reload world");
    assert_eq!(reloaded.cell_at(GridKind::Biome, 3, 0), Cell::Tagged(9, 12));
    assert_eq!(reloaded.cell_at(GridKind::Region, 3, 0), Cell::Scalar(2));
    // The clear sentinel reads back as an empty tile
    assert_eq!(reloaded.cell_at(GridKind::GreaterRegion, 3, 0), Cell::Empty);
    assert_eq!(
        reloaded.describe_tile(&BiomePalette::default(), 3, 0).as_deref(),
        Some("Region: Cinder Reach(2) | Greater Region: None | Biome: Mountains(9) | Biome Mod: Dreadlands")
    );
}

#[test]
fn test_save_world_unwritable_destination() {
    let temp = TempDir::new().expect("should create temp dir");
    let paths = write_world(temp.path());
    let world = load_world(&paths, 2).expect("should load world");

    let missing = WorldPaths::in_dir(&temp.path().join("gone"));
    let err = world.save(&missing).unwrap_err();
    assert!(matches!(err, WorldError::Grid(GridIoError::Write { .. })));

    // The original files are untouched
    let reloaded = load_world(&paths, 2).expect("should reload world");
    assert_eq!(reloaded.grids, world.grids);
}
