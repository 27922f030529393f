//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod fmt;
mod info;
mod inspect;
mod paint;
mod render;

use clap::{Args, Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, RealmConfig};
use crate::store::WorldPaths;
use crate::world::{load_world, World};

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Realm - inspect, paint and render tile-based world maps
#[derive(Parser)]
#[command(name = "realm")]
#[command(about = "Realm - inspect, paint and render biome/region world grids")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to realm.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the world's save files
    #[arg(long, global = true)]
    pub world: Option<PathBuf>,

    /// Height of the region and greater-region grids
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub column_height: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the biome map to a PNG
    #[command(allow_negative_numbers = true)]
    Render {
        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Highlight the tiles of this greater region
        #[arg(long)]
        highlight: Option<i64>,

        /// Scale factor (default: display.scale from realm.toml)
        #[arg(long)]
        scale: Option<f32>,
    },

    /// Show grid dimensions, cell counts and lore names
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Describe the tile at column X, row Y
    #[command(allow_negative_numbers = true)]
    Inspect {
        x: i64,
        y: i64,
    },

    /// Paint one brush stroke at column X, row Y and save the world
    #[command(allow_negative_numbers = true)]
    Paint {
        x: i64,
        y: i64,

        /// Biome id to paint
        #[arg(long)]
        biome: Option<i64>,

        /// Biome modifier to apply (12 = Dreadlands)
        #[arg(long, conflicts_with = "erase_modifier", value_parser = clap::value_parser!(i64).range(0..))]
        modifier: Option<i64>,

        /// Strip biome modifiers under the brush
        #[arg(long)]
        erase_modifier: bool,

        /// Region id to paint
        #[arg(long)]
        region: Option<i64>,

        /// Greater region id to paint
        #[arg(long, conflicts_with = "clear_greater_region")]
        greater_region: Option<i64>,

        /// Remove the greater region under the brush
        #[arg(long)]
        clear_greater_region: bool,

        /// Brush radius; 1 paints a single tile
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=crate::brush::MAX_RADIUS as i64))]
        radius: u32,

        /// Show the result without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Rewrite grid files in canonical form
    Fmt {
        /// Check formatting without writing (exit 1 if changes needed)
        #[arg(long)]
        check: bool,
    },
}

/// Resolved configuration and save file locations for one invocation.
pub(crate) struct Session {
    pub config: RealmConfig,
    pub paths: WorldPaths,
}

impl Session {
    /// Load the world described by this session, reporting failures.
    pub fn load_world(&self) -> Result<World, ExitCode> {
        load_world(&self.paths, self.config.world.column_height).map_err(|e| {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        })
    }
}

/// Load realm.toml and apply command-line overrides.
fn open_session(global: &GlobalArgs, scale: Option<f32>) -> Result<Session, ExitCode> {
    let loaded = match load_config(global.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };

    // --world is relative to where the command runs, not to realm.toml
    let world = global.world.as_ref().map(|w| match env::current_dir() {
        Ok(cwd) => cwd.join(w),
        Err(_) => w.clone(),
    });

    let overrides = CliOverrides {
        world,
        column_height: global.column_height.map(|h| h as usize),
        scale,
    };

    let mut config = loaded.config;
    if let Err(e) = merge_cli_overrides(&mut config, &overrides) {
        eprintln!("Error: {}", e);
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }

    let paths = config.world_paths(&loaded.root);
    Ok(Session { config, paths })
}

/// Main CLI entry point
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let scale = match &cli.command {
        Commands::Render { scale, .. } => *scale,
        _ => None,
    };
    let session = match open_session(&cli.global, scale) {
        Ok(session) => session,
        Err(code) => return code,
    };

    match cli.command {
        Commands::Render { output, highlight, .. } => render::run_render(&session, &output, highlight),
        Commands::Info { json } => info::run_info(&session, json),
        Commands::Inspect { x, y } => inspect::run_inspect(&session, x, y),
        Commands::Paint {
            x,
            y,
            biome,
            modifier,
            erase_modifier,
            region,
            greater_region,
            clear_greater_region,
            radius,
            dry_run,
        } => paint::run_paint(
            &session,
            x,
            y,
            biome,
            modifier,
            erase_modifier,
            region,
            greater_region,
            clear_greater_region,
            radius,
            dry_run,
        ),
        Commands::Fmt { check } => fmt::run_fmt(&session, check),
    }
}
