//! Realmgrid - Library for reading, editing and rendering tile-based world maps
//!
//! This library provides functionality to:
//! - Decode and encode the column-major text grids a world is saved as
//! - Resolve region names from the world's lore file
//! - Render biome maps with taint blending and greater-region highlights
//! - Paint brush strokes across the biome and region grids

pub mod brush;
pub mod cell;
pub mod cli;
pub mod codec;
pub mod config;
pub mod grid;
pub mod lore;
pub mod output;
pub mod palette;
pub mod renderer;
pub mod store;
pub mod world;
