//! Biome grid rendering to RGB rasters
//!
//! Rendering is a pure function of the grid: the same grid and highlight
//! target always produce byte-identical images.

use crate::cell::{Cell, EMPTY_SENTINEL, TAINTED_MODIFIER};
use crate::grid::Grid;
use crate::palette::BiomePalette;
use image::imageops::FilterType;
use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Color and opacity of the greater-region highlight overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightStyle {
    pub color: Rgb<u8>,
    /// Overlay alpha (0-255)
    pub alpha: u8,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self { color: Rgb([255, 0, 0]), alpha: 100 }
    }
}

/// Mix `color` halfway toward `tint`, truncating each channel.
fn mix_half(color: Rgb<u8>, tint: Rgb<u8>) -> Rgb<u8> {
    let mix = |c: u8, t: u8| (c as f32 * 0.5 + t as f32 * 0.5) as u8;
    Rgb([mix(color[0], tint[0]), mix(color[1], tint[1]), mix(color[2], tint[2])])
}

/// Resolve the display color of a single biome cell.
pub fn cell_color(cell: Cell, palette: &BiomePalette) -> Rgb<u8> {
    let color = palette.color(cell.value());
    match cell.modifier() {
        Some(TAINTED_MODIFIER) => mix_half(color, palette.taint()),
        _ => color,
    }
}

/// Render a biome grid, one pixel per tile.
///
/// Unknown biome ids and empty tiles render gray. Tainted tiles (modifier 12)
/// are mixed 50/50 with the palette's taint color; other modifiers leave the
/// color unchanged.
///
/// # Examples
///
/// ```
/// use image::Rgb;
/// use realmgrid::cell::Cell;
/// use realmgrid::grid::Grid;
/// use realmgrid::palette::BiomePalette;
/// use realmgrid::renderer::render_biome;
///
/// let mut grid = Grid::empty(1, 2);
/// grid.set(0, 0, Cell::Tagged(2, 12));
///
/// let image = render_biome(&grid, &BiomePalette::default());
/// assert_eq!(*image.get_pixel(0, 0), Rgb([78, 67, 80]));
/// assert_eq!(*image.get_pixel(1, 0), Rgb([100, 100, 100]));
/// ```
pub fn render_biome(grid: &Grid, palette: &BiomePalette) -> RgbImage {
    let mut image = RgbImage::new(grid.width() as u32, grid.height() as u32);
    for (row, col, cell) in grid.iter() {
        image.put_pixel(col as u32, row as u32, cell_color(cell, palette));
    }
    image
}

/// Composite `src` over an opaque `dst` pixel ("source over").
fn composite_over(src: &Rgba<u8>, dst: &Rgb<u8>) -> Rgb<u8> {
    let alpha = src[3] as f32 / 255.0;
    let channel = |s: u8, d: u8| -> u8 {
        let out = s as f32 * alpha + d as f32 * (1.0 - alpha);
        out.clamp(0.0, 255.0).round() as u8
    };
    Rgb([channel(src[0], dst[0]), channel(src[1], dst[1]), channel(src[2], dst[2])])
}

/// Tiles `(x, y)` the highlight of `target` covers on a `width x height`
/// raster.
///
/// Only `Scalar(target)` cells count. No target, or the `-4` "no region"
/// sentinel as target, covers nothing. Cells outside the raster are skipped.
pub fn highlighted_tiles(
    greater_regions: &Grid,
    target: Option<i64>,
    width: u32,
    height: u32,
) -> impl Iterator<Item = (u32, u32)> + '_ {
    let target = target.filter(|&t| t != EMPTY_SENTINEL);
    greater_regions.iter().filter_map(move |(row, col, cell)| {
        let (x, y) = (u32::try_from(col).ok()?, u32::try_from(row).ok()?);
        let hit = target.is_some_and(|t| cell == Cell::Scalar(t)) && x < width && y < height;
        hit.then_some((x, y))
    })
}

/// Build the translucent overlay marking every tile of greater region `target`.
fn highlight_overlay(
    width: u32,
    height: u32,
    greater_regions: &Grid,
    target: i64,
    style: &HighlightStyle,
) -> RgbaImage {
    let mut overlay = RgbaImage::new(width, height);
    let paint = Rgba([style.color[0], style.color[1], style.color[2], style.alpha]);

    for (x, y) in highlighted_tiles(greater_regions, Some(target), width, height) {
        overlay.put_pixel(x, y, paint);
    }

    overlay
}

/// Highlight greater region `target` on top of a rendered biome raster.
///
/// With no target, or the `-4` "no region" sentinel as target, the raster is
/// returned unchanged. Tiles of the greater-region grid that fall outside the
/// raster are ignored.
pub fn composite_highlight(
    raster: RgbImage,
    greater_regions: &Grid,
    target: Option<i64>,
    style: &HighlightStyle,
) -> RgbImage {
    let target = match target {
        Some(t) if t != EMPTY_SENTINEL => t,
        _ => return raster,
    };

    let (width, height) = raster.dimensions();
    let overlay = highlight_overlay(width, height, greater_regions, target, style);

    let mut out = raster;
    for (x, y, src) in overlay.enumerate_pixels() {
        // Fully transparent, skip
        if src[3] == 0 {
            continue;
        }
        let blended = composite_over(src, out.get_pixel(x, y));
        out.put_pixel(x, y, blended);
    }
    out
}

/// Render the biome grid and apply the optional greater-region highlight.
pub fn render_frame(
    biomes: &Grid,
    greater_regions: &Grid,
    target: Option<i64>,
    palette: &BiomePalette,
    style: &HighlightStyle,
) -> RgbImage {
    composite_highlight(render_biome(biomes, palette), greater_regions, target, style)
}

/// Scale a raster by `factor` using nearest-neighbor sampling.
///
/// The result is `floor(width * factor) x floor(height * factor)`, at least
/// 1x1. A factor of 1, or one that is not a positive finite number, returns
/// the raster unchanged.
pub fn scale(raster: RgbImage, factor: f32) -> RgbImage {
    if !factor.is_finite() || factor <= 0.0 || factor == 1.0 {
        return raster;
    }
    let (w, h) = raster.dimensions();
    let new_w = ((w as f32 * factor) as u32).max(1);
    let new_h = ((h as f32 * factor) as u32).max(1);
    image::imageops::resize(&raster, new_w, new_h, FilterType::Nearest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jungle_grid() -> Grid {
        let mut grid = Grid::empty(2, 3);
        for row in 0..2 {
            for col in 0..3 {
                grid.set(row, col, Cell::Scalar(2));
            }
        }
        grid
    }

    #[test]
    fn test_render_dimensions() {
        let image = render_biome(&Grid::empty(224, 256), &BiomePalette::default());
        assert_eq!(image.dimensions(), (256, 224));
    }

    #[test]
    fn test_render_palette_lookup() {
        let mut grid = Grid::empty(1, 4);
        grid.set(0, 0, Cell::Scalar(0));
        grid.set(0, 1, Cell::Scalar(10));
        grid.set(0, 2, Cell::Scalar(99));

        let image = render_biome(&grid, &BiomePalette::default());
        assert_eq!(*image.get_pixel(0, 0), Rgb([245, 196, 110]));
        assert_eq!(*image.get_pixel(1, 0), Rgb([15, 55, 100]));
        assert_eq!(*image.get_pixel(2, 0), Rgb([100, 100, 100]));
        assert_eq!(*image.get_pixel(3, 0), Rgb([100, 100, 100]));
    }

    #[test]
    fn test_tainted_blend() {
        let mut grid = Grid::empty(1, 1);
        grid.set(0, 0, Cell::Tagged(2, 12));
        let image = render_biome(&grid, &BiomePalette::default());
        assert_eq!(*image.get_pixel(0, 0), Rgb([78, 67, 80]));
    }

    #[test]
    fn test_tainted_unknown_biome_blends_gray() {
        assert_eq!(cell_color(Cell::Tagged(50, 12), &BiomePalette::default()), Rgb([95, 50, 110]));
    }

    #[test]
    fn test_other_modifiers_leave_color() {
        let palette = BiomePalette::default();
        assert_eq!(cell_color(Cell::Tagged(2, 3), &palette), Rgb([66, 135, 40]));
        assert_eq!(cell_color(Cell::Tagged(2, 0), &palette), Rgb([66, 135, 40]));
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut grid = jungle_grid();
        grid.set(1, 1, Cell::Tagged(5, 12));
        let palette = BiomePalette::default();
        assert_eq!(render_biome(&grid, &palette).into_raw(), render_biome(&grid, &palette).into_raw());
    }

    #[test]
    fn test_highlight_single_tile() {
        let biomes = jungle_grid();
        let mut greater = Grid::empty(2, 3);
        greater.set(0, 0, Cell::Scalar(-4));
        greater.set(0, 1, Cell::Scalar(1));
        greater.set(1, 2, Cell::Scalar(3));

        let palette = BiomePalette::default();
        let base = render_biome(&biomes, &palette);
        let out = composite_highlight(base.clone(), &greater, Some(3), &HighlightStyle::default());

        for (x, y, px) in out.enumerate_pixels() {
            if (x, y) == (2, 1) {
                assert_eq!(*px, Rgb([140, 82, 24]));
            } else {
                assert_eq!(px, base.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_highlight_ignores_tagged_cells() {
        let biomes = jungle_grid();
        let mut greater = Grid::empty(2, 3);
        greater.set(0, 0, Cell::Tagged(3, 1));

        let base = render_biome(&biomes, &BiomePalette::default());
        let out = composite_highlight(base.clone(), &greater, Some(3), &HighlightStyle::default());
        assert_eq!(out, base);
    }

    #[test]
    fn test_highlight_without_target() {
        let base = render_biome(&jungle_grid(), &BiomePalette::default());
        let mut greater = Grid::empty(2, 3);
        greater.set(0, 0, Cell::Scalar(-4));

        assert_eq!(composite_highlight(base.clone(), &greater, None, &HighlightStyle::default()), base);
        assert_eq!(composite_highlight(base.clone(), &greater, Some(-4), &HighlightStyle::default()), base);
    }

    #[test]
    fn test_highlight_with_mismatched_grid_sizes() {
        // Greater regions are stored with a shorter column than biomes
        let base = render_biome(&Grid::empty(4, 2), &BiomePalette::default());
        let mut greater = Grid::empty(2, 3);
        greater.set(1, 1, Cell::Scalar(0));
        greater.set(1, 2, Cell::Scalar(0));

        let out = composite_highlight(base, &greater, Some(0), &HighlightStyle::default());
        assert_eq!(out.dimensions(), (2, 4));
        assert_ne!(*out.get_pixel(1, 1), Rgb([100, 100, 100]));
        assert_eq!(*out.get_pixel(1, 3), Rgb([100, 100, 100]));
    }

    #[test]
    fn test_highlighted_tiles_follow_compositor_rule() {
        let mut greater = Grid::empty(3, 2);
        greater.set(0, 0, Cell::Scalar(-4));
        greater.set(1, 1, Cell::Scalar(-4));
        greater.set(0, 1, Cell::Scalar(6));
        greater.set(2, 0, Cell::Scalar(6));
        greater.set(1, 0, Cell::Tagged(6, 1));

        // Row 2 lies below a 2x2 raster
        let tiles: Vec<_> = highlighted_tiles(&greater, Some(6), 2, 2).collect();
        assert_eq!(tiles, vec![(1, 0)]);
        assert_eq!(highlighted_tiles(&greater, Some(6), 2, 3).count(), 2);

        assert_eq!(highlighted_tiles(&greater, Some(-4), 2, 3).count(), 0);
        assert_eq!(highlighted_tiles(&greater, None, 2, 3).count(), 0);
    }

    #[test]
    fn test_custom_highlight_style() {
        let base = render_biome(&Grid::empty(1, 1), &BiomePalette::default());
        let mut greater = Grid::empty(1, 1);
        greater.set(0, 0, Cell::Scalar(0));

        let style = HighlightStyle { color: Rgb([0, 0, 255]), alpha: 255 };
        let out = composite_highlight(base, &greater, Some(0), &style);
        assert_eq!(*out.get_pixel(0, 0), Rgb([0, 0, 255]));
    }

    #[test]
    fn test_scale_nearest() {
        let mut grid = Grid::empty(1, 2);
        grid.set(0, 0, Cell::Scalar(0));
        grid.set(0, 1, Cell::Scalar(10));
        let image = render_biome(&grid, &BiomePalette::default());

        let scaled = scale(image.clone(), 4.0);
        assert_eq!(scaled.dimensions(), (8, 4));
        assert_eq!(scaled.get_pixel(3, 3), image.get_pixel(0, 0));
        assert_eq!(scaled.get_pixel(4, 0), image.get_pixel(1, 0));
    }

    #[test]
    fn test_scale_passthrough() {
        let image = render_biome(&Grid::empty(3, 3), &BiomePalette::default());
        assert_eq!(scale(image.clone(), 1.0), image);
        assert_eq!(scale(image.clone(), 0.0), image);
        assert_eq!(scale(image.clone(), f32::NAN), image);
        assert_eq!(scale(image, 0.1).dimensions(), (1, 1));
    }
}
