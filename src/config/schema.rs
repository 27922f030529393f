//! Configuration schema types for `realm.toml`
//!
//! Defines where a world's save files live and how frames are displayed.

use crate::renderer::HighlightStyle;
use crate::store::{GridKind, WorldPaths, DEFAULT_COLUMN_HEIGHT, MAX_COLUMN_HEIGHT};
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Save file locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Base directory for relative file paths
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_biome")]
    pub biome: PathBuf,
    #[serde(default = "default_region")]
    pub region: PathBuf,
    #[serde(default = "default_greater_region")]
    pub greater_region: PathBuf,
    #[serde(default = "default_lore")]
    pub lore: PathBuf,
    /// Height of the region and greater-region grids
    #[serde(default = "default_column_height")]
    pub column_height: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            biome: default_biome(),
            region: default_region(),
            greater_region: default_greater_region(),
            lore: default_lore(),
            column_height: default_column_height(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_biome() -> PathBuf {
    PathBuf::from(GridKind::Biome.file_name())
}

fn default_region() -> PathBuf {
    PathBuf::from(GridKind::Region.file_name())
}

fn default_greater_region() -> PathBuf {
    PathBuf::from(GridKind::GreaterRegion.file_name())
}

fn default_lore() -> PathBuf {
    PathBuf::from("Lore.save")
}

fn default_column_height() -> usize {
    DEFAULT_COLUMN_HEIGHT
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Default scale factor for exported frames
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Highlight overlay color [r, g, b]
    #[serde(default = "default_highlight_color")]
    pub highlight_color: [u8; 3],
    /// Highlight overlay alpha (1-255)
    #[serde(default = "default_highlight_alpha")]
    pub highlight_alpha: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            highlight_color: default_highlight_color(),
            highlight_alpha: default_highlight_alpha(),
        }
    }
}

fn default_scale() -> f32 {
    4.0
}

fn default_highlight_color() -> [u8; 3] {
    [255, 0, 0]
}

fn default_highlight_alpha() -> u8 {
    100
}

impl DisplayConfig {
    pub fn highlight_style(&self) -> HighlightStyle {
        HighlightStyle { color: Rgb(self.highlight_color), alpha: self.highlight_alpha }
    }
}

/// Root configuration structure for `realm.toml`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RealmConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// A single config validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "world.column_height")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "realm.toml: '{}' {}", self.field, self.message)
    }
}

impl RealmConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.world.column_height == 0 || self.world.column_height > MAX_COLUMN_HEIGHT {
            errors.push(ConfigValidationError {
                field: "world.column_height".to_string(),
                message: format!("must be between 1 and {}", MAX_COLUMN_HEIGHT),
            });
        }

        if !self.display.scale.is_finite() || self.display.scale <= 0.0 {
            errors.push(ConfigValidationError {
                field: "display.scale".to_string(),
                message: "must be a positive number".to_string(),
            });
        }

        if self.display.highlight_alpha == 0 {
            errors.push(ConfigValidationError {
                field: "display.highlight_alpha".to_string(),
                message: "must be between 1 and 255".to_string(),
            });
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Resolve the save file paths against `world.dir`, itself resolved
    /// against `root` when relative.
    pub fn world_paths(&self, root: &Path) -> WorldPaths {
        let dir = if self.world.dir.is_absolute() {
            self.world.dir.clone()
        } else {
            root.join(&self.world.dir)
        };
        let resolve = |p: &Path| if p.is_absolute() { p.to_path_buf() } else { dir.join(p) };

        WorldPaths {
            biome: resolve(&self.world.biome),
            region: resolve(&self.world.region),
            greater_region: resolve(&self.world.greater_region),
            lore: resolve(&self.world.lore),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: RealmConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(config, RealmConfig::default());
        assert_eq!(config.world.column_height, 224);
        assert_eq!(config.display.scale, 4.0);
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml_str = r#"
[world]
dir = "saves/grim"
biome = "b.save"
column_height = 128

[display]
scale = 2.5
highlight_color = [0, 255, 0]
highlight_alpha = 200
"#;
        let config: RealmConfig = toml::from_str(toml_str).expect("should parse");
        assert_eq!(config.world.dir, PathBuf::from("saves/grim"));
        assert_eq!(config.world.biome, PathBuf::from("b.save"));
        assert_eq!(config.world.region, PathBuf::from("regionGrid.save"));
        assert_eq!(config.world.column_height, 128);
        assert_eq!(config.display.scale, 2.5);
        assert_eq!(
            config.display.highlight_style(),
            HighlightStyle { color: Rgb([0, 255, 0]), alpha: 200 }
        );
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let mut config = RealmConfig::default();
        config.world.column_height = 0;
        config.display.scale = -1.0;
        config.display.highlight_alpha = 0;

        let errors = config.validate();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].to_string().contains("world.column_height"));
    }

    #[test]
    fn test_column_height_upper_bound() {
        let mut config = RealmConfig::default();
        config.world.column_height = MAX_COLUMN_HEIGHT;
        assert!(config.is_valid());

        config.world.column_height = MAX_COLUMN_HEIGHT + 1;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "world.column_height");

        config.world.column_height = usize::MAX;
        assert!(!config.is_valid());
    }

    #[test]
    fn test_world_paths_resolution() {
        let mut config = RealmConfig::default();
        config.world.dir = PathBuf::from("worlds/one");
        config.world.lore = PathBuf::from("/abs/Lore.save");

        let paths = config.world_paths(Path::new("/project"));
        assert_eq!(paths.biome, PathBuf::from("/project/worlds/one/biomeGrid.save"));
        assert_eq!(paths.greater_region, PathBuf::from("/project/worlds/one/greaterRegionGrid.save"));
        assert_eq!(paths.lore, PathBuf::from("/abs/Lore.save"));
    }
}
