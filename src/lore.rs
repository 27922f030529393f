//! Region name lookup from the lore file
//!
//! The lore file is a loosely structured document. Only two arrays matter:
//! the `title` list under `"regions"` and the one under `"greaterRegions"`.
//! They are located by pattern search; everything else is ignored, so
//! extra or trailing fields never break loading.

use crate::cell::Cell;
use log::debug;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Error type for lore file loading
#[derive(Debug, Error)]
pub enum LoreError {
    /// The file exists but could not be read
    #[error("failed to read lore '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Named section of the lore file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoreSection {
    Regions,
    GreaterRegions,
}

impl LoreSection {
    /// Key of the section in the lore file.
    pub fn key(&self) -> &'static str {
        match self {
            LoreSection::Regions => "regions",
            LoreSection::GreaterRegions => "greaterRegions",
        }
    }
}

fn quoted_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#""(.*?)""#).expect("quoted pattern is valid"))
}

/// Extract the `title` array of `section`, in order.
fn extract_titles(text: &str, section: LoreSection) -> Vec<String> {
    let pattern = format!(
        r#"(?s)"{}"\s*:\s*\{{.*?"title"\s*:\s*\[(.*?)\]"#,
        regex::escape(section.key())
    );
    let section_re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            debug!("invalid lore pattern for '{}': {}", section.key(), e);
            return Vec::new();
        }
    };

    match section_re.captures(text).and_then(|caps| caps.get(1)) {
        Some(body) => quoted_pattern()
            .captures_iter(body.as_str())
            .map(|caps| caps[1].to_string())
            .collect(),
        None => {
            debug!("lore section '{}' not found", section.key());
            Vec::new()
        }
    }
}

/// Ordered display names for regions and greater regions.
///
/// Ids index directly into the lists. Ids beyond the lists are expected when
/// the save data is newer than the lore file; lookups return `None` and
/// labels fall back to `Unknown(<id>)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoreIndex {
    pub region_names: Vec<String>,
    pub greater_region_names: Vec<String>,
}

impl LoreIndex {
    /// Parse lore text.
    ///
    /// # Examples
    ///
    /// ```
    /// use realmgrid::lore::LoreIndex;
    ///
    /// let text = r#"{
    ///     "regions": { "title": ["Ashvale", "Mirefen"], "desc": [] },
    ///     "greaterRegions": { "title": ["The North"] }
    /// }"#;
    /// let lore = LoreIndex::parse(text);
    /// assert_eq!(lore.region_name(1), Some("Mirefen"));
    /// assert_eq!(lore.greater_region_name(0), Some("The North"));
    /// assert_eq!(lore.region_label(5), "Unknown(5)");
    /// ```
    pub fn parse(text: &str) -> Self {
        Self {
            region_names: extract_titles(text, LoreSection::Regions),
            greater_region_names: extract_titles(text, LoreSection::GreaterRegions),
        }
    }

    /// Load the lore file. A missing file yields empty name lists.
    pub fn load(path: &Path) -> Result<Self, LoreError> {
        match fs::read(path) {
            Ok(bytes) => {
                let lore = Self::parse(&String::from_utf8_lossy(&bytes));
                debug!(
                    "loaded {} region and {} greater region names from '{}'",
                    lore.region_names.len(),
                    lore.greater_region_names.len(),
                    path.display()
                );
                Ok(lore)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("lore '{}' not found, using empty name lists", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(LoreError::Read { path: path.to_path_buf(), source }),
        }
    }

    /// Names of one section.
    pub fn names(&self, section: LoreSection) -> &[String] {
        match section {
            LoreSection::Regions => &self.region_names,
            LoreSection::GreaterRegions => &self.greater_region_names,
        }
    }

    /// Look up a name by id; negative and out-of-range ids give `None`.
    pub fn name(&self, section: LoreSection, id: i64) -> Option<&str> {
        usize::try_from(id).ok().and_then(|i| self.names(section).get(i)).map(String::as_str)
    }

    pub fn region_name(&self, id: i64) -> Option<&str> {
        self.name(LoreSection::Regions, id)
    }

    pub fn greater_region_name(&self, id: i64) -> Option<&str> {
        self.name(LoreSection::GreaterRegions, id)
    }

    /// Display label `Name(id)`, or `Unknown(id)` when the lore has no name.
    pub fn label(&self, section: LoreSection, id: i64) -> String {
        match self.name(section, id) {
            Some(name) => format!("{}({})", name, id),
            None => format!("Unknown({})", id),
        }
    }

    pub fn region_label(&self, id: i64) -> String {
        self.label(LoreSection::Regions, id)
    }

    /// Label for a region grid cell. Empty cells read as `None`.
    pub fn region_cell_label(&self, cell: Cell) -> String {
        match cell.value() {
            Some(id) => self.region_label(id),
            None => "None".to_string(),
        }
    }

    /// Label for a greater-region grid cell. The `-4` sentinel and empty
    /// cells read as `None`.
    pub fn greater_region_cell_label(&self, cell: Cell) -> String {
        if cell.is_unassigned() {
            return "None".to_string();
        }
        match cell.value() {
            Some(id) => self.label(LoreSection::GreaterRegions, id),
            None => "None".to_string(),
        }
    }
}
