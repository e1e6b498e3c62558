//! Explicit application settings.

use crate::region::Region;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// How offsets and byte counts are rendered in node properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegerDisplay {
    #[default]
    Decimal,
    Hexadecimal,
}

impl IntegerDisplay {
    /// Renders a byte count in the selected base.
    pub fn format(&self, value: u64) -> String {
        match self {
            IntegerDisplay::Decimal => format!("{value} bytes"),
            IntegerDisplay::Hexadecimal => format!("0x{value:x} bytes"),
        }
    }
}

/// User-facing configuration for browsing and extraction.
///
/// Constructed explicitly and handed to the tree builder and extractor;
/// nothing in this crate reads configuration from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Destination root for extracted files.
    pub extract_location: PathBuf,

    /// Region used for all archive queries.
    pub region: Region,

    /// Optional path to a hash-label resource.
    pub label_file: Option<PathBuf>,

    /// Rendering of offsets and sizes in node properties.
    pub integer_display: IntegerDisplay,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extract_location: PathBuf::from("export"),
            region: Region::default(),
            label_file: None,
            integer_display: IntegerDisplay::default(),
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file, falling back to defaults when the
    /// file does not exist yet.
    pub fn load_or_default(path: &Path) -> io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                serde_json::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Saves settings as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, text)
    }
}
