//! Human-readable labels for hashed file names.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Lookup from a synthetic `0x…` file name to a human label.
///
/// Loaded from a text resource with one `0x<hex> <label>` pair per line.
/// The table only feeds display descriptions; extraction never depends on it.
#[derive(Debug, Default)]
pub struct LabelTable {
    labels: HashMap<String, String>,
}

impl LabelTable {
    /// An empty table; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads labels from `path`, skipping blank and malformed lines.
    pub fn load(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let mut labels = HashMap::new();
        let mut skipped = 0usize;

        for line in BufReader::new(file).lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.split_once(char::is_whitespace) {
                Some((name, label)) if name.starts_with("0x") && !label.trim().is_empty() => {
                    labels.insert(name.to_string(), label.trim().to_string());
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, path = %path.display(), "skipped malformed label lines");
        }

        Ok(Self { labels })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
