//! Directory-backed reference implementation of the archive boundary.
//!
//! Presents a plain directory tree as an archive so the CLI can be driven
//! end to end without a proprietary ARC decoder. Entries report their
//! on-disk size for both sizes, nothing is shared or regional, and the
//! region selector is ignored.

use explorer::{ArcNode, ArchiveSource, DirEntry, FileEntry, Region, SourceError};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct FsArchive {
    root: PathBuf,
}

impl FsArchive {
    /// Opens a directory as an archive.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let meta = fs::metadata(path).map_err(|_| SourceError::NotFound(path.to_path_buf()))?;
        if !meta.is_dir() {
            return Err(SourceError::Unsupported(format!(
                "{} is not a directory",
                path.display()
            )));
        }
        tracing::info!(path = %path.display(), "opened archive directory");
        Ok(Self {
            root: path.to_path_buf(),
        })
    }

    fn entries_under(&self, rel: &str) -> Vec<ArcNode> {
        let dir = if rel.is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel)
        };
        let mut entries: Vec<_> = match fs::read_dir(&dir) {
            Ok(iter) => iter.filter_map(Result::ok).collect(),
            Err(_) => return Vec::new(),
        };
        entries.sort_by_key(|entry| entry.file_name());
        entries
            .iter()
            .filter_map(|entry| self.node_for(&entry.path()))
            .collect()
    }

    fn rel_path(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let mut parts = Vec::new();
        for component in rel.components() {
            parts.push(component.as_os_str().to_str()?.to_string());
        }
        Some(parts.join("/"))
    }

    fn node_for(&self, path: &Path) -> Option<ArcNode> {
        let rel = self.rel_path(path)?;
        let meta = fs::metadata(path).ok()?;
        if meta.is_dir() {
            Some(ArcNode::Dir(DirEntry {
                path: rel,
                is_shared: false,
                is_regional: false,
            }))
        } else {
            let file_name = path.file_name()?.to_str()?.to_string();
            let extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or_default()
                .to_string();
            let len = meta.len();
            Some(ArcNode::File(FileEntry {
                path: rel,
                file_name,
                extension,
                is_shared: false,
                is_regional: false,
                offset: 0,
                compressed_size: len,
                decompressed_size: len,
                is_compressed: false,
            }))
        }
    }
}

impl ArchiveSource for FsArchive {
    fn root_nodes(&self, _region: Region) -> Vec<ArcNode> {
        self.entries_under("")
    }

    fn children(&self, dir: &DirEntry, _region: Region) -> Vec<ArcNode> {
        self.entries_under(dir.path.trim_matches('/'))
    }

    fn resolve_path(&self, path: &str, _region: Region) -> Option<ArcNode> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        self.node_for(&self.root.join(trimmed))
    }

    fn extract_file(
        &self,
        file: &FileEntry,
        dest: &Path,
        _region: Region,
    ) -> Result<(), SourceError> {
        let src = self.root.join(file.path.trim_matches('/'));
        fs::copy(&src, dest)?;
        Ok(())
    }

    fn shared_file_paths(&self, _file: &FileEntry, _region: Region) -> Vec<String> {
        Vec::new()
    }

    fn file_count(&self) -> u64 {
        WalkDir::new(&self.root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .count() as u64
    }
}
