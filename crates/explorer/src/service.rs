//! The archive service boundary.
//!
//! The explorer core never decodes archive bytes itself. Everything it knows
//! about an archive arrives through [`ArchiveSource`]: the binary layout,
//! compression codecs, and hashed path tables all live behind the trait.

use crate::region::Region;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reported by an archive source implementation.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The archive was not found at the given path.
    #[error("archive not found: {0}")]
    NotFound(PathBuf),

    /// The input exists but is not a readable archive.
    #[error("unsupported archive: {0}")]
    Unsupported(String),

    /// The archive's tables reference an entry with no data.
    #[error("no data for entry: {0}")]
    MissingEntry(String),

    /// An I/O error occurred while reading or writing entry bytes.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A file entry as reported by the archive service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute `/`-separated path within the archive.
    pub path: String,

    /// File name component of the path. May be a synthetic `0x…` name when
    /// the path table only knows the entry by hash.
    pub file_name: String,

    /// Extension without the leading dot, reported separately because
    /// synthetic names do not carry one.
    pub extension: String,

    /// Whether multiple archive paths reference this entry's data.
    pub is_shared: bool,

    /// Whether the entry has per-region variants.
    pub is_regional: bool,

    /// Byte offset of the entry's data within the archive.
    pub offset: u64,

    /// Size of the entry's data as stored.
    pub compressed_size: u64,

    /// Size of the entry's data after decompression.
    pub decompressed_size: u64,

    /// Whether the stored data is compressed.
    pub is_compressed: bool,
}

/// A directory entry as reported by the archive service.
///
/// Path-table conventions for trailing slashes vary between entries, so two
/// `DirEntry` values may name the same directory with and without a slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Absolute `/`-separated path within the archive.
    pub path: String,
    pub is_shared: bool,
    pub is_regional: bool,
}

impl DirEntry {
    /// Directory name, ignoring any trailing slash.
    pub fn name(&self) -> &str {
        let trimmed = self.path.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }
}

/// A node in the archive's directory structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArcNode {
    File(FileEntry),
    Dir(DirEntry),
}

impl ArcNode {
    /// The node's absolute archive path.
    pub fn path(&self) -> &str {
        match self {
            ArcNode::File(file) => &file.path,
            ArcNode::Dir(dir) => &dir.path,
        }
    }

    /// The node's display name, derived from its path.
    pub fn name(&self) -> &str {
        match self {
            ArcNode::File(file) => &file.file_name,
            ArcNode::Dir(dir) => dir.name(),
        }
    }
}

/// Boundary to the external archive implementation.
///
/// Opening an archive is a constructor concern of each implementation; the
/// trait covers everything a session needs afterwards. Implementations are
/// read-only for the lifetime of a session, so `&self` methods are safe to
/// call from a worker thread while the display tree lives elsewhere.
pub trait ArchiveSource {
    /// Root-level nodes, in the archive's reported order.
    fn root_nodes(&self, region: Region) -> Vec<ArcNode>;

    /// Immediate children of `dir`, in the archive's reported order.
    fn children(&self, dir: &DirEntry, region: Region) -> Vec<ArcNode>;

    /// Resolves an absolute archive path to a node, if the path table knows
    /// the path in exactly this spelling.
    ///
    /// Callers that need to tolerate trailing-slash differences should query
    /// both spellings; see [`folder_children`](crate::tree::folder_children).
    fn resolve_path(&self, path: &str, region: Region) -> Option<ArcNode>;

    /// Extracts `file`'s decompressed bytes to `dest`, overwriting any
    /// existing file. The parent directory must already exist.
    fn extract_file(&self, file: &FileEntry, dest: &Path, region: Region)
        -> Result<(), SourceError>;

    /// All archive paths referencing the same underlying data as `file`,
    /// in no particular order.
    fn shared_file_paths(&self, file: &FileEntry, region: Region) -> Vec<String>;

    /// Total number of file entries in the archive.
    fn file_count(&self) -> u64;
}
