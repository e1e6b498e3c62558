//! Extraction coordination: export paths, batch traversal, progress.

use crate::error::ExtractError;
use crate::region::Region;
use crate::service::{ArcNode, ArchiveSource, FileEntry};
use crate::tree::folder_children;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Fixed width of progress labels, so a progress display does not resize
/// between files.
pub const PROGRESS_LABEL_WIDTH: usize = 60;

/// Progress sink for batch extraction: `(label, percent)`.
pub type ProgressSink = dyn Fn(&str, f64) + Send + Sync;

/// One failed file within a batch.
#[derive(Debug, Clone)]
pub struct ExtractFailure {
    /// Archive path of the file that failed.
    pub path: String,
    /// Human-readable reason.
    pub reason: String,
}

/// Outcome of an extraction job.
///
/// A report always covers the full traversal: per-file failures are listed
/// here rather than aborting the batch, and the summary keeps reflecting the
/// attempted total.
#[derive(Debug, Clone)]
pub struct ExtractReport {
    /// Files the job attempted to extract.
    pub attempted: usize,
    /// Files whose bytes reached the destination.
    pub extracted: usize,
    /// Per-file failures, in traversal order.
    pub failures: Vec<ExtractFailure>,
    /// Human-readable completion summary.
    pub summary: String,
}

impl ExtractReport {
    /// True when every attempted file extracted.
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Pads or truncates an archive path to [`PROGRESS_LABEL_WIDTH`].
pub fn progress_label(path: &str) -> String {
    let truncated: String = path.chars().take(PROGRESS_LABEL_WIDTH).collect();
    format!("{:<width$}", truncated, width = PROGRESS_LABEL_WIDTH)
}

/// Coordinates extraction from an archive source to a destination root.
///
/// One extractor owns one destination root and one region for its lifetime;
/// configuration is passed in at construction, never read from ambient
/// state.
#[derive(Debug, Clone)]
pub struct Extractor {
    extract_root: PathBuf,
    region: Region,
}

impl Extractor {
    pub fn new(extract_root: impl Into<PathBuf>, region: Region) -> Self {
        Self {
            extract_root: extract_root.into(),
            region,
        }
    }

    pub fn extract_root(&self) -> &Path {
        &self.extract_root
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Destination path for `file` under the extract root.
    ///
    /// Archive prefixes like `stream:` carry a character that is not valid
    /// in destination file names, so `:` is stripped. Synthetic `0x…` names
    /// get their extension appended so the result is usable on disk. The
    /// archive's `/` separators become host path separators.
    ///
    /// ```
    /// use explorer::{Extractor, FileEntry, Region};
    /// use std::path::Path;
    ///
    /// let extractor = Extractor::new("export", Region::UsEnglish);
    /// let file = FileEntry {
    ///     path: "fighter/mario/0x1a2b3c".to_string(),
    ///     file_name: "0x1a2b3c".to_string(),
    ///     extension: "numatb".to_string(),
    ///     is_shared: false,
    ///     is_regional: false,
    ///     offset: 0,
    ///     compressed_size: 16,
    ///     decompressed_size: 16,
    ///     is_compressed: false,
    /// };
    /// let dest = extractor.export_path(&file);
    /// assert!(dest.ends_with(Path::new("fighter/mario/0x1a2b3c.numatb")));
    /// ```
    pub fn export_path(&self, file: &FileEntry) -> PathBuf {
        let mut arc_path = file.path.replace(':', "");
        if file.file_name.starts_with("0x") && !file.extension.is_empty() {
            arc_path.push('.');
            arc_path.push_str(&file.extension);
        }

        let mut dest = self.extract_root.clone();
        for component in arc_path.split('/').filter(|c| !c.is_empty()) {
            dest.push(component);
        }
        dest
    }

    /// Extracts one file, reporting failure as an outcome rather than an
    /// error. An existing destination file is overwritten.
    pub fn extract_file<A: ArchiveSource + ?Sized>(
        &self,
        source: &A,
        file: &FileEntry,
    ) -> ExtractReport {
        match self.try_extract_file(source, file) {
            Ok(()) => ExtractReport {
                attempted: 1,
                extracted: 1,
                failures: Vec::new(),
                summary: format!("Extracted {}", file.path),
            },
            Err(reason) => ExtractReport {
                attempted: 1,
                extracted: 0,
                summary: reason.clone(),
                failures: vec![ExtractFailure {
                    path: file.path.clone(),
                    reason,
                }],
            },
        }
    }

    /// Extracts every file under `folder_path`.
    ///
    /// The subtree is enumerated up front so progress can report a
    /// deterministic percentage; the sink then receives one
    /// `(label, index / total * 100)` call per file, in enumeration order,
    /// all below 100. Per-file failures are recorded and never abort the
    /// batch; cancellation is checked between files.
    pub fn extract_folder<A: ArchiveSource + ?Sized>(
        &self,
        source: &A,
        folder_path: &str,
        progress: &(dyn Fn(&str, f64) + Send + Sync),
        cancel: &AtomicBool,
    ) -> Result<ExtractReport, ExtractError> {
        self.ensure_root()?;

        let mut files = Vec::new();
        self.collect_dir_files(source, folder_path, &mut files);

        let (extracted, failures) = self.run_batch(source, &files, progress, cancel)?;
        let summary = batch_summary(
            files.len(),
            failures.len(),
            Some(folder_path.trim_matches('/')),
        );
        Ok(ExtractReport {
            attempted: files.len(),
            extracted,
            failures,
            summary,
        })
    }

    /// Extracts every file in the archive, root-level files included.
    pub fn extract_all<A: ArchiveSource + ?Sized>(
        &self,
        source: &A,
        progress: &(dyn Fn(&str, f64) + Send + Sync),
        cancel: &AtomicBool,
    ) -> Result<ExtractReport, ExtractError> {
        self.ensure_root()?;

        let mut files = Vec::new();
        self.collect_dir_files(source, "", &mut files);

        let (extracted, failures) = self.run_batch(source, &files, progress, cancel)?;
        let summary = batch_summary(files.len(), failures.len(), None);
        Ok(ExtractReport {
            attempted: files.len(),
            extracted,
            failures,
            summary,
        })
    }

    fn ensure_root(&self) -> Result<(), ExtractError> {
        fs::create_dir_all(&self.extract_root).map_err(|source| ExtractError::DestinationRoot {
            path: self.extract_root.clone(),
            source,
        })
    }

    /// Depth-first subtree enumeration; directories recurse, files are
    /// leaves. An empty path enumerates from the root level.
    fn collect_dir_files<A: ArchiveSource + ?Sized>(
        &self,
        source: &A,
        dir_path: &str,
        files: &mut Vec<FileEntry>,
    ) {
        for child in folder_children(source, self.region, dir_path) {
            match child {
                ArcNode::File(file) => files.push(file),
                ArcNode::Dir(dir) => self.collect_dir_files(source, &dir.path, files),
            }
        }
    }

    fn run_batch<A: ArchiveSource + ?Sized>(
        &self,
        source: &A,
        files: &[FileEntry],
        progress: &(dyn Fn(&str, f64) + Send + Sync),
        cancel: &AtomicBool,
    ) -> Result<(usize, Vec<ExtractFailure>), ExtractError> {
        let total = files.len();
        let mut extracted = 0;
        let mut failures = Vec::new();

        for (index, file) in files.iter().enumerate() {
            if cancel.load(Ordering::Relaxed) {
                return Err(ExtractError::Cancelled);
            }
            progress(
                &progress_label(&file.path),
                index as f64 / total as f64 * 100.0,
            );
            match self.try_extract_file(source, file) {
                Ok(()) => extracted += 1,
                Err(reason) => failures.push(ExtractFailure {
                    path: file.path.clone(),
                    reason,
                }),
            }
        }

        Ok((extracted, failures))
    }

    fn try_extract_file<A: ArchiveSource + ?Sized>(
        &self,
        source: &A,
        file: &FileEntry,
    ) -> Result<(), String> {
        let dest = self.export_path(file);

        // The service refuses to extract into a missing directory.
        if let Some(parent) = dest.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::error!(directory = %parent.display(), error = %e, "error creating directory");
                return Err(format!("Error creating directory {}", parent.display()));
            }
        }

        if let Err(e) = source.extract_file(file, &dest, self.region) {
            tracing::error!(path = %dest.display(), error = %e, "failed to extract");
            return Err(format!("Failed to extract {}", file.path));
        }

        Ok(())
    }
}

fn batch_summary(attempted: usize, failed: usize, folder: Option<&str>) -> String {
    let mut summary = match folder {
        Some(folder) => format!("Extracted {attempted} files from {folder}"),
        None => format!("Extracted {attempted} files"),
    };
    if failed > 0 {
        summary.push_str(&format!("; {failed} failed"));
    }
    summary
}
