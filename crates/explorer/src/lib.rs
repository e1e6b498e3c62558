//! # Explorer
//!
//! Core browsing and extraction logic for ARC game archives.
//!
//! Decoding the archive itself — binary layout, compression, hashed path
//! tables — lives behind the [`ArchiveSource`] trait and is supplied by an
//! external implementation. This crate owns everything around that boundary:
//!
//! - a lazily deepened display tree ([`FileTree`]) that tolerates the
//!   archive path table's inconsistent trailing-slash conventions and
//!   caches per-file shared-path lists on first read,
//! - an extraction coordinator ([`Extractor`]) that enumerates a subtree up
//!   front for deterministic progress and records per-file failures without
//!   aborting a batch,
//! - a background job runner ([`jobs`]) streaming typed
//!   started/progress/finished events from a worker, with cancellation
//!   checked between files,
//! - explicit configuration ([`Settings`]) and display collaborators
//!   ([`LabelTable`], [`FileCategory`]).

pub mod error;
pub mod extract;
pub mod format;
pub mod jobs;
pub mod labels;
pub mod region;
pub mod service;
pub mod settings;
pub mod tree;

// Re-export main types
pub use error::ExtractError;
pub use extract::{ExtractFailure, ExtractReport, Extractor, ProgressSink, PROGRESS_LABEL_WIDTH};
pub use format::FileCategory;
pub use jobs::{JobEvent, JobHandle, JobStatus};
pub use labels::LabelTable;
pub use region::Region;
pub use service::{ArcNode, ArchiveSource, DirEntry, FileEntry, SourceError};
pub use settings::{IntegerDisplay, Settings};
pub use tree::{folder_children, DisplayNode, FileTree, NodeId, NodeKind};
