//! Error types for extraction coordination.

use std::path::PathBuf;
use thiserror::Error;

/// Traversal-level errors for extraction jobs.
///
/// Per-file failures are not errors: they are recorded in
/// [`ExtractReport::failures`](crate::extract::ExtractReport) and never abort
/// a batch. Only problems with the traversal itself end a job early.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The destination root could not be created.
    #[error("cannot create destination root {path}: {source}")]
    DestinationRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The job was cancelled between files.
    #[error("Cancelled by user")]
    Cancelled,
}
