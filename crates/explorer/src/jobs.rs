//! Background extraction jobs and their event channel.
//!
//! A job runs the synchronous extraction work on a blocking worker and
//! talks back to its owner through a single typed channel. The owning side
//! consumes events cooperatively; it never blocks on the worker. Within one
//! job the order is fixed: one `Started`, then `Progress` messages with
//! non-decreasing percentages in enumeration order, then one `Finished`.
//!
//! One extraction job is expected to run at a time; callers disable the
//! triggering action while a job is running rather than relying on any
//! mutual exclusion here.

use crate::error::ExtractError;
use crate::extract::{progress_label, ExtractReport, Extractor, ProgressSink};
use crate::service::{ArchiveSource, FileEntry};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Terminal state of a background job.
///
/// `Succeeded` means the traversal completed; individual files may still
/// have failed and are reported through the job's summary and final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Succeeded,
    Failed,
    Cancelled,
}

/// Message from a running job to its owner.
#[derive(Debug, Clone)]
pub enum JobEvent {
    Started { description: String },
    Progress { label: String, percent: f64 },
    Finished { summary: String, status: JobStatus },
}

/// Handle for a running extraction job.
pub struct JobHandle {
    /// Flag to signal cancellation; the worker checks it between files.
    pub cancel_flag: Arc<AtomicBool>,
    /// Receiver for the job's event stream.
    pub events: mpsc::UnboundedReceiver<JobEvent>,
    /// The worker task; resolves to the job's final report.
    pub task: JoinHandle<Result<ExtractReport, ExtractError>>,
}

impl JobHandle {
    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }
}

/// Spawns a single-file extraction job.
///
/// Must be called within a tokio runtime.
pub fn spawn_file_extract<A>(source: Arc<A>, extractor: Extractor, file: FileEntry) -> JobHandle
where
    A: ArchiveSource + Send + Sync + 'static,
{
    spawn_job(
        format!("Extracting {}", file.path),
        move |_progress, _cancel| Ok(extractor.extract_file(source.as_ref(), &file)),
    )
}

/// Spawns a job extracting every file under `folder_path`.
///
/// Must be called within a tokio runtime.
pub fn spawn_folder_extract<A>(
    source: Arc<A>,
    extractor: Extractor,
    folder_path: String,
) -> JobHandle
where
    A: ArchiveSource + Send + Sync + 'static,
{
    spawn_job(
        format!("Extracting files from {}", folder_path.trim_matches('/')),
        move |progress, cancel| {
            extractor.extract_folder(source.as_ref(), &folder_path, progress, cancel)
        },
    )
}

/// Spawns a job extracting the whole archive.
///
/// Must be called within a tokio runtime.
pub fn spawn_full_extract<A>(source: Arc<A>, extractor: Extractor) -> JobHandle
where
    A: ArchiveSource + Send + Sync + 'static,
{
    spawn_job("Extracting all files".to_string(), move |progress, cancel| {
        extractor.extract_all(source.as_ref(), progress, cancel)
    })
}

fn spawn_job<F>(description: String, work: F) -> JobHandle
where
    F: FnOnce(&ProgressSink, &AtomicBool) -> Result<ExtractReport, ExtractError> + Send + 'static,
{
    let (tx, events) = mpsc::unbounded_channel();
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel = cancel_flag.clone();

    let _ = tx.send(JobEvent::Started { description });

    let task = tokio::task::spawn_blocking(move || {
        let progress_tx = tx.clone();
        let progress = move |label: &str, percent: f64| {
            let _ = progress_tx.send(JobEvent::Progress {
                label: label.to_string(),
                percent,
            });
        };

        let result = work(&progress, &cancel);

        let (summary, status) = match &result {
            Ok(report) => {
                // In-loop progress stays below 100; completion is reported
                // explicitly once the traversal is done.
                let _ = tx.send(JobEvent::Progress {
                    label: progress_label(""),
                    percent: 100.0,
                });
                (report.summary.clone(), JobStatus::Succeeded)
            }
            Err(ExtractError::Cancelled) => {
                (ExtractError::Cancelled.to_string(), JobStatus::Cancelled)
            }
            Err(e) => (e.to_string(), JobStatus::Failed),
        };
        let _ = tx.send(JobEvent::Finished { summary, status });

        result
    });

    JobHandle {
        cancel_flag,
        events,
        task,
    }
}
