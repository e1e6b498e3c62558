mod common;

use common::{file_entry, MockArchive};
use explorer::jobs::{spawn_file_extract, spawn_folder_extract, spawn_full_extract};
use explorer::{Extractor, JobEvent, JobStatus, Region};
use std::sync::{Arc, Barrier};
use tempfile::TempDir;

const REGION: Region = Region::UsEnglish;

fn sample_archive() -> MockArchive {
    let mut arc = MockArchive::new();
    arc.add_dir("models/");
    arc.add_root("models/");
    arc.add_file(file_entry("models/b.bin", 0, 5, 5), b"bbbbb");
    arc.add_file(file_entry("models/c.bin", 5, 5, 5), b"ccccc");
    arc.add_file(file_entry("models/d.bin", 10, 5, 5), b"ddddd");
    arc.add_child("models/", "models/b.bin");
    arc.add_child("models/", "models/c.bin");
    arc.add_child("models/", "models/d.bin");
    arc
}

async fn drain(handle: &mut explorer::JobHandle) -> Vec<JobEvent> {
    let mut events = Vec::new();
    while let Some(event) = handle.events.recv().await {
        let finished = matches!(event, JobEvent::Finished { .. });
        events.push(event);
        if finished {
            break;
        }
    }
    events
}

#[tokio::test]
async fn full_extract_job_streams_ordered_events() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(sample_archive());
    let extractor = Extractor::new(dir.path(), REGION);

    let mut handle = spawn_full_extract(source, extractor);
    let events = drain(&mut handle).await;

    assert!(matches!(events.first(), Some(JobEvent::Started { .. })));

    let percents: Vec<f64> = events
        .iter()
        .filter_map(|event| match event {
            JobEvent::Progress { percent, .. } => Some(*percent),
            _ => None,
        })
        .collect();
    // One in-loop report per file, then the explicit completion report.
    assert_eq!(percents.len(), 4);
    assert!(percents.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(percents[..3].iter().all(|percent| *percent < 100.0));
    assert_eq!(percents[3], 100.0);

    match events.last() {
        Some(JobEvent::Finished { summary, status }) => {
            assert_eq!(*status, JobStatus::Succeeded);
            assert!(summary.contains("3 files"));
        }
        other => panic!("expected Finished, got {other:?}"),
    }

    let report = handle.task.await.unwrap().unwrap();
    assert_eq!(report.extracted, 3);
    assert!(dir.path().join("models/d.bin").exists());
}

#[tokio::test]
async fn file_job_reports_its_single_outcome() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(sample_archive());
    let extractor = Extractor::new(dir.path(), REGION);
    let file = file_entry("models/b.bin", 0, 5, 5);

    let mut handle = spawn_file_extract(source, extractor, file);
    let events = drain(&mut handle).await;

    match events.last() {
        Some(JobEvent::Finished { summary, status }) => {
            assert_eq!(*status, JobStatus::Succeeded);
            assert_eq!(summary, "Extracted models/b.bin");
        }
        other => panic!("expected Finished, got {other:?}"),
    }
    assert!(dir.path().join("models/b.bin").exists());
}

#[tokio::test]
async fn cancelled_job_finishes_with_cancelled_status() {
    let dir = TempDir::new().unwrap();
    let gate = Arc::new(Barrier::new(2));
    let mut arc = sample_archive();
    arc.extract_gate = Some(gate.clone());
    let source = Arc::new(arc);
    let extractor = Extractor::new(dir.path(), REGION);

    let mut handle = spawn_folder_extract(source, extractor, "models".to_string());

    // Wait until the worker is inside the first file, then cancel and let
    // it run on into the between-files check.
    loop {
        match handle.events.recv().await {
            Some(JobEvent::Progress { .. }) => break,
            Some(_) => continue,
            None => panic!("job ended before reporting progress"),
        }
    }
    handle.cancel();
    let wait = tokio::task::spawn_blocking(move || gate.wait());

    let mut status = None;
    while let Some(event) = handle.events.recv().await {
        if let JobEvent::Finished { status: s, .. } = event {
            status = Some(s);
            break;
        }
    }
    wait.await.unwrap();

    assert_eq!(status, Some(JobStatus::Cancelled));
    assert!(matches!(
        handle.task.await.unwrap(),
        Err(explorer::ExtractError::Cancelled)
    ));
    // Only the first file got through before the cancel check.
    assert!(dir.path().join("models/b.bin").exists());
    assert!(!dir.path().join("models/c.bin").exists());
}
