//! Command-line interface for browsing and extracting ARC content.
//!
//! Runs against a directory-backed archive source; a proprietary ARC
//! decoder plugs in behind the same `ArchiveSource` boundary.

mod fs_source;

use clap::{Parser, Subcommand};
use explorer::jobs::{spawn_file_extract, spawn_folder_extract, spawn_full_extract};
use explorer::{
    ArcNode, ArchiveSource, Extractor, FileTree, JobEvent, LabelTable, NodeId, NodeKind, Region,
    Settings,
};
use fs_source::FsArchive;
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "arcex")]
#[command(version, about = "Browse and extract ARC archives from the command line", long_about = None)]
struct Cli {
    /// Settings file with defaults for region and extract location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Region for localized content (e.g. us_english, japanese)
    #[arg(long, global = true)]
    region: Option<Region>,

    /// Hash-label file for friendlier descriptions
    #[arg(long, global = true)]
    labels: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one level of the archive tree
    Ls {
        /// Archive directory to browse
        archive: PathBuf,

        /// Folder path within the archive; omit for the root level
        path: Option<String>,
    },

    /// Show properties and shared paths for one node
    Info {
        /// Archive directory to browse
        archive: PathBuf,

        /// Node path within the archive
        path: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract a file, a subtree, or the whole archive
    Extract {
        /// Archive directory to extract from
        archive: PathBuf,

        /// Node to extract; omit to extract everything
        path: Option<String>,

        /// Destination root (defaults to the configured extract location)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_or_default(path)?,
        None => Settings::default(),
    };
    if let Some(region) = cli.region {
        settings.region = region;
    }
    if let Some(labels) = cli.labels {
        settings.label_file = Some(labels);
    }

    let labels = match &settings.label_file {
        Some(path) => LabelTable::load(path)?,
        None => LabelTable::empty(),
    };

    match cli.command {
        Commands::Ls { archive, path } => {
            handle_ls(&archive, path.as_deref().unwrap_or(""), &settings, &labels)
        }
        Commands::Info {
            archive,
            path,
            json,
        } => handle_info(&archive, &path, &settings, &labels, json),
        Commands::Extract { archive, path, out } => {
            if let Some(out) = out {
                settings.extract_location = out;
            }
            handle_extract(&archive, path.as_deref(), &settings).await
        }
    }
}

/// Walks the tree down to `path`, expanding along the way.
fn locate(
    tree: &mut FileTree,
    source: &FsArchive,
    labels: &LabelTable,
    path: &str,
) -> Option<NodeId> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    let mut current = None;
    let mut level = tree.roots().to_vec();
    for part in trimmed.split('/') {
        let next = level
            .iter()
            .copied()
            .find(|id| tree.node(*id).name == part)?;
        tree.expand(source, labels, next);
        level = tree.children(next).to_vec();
        current = Some(next);
    }
    current
}

fn handle_ls(
    archive: &Path,
    path: &str,
    settings: &Settings,
    labels: &LabelTable,
) -> Result<(), Box<dyn Error>> {
    let source = FsArchive::open(archive)?;
    let mut tree = FileTree::build(&source, settings.region, labels);

    let ids = if path.trim_matches('/').is_empty() {
        tree.roots().to_vec()
    } else {
        let id = locate(&mut tree, &source, labels, path)
            .ok_or_else(|| format!("no such folder: {path}"))?;
        tree.children(id).to_vec()
    };

    println!("{} files in archive", source.file_count());
    for id in ids {
        let node = tree.node(id);
        match &node.kind {
            NodeKind::Folder(_) => {
                println!(
                    "{:<44} {:>10} {:>10}  Folder",
                    format!("{}/", node.name),
                    "-",
                    "-"
                );
            }
            NodeKind::File(file) => {
                println!(
                    "{:<44} {:>10} {:>10}  {}",
                    node.name, file.compressed_size, file.decompressed_size, node.description
                );
            }
        }
    }
    Ok(())
}

fn handle_info(
    archive: &Path,
    path: &str,
    settings: &Settings,
    labels: &LabelTable,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let source = FsArchive::open(archive)?;
    let mut tree = FileTree::build(&source, settings.region, labels);
    let id = locate(&mut tree, &source, labels, path)
        .ok_or_else(|| format!("no such node: {path}"))?;

    let shared: Vec<String> = if tree.node(id).is_shared {
        tree.shared_file_paths(&source, id).to_vec()
    } else {
        Vec::new()
    };

    let node = tree.node(id);
    let props = node.properties(settings.integer_display);

    if json {
        let mut map = serde_json::Map::new();
        map.insert("name".into(), node.name.clone().into());
        map.insert("path".into(), node.path.clone().into());
        for (key, value) in &props {
            map.insert((*key).to_string(), value.clone().into());
        }
        if !shared.is_empty() {
            map.insert("sharedFilePaths".into(), shared.clone().into());
        }
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    println!("{}", node.path);
    for (key, value) in &props {
        println!("{key}: {value}");
    }
    if !shared.is_empty() {
        println!("Shared with the following {} files:", shared.len());
        for path in &shared {
            println!("  {path}");
        }
    }
    Ok(())
}

async fn handle_extract(
    archive: &Path,
    path: Option<&str>,
    settings: &Settings,
) -> Result<(), Box<dyn Error>> {
    let source = Arc::new(FsArchive::open(archive)?);
    let extractor = Extractor::new(settings.extract_location.clone(), settings.region);

    let mut handle = match path {
        None => spawn_full_extract(source, extractor),
        Some(path) => {
            let trimmed = path.trim_matches('/');
            let resolved = source
                .resolve_path(trimmed, settings.region)
                .or_else(|| source.resolve_path(&format!("{trimmed}/"), settings.region));
            match resolved {
                Some(ArcNode::File(file)) => spawn_file_extract(source, extractor, file),
                Some(ArcNode::Dir(_)) => {
                    spawn_folder_extract(source, extractor, trimmed.to_string())
                }
                None => return Err(format!("no such node: {path}").into()),
            }
        }
    };

    let cancel = handle.cancel_flag.clone();
    ctrlc::set_handler(move || {
        cancel.store(true, Ordering::Relaxed);
    })?;

    let bar = ProgressBar::new(100);
    bar.set_style(ProgressStyle::with_template("{bar:40} {percent:>3}% {msg}")?);

    while let Some(event) = handle.events.recv().await {
        match event {
            JobEvent::Started { description } => bar.println(description),
            JobEvent::Progress { label, percent } => {
                bar.set_position(percent.round() as u64);
                bar.set_message(label.trim_end().to_string());
            }
            JobEvent::Finished { summary, .. } => {
                bar.finish_and_clear();
                println!("{summary}");
                break;
            }
        }
    }

    match handle.task.await? {
        Ok(report) => {
            for failure in &report.failures {
                eprintln!("  {}: {}", failure.path, failure.reason);
            }
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
