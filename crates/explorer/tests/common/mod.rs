//! In-memory archive source shared by the integration tests.
#![allow(dead_code)]

use explorer::{ArcNode, ArchiveSource, DirEntry, FileEntry, Region, SourceError};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};

/// Scriptable in-memory archive.
///
/// Directory keys are stored exactly as registered, so tests can exercise
/// path tables that mix trailing-slash conventions. Extraction failures can
/// be injected per path, and the child/shared query counters let tests
/// observe laziness.
#[derive(Default)]
pub struct MockArchive {
    roots: Vec<ArcNode>,
    children: HashMap<String, Vec<ArcNode>>,
    by_path: HashMap<String, ArcNode>,
    data: HashMap<String, Vec<u8>>,
    shared: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    /// When set, every extraction waits on this barrier before writing.
    pub extract_gate: Option<Arc<Barrier>>,
    pub children_calls: AtomicUsize,
    pub shared_calls: AtomicUsize,
}

impl MockArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a directory under its exact path-table key.
    pub fn add_dir(&mut self, key: &str) {
        let node = ArcNode::Dir(DirEntry {
            path: key.to_string(),
            is_shared: false,
            is_regional: false,
        });
        self.by_path.insert(key.to_string(), node);
        self.children.entry(key.to_string()).or_default();
    }

    /// Registers a file entry and the bytes it extracts to.
    pub fn add_file(&mut self, entry: FileEntry, bytes: &[u8]) {
        self.data.insert(entry.path.clone(), bytes.to_vec());
        self.by_path
            .insert(entry.path.clone(), ArcNode::File(entry));
    }

    /// Appends an already registered node to the root level.
    pub fn add_root(&mut self, path: &str) {
        let node = self.by_path.get(path).expect("node registered").clone();
        self.roots.push(node);
    }

    /// Appends an already registered node to `parent_key`'s child list.
    pub fn add_child(&mut self, parent_key: &str, path: &str) {
        let node = self.by_path.get(path).expect("node registered").clone();
        self.add_child_node(parent_key, node);
    }

    /// Appends an arbitrary node to `parent_key`'s child list without
    /// registering it in the path table.
    pub fn add_child_node(&mut self, parent_key: &str, node: ArcNode) {
        self.children
            .get_mut(parent_key)
            .expect("parent registered")
            .push(node);
    }

    pub fn set_shared(&mut self, path: &str, paths: &[&str]) {
        self.shared
            .insert(path.to_string(), paths.iter().map(|p| p.to_string()).collect());
    }

    pub fn fail_extract(&mut self, path: &str) {
        self.failing.insert(path.to_string());
    }
}

impl ArchiveSource for MockArchive {
    fn root_nodes(&self, _region: Region) -> Vec<ArcNode> {
        self.roots.clone()
    }

    fn children(&self, dir: &DirEntry, _region: Region) -> Vec<ArcNode> {
        self.children_calls.fetch_add(1, Ordering::Relaxed);
        self.children.get(&dir.path).cloned().unwrap_or_default()
    }

    fn resolve_path(&self, path: &str, _region: Region) -> Option<ArcNode> {
        self.by_path.get(path).cloned()
    }

    fn extract_file(
        &self,
        file: &FileEntry,
        dest: &Path,
        _region: Region,
    ) -> Result<(), SourceError> {
        if let Some(gate) = &self.extract_gate {
            gate.wait();
        }
        if self.failing.contains(&file.path) {
            return Err(SourceError::MissingEntry(file.path.clone()));
        }
        let bytes = self
            .data
            .get(&file.path)
            .ok_or_else(|| SourceError::MissingEntry(file.path.clone()))?;
        fs::write(dest, bytes)?;
        Ok(())
    }

    fn shared_file_paths(&self, file: &FileEntry, _region: Region) -> Vec<String> {
        self.shared_calls.fetch_add(1, Ordering::Relaxed);
        self.shared.get(&file.path).cloned().unwrap_or_default()
    }

    fn file_count(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Builds a file entry, deriving the name and extension from the path.
pub fn file_entry(path: &str, offset: u64, compressed: u64, decompressed: u64) -> FileEntry {
    let file_name = path.rsplit('/').next().unwrap_or(path).to_string();
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_string())
        .unwrap_or_default();
    FileEntry {
        path: path.to_string(),
        file_name,
        extension,
        is_shared: false,
        is_regional: false,
        offset,
        compressed_size: compressed,
        decompressed_size: decompressed,
        is_compressed: compressed != decompressed,
    }
}
