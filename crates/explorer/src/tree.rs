//! Lazily deepened display tree over an archive source.
//!
//! Nodes live in an arena owned by [`FileTree`] and are addressed by
//! [`NodeId`]; parent/child relations are ids, never owning references. The
//! tree is built fresh for one archive/region pair and only ever deepened in
//! place — opening another archive or switching regions means discarding it
//! and building a new one.

use crate::format::{self, FileCategory};
use crate::labels::LabelTable;
use crate::region::Region;
use crate::service::{ArcNode, ArchiveSource, DirEntry, FileEntry};
use crate::settings::IntegerDisplay;
use std::collections::HashSet;

/// Identifier of a node in a [`FileTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// File-specific display state.
#[derive(Debug)]
pub struct FileDetails {
    pub offset: u64,
    pub compressed_size: u64,
    pub decompressed_size: u64,
    pub is_compressed: bool,
    entry: FileEntry,
    shared_paths: Option<Vec<String>>,
}

impl FileDetails {
    /// The service-level entry backing this node.
    pub fn entry(&self) -> &FileEntry {
        &self.entry
    }
}

/// Folder-specific display state.
#[derive(Debug)]
pub struct FolderState {
    entry: DirEntry,
    children: Vec<NodeId>,
    children_loaded: bool,
}

impl FolderState {
    /// The service-level entry backing this node.
    pub fn entry(&self) -> &DirEntry {
        &self.entry
    }

    /// Whether the one-time child population has happened.
    pub fn children_loaded(&self) -> bool {
        self.children_loaded
    }
}

#[derive(Debug)]
pub enum NodeKind {
    File(FileDetails),
    Folder(FolderState),
}

/// A UI-facing projection of one archive node.
#[derive(Debug)]
pub struct DisplayNode {
    /// Display name, derived from the archive path.
    pub name: String,
    /// Absolute archive path.
    pub path: String,
    pub is_shared: bool,
    pub is_regional: bool,
    /// Icon classifier.
    pub category: FileCategory,
    /// Human description, from the label table or the extension.
    pub description: String,
    pub kind: NodeKind,
}

impl DisplayNode {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder(_))
    }

    /// Property names and display strings for a details panel, in order.
    pub fn properties(&self, display: IntegerDisplay) -> Vec<(&'static str, String)> {
        match &self.kind {
            NodeKind::File(file) => vec![
                ("Description", self.description.clone()),
                ("Offset", display.format(file.offset)),
                ("Compressed Size", display.format(file.compressed_size)),
                ("Decompressed Size", display.format(file.decompressed_size)),
            ],
            NodeKind::Folder(_) => vec![("Description", self.description.clone())],
        }
    }
}

#[derive(Debug)]
struct NodeEntry {
    parent: Option<NodeId>,
    node: DisplayNode,
}

/// Arena of display nodes mirroring one open archive.
#[derive(Debug)]
pub struct FileTree {
    nodes: Vec<NodeEntry>,
    roots: Vec<NodeId>,
    region: Region,
}

impl FileTree {
    /// Builds the root level, plus the immediate children of each root
    /// folder so the first level can show counts without a second query.
    /// Deeper levels are deferred until [`expand`](Self::expand).
    pub fn build<A: ArchiveSource + ?Sized>(
        source: &A,
        region: Region,
        labels: &LabelTable,
    ) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            region,
        };
        for node in source.root_nodes(region) {
            let id = tree.insert(None, node, labels);
            tree.roots.push(id);
        }
        for id in tree.roots.clone() {
            tree.populate(source, labels, id);
        }
        tree
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &DisplayNode {
        &self.nodes[id.0].node
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Children populated so far; empty for files and unloaded folders.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.0].node.kind {
            NodeKind::Folder(folder) => &folder.children,
            NodeKind::File(_) => &[],
        }
    }

    /// Finds a node by absolute archive path, ignoring trailing slashes.
    /// Only nodes created so far are found; expand parents first to deepen.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        let want = path.trim_matches('/');
        self.nodes
            .iter()
            .position(|entry| entry.node.path.trim_matches('/') == want)
            .map(NodeId)
    }

    /// Signals that `id` was expanded in the UI.
    ///
    /// The first signal populates anything still missing one level below the
    /// folder's children, so each child folder can be expanded in turn.
    /// Later signals are no-ops: the children lists keep their identity and
    /// contents.
    pub fn expand<A: ArchiveSource + ?Sized>(
        &mut self,
        source: &A,
        labels: &LabelTable,
        id: NodeId,
    ) {
        if !self.node(id).is_folder() {
            return;
        }
        self.populate(source, labels, id);
        for child in self.children(id).to_vec() {
            self.populate(source, labels, child);
        }
    }

    /// Paths sharing this file's underlying data, ascending alphabetical.
    ///
    /// Computed through the source on first read and cached for the node's
    /// lifetime; folders always report an empty list.
    pub fn shared_file_paths<A: ArchiveSource + ?Sized>(
        &mut self,
        source: &A,
        id: NodeId,
    ) -> &[String] {
        let region = self.region;
        match &mut self.nodes[id.0].node.kind {
            NodeKind::File(details) => {
                if details.shared_paths.is_none() {
                    let mut paths = source.shared_file_paths(&details.entry, region);
                    paths.sort();
                    details.shared_paths = Some(paths);
                }
                details.shared_paths.as_deref().unwrap_or(&[])
            }
            NodeKind::Folder(_) => &[],
        }
    }

    /// One-time child population for a folder node.
    fn populate<A: ArchiveSource + ?Sized>(&mut self, source: &A, labels: &LabelTable, id: NodeId) {
        let path = match &self.nodes[id.0].node.kind {
            NodeKind::Folder(folder) if !folder.children_loaded => {
                self.nodes[id.0].node.path.clone()
            }
            _ => return,
        };

        let children = folder_children(source, self.region, &path);
        let ids: Vec<NodeId> = children
            .into_iter()
            .map(|child| self.insert(Some(id), child, labels))
            .collect();

        if let NodeKind::Folder(folder) = &mut self.nodes[id.0].node.kind {
            folder.children = ids;
            folder.children_loaded = true;
        }
    }

    fn insert(&mut self, parent: Option<NodeId>, node: ArcNode, labels: &LabelTable) -> NodeId {
        let display = match node {
            ArcNode::File(entry) => file_display(entry, labels),
            ArcNode::Dir(entry) => folder_display(entry),
        };
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeEntry {
            parent,
            node: display,
        });
        id
    }
}

/// Children of the folder at `parent_path`, tolerant of the path table's
/// trailing-slash conventions.
///
/// The path is queried slash-trimmed and with exactly one trailing slash;
/// results are merged keeping the first node seen per distinct name, so the
/// two spellings of one directory never produce duplicate children. An empty
/// parent path loads the root level. A path that resolves to nothing, or to
/// a file, contributes no children.
pub fn folder_children<A: ArchiveSource + ?Sized>(
    source: &A,
    region: Region,
    parent_path: &str,
) -> Vec<ArcNode> {
    let trimmed = parent_path.trim_matches('/');
    if trimmed.is_empty() {
        return source.root_nodes(region);
    }

    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for candidate in [trimmed.to_string(), format!("{trimmed}/")] {
        let Some(ArcNode::Dir(dir)) = source.resolve_path(&candidate, region) else {
            continue;
        };
        for child in source.children(&dir, region) {
            if seen.contains(child.name()) {
                continue;
            }
            seen.insert(child.name().to_string());
            merged.push(child);
        }
    }
    merged
}

fn file_display(entry: FileEntry, labels: &LabelTable) -> DisplayNode {
    let description = labels
        .get(&entry.file_name)
        .map(str::to_string)
        .unwrap_or_else(|| format::description_for_extension(&entry.extension).to_string());

    DisplayNode {
        name: entry.file_name.clone(),
        path: entry.path.clone(),
        is_shared: entry.is_shared,
        is_regional: entry.is_regional,
        category: format::category_for_extension(&entry.extension),
        description,
        kind: NodeKind::File(FileDetails {
            offset: entry.offset,
            compressed_size: entry.compressed_size,
            decompressed_size: entry.decompressed_size,
            is_compressed: entry.is_compressed,
            entry,
            shared_paths: None,
        }),
    }
}

fn folder_display(entry: DirEntry) -> DisplayNode {
    DisplayNode {
        name: entry.name().to_string(),
        path: entry.path.clone(),
        is_shared: entry.is_shared,
        is_regional: entry.is_regional,
        category: FileCategory::Folder,
        description: "Folder".to_string(),
        kind: NodeKind::Folder(FolderState {
            entry,
            children: Vec::new(),
            children_loaded: false,
        }),
    }
}
