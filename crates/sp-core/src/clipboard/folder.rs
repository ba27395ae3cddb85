//! Clipboard folder tree.
//!
//! Folders are persisted as a flat list of [`FolderRecord`]s carrying a
//! `parentId` back-reference and are rebuilt into a [`ClipboardFolder`] tree
//! in memory. [`build_tree`] and [`flatten_tree`] are the only conversion
//! points between the two shapes.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::item::ClipboardItem;
use crate::ids::FolderId;

/// Persisted folder row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    pub id: FolderId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<FolderId>,
    pub created_at: i64,
    #[serde(default = "default_expanded")]
    pub expanded: bool,
}

fn default_expanded() -> bool {
    true
}

/// In-memory folder node.
///
/// `items` is a denormalized view filled by consumers; it is never
/// persisted with the folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardFolder {
    pub id: FolderId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<FolderId>,
    #[serde(default)]
    pub children: Vec<ClipboardFolder>,
    #[serde(default)]
    pub items: Vec<ClipboardItem>,
    pub created_at: i64,
    pub expanded: bool,
}

impl ClipboardFolder {
    pub fn new(id: FolderId, name: impl Into<String>, parent_id: Option<FolderId>, now_ms: i64) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
            children: Vec::new(),
            items: Vec::new(),
            created_at: now_ms,
            expanded: true,
        }
    }

    fn from_record(record: &FolderRecord, parent_id: Option<FolderId>) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            parent_id,
            children: Vec::new(),
            items: Vec::new(),
            created_at: record.created_at,
            expanded: record.expanded,
        }
    }

    /// Ids of this folder and every descendant.
    pub fn subtree_ids(&self) -> HashSet<FolderId> {
        let mut ids = HashSet::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            ids.insert(node.id.clone());
            stack.extend(node.children.iter());
        }
        ids
    }
}

/// Rebuild the folder tree from persisted records.
///
/// - A `parentId` that references no existing folder (or the folder itself)
///   makes the folder a root.
/// - Sibling order follows stored order.
/// - A visited set guards against `parentId` cycles: folders reachable only
///   through a cycle are promoted to roots, breaking the cycle at the first
///   member in stored order.
/// - Duplicate ids keep their first occurrence.
pub fn build_tree(records: &[FolderRecord]) -> Vec<ClipboardFolder> {
    let mut first_index: HashMap<&FolderId, usize> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        first_index.entry(&record.id).or_insert(idx);
    }

    let effective_parent = |record: &FolderRecord| -> Option<usize> {
        let parent = record.parent_id.as_ref()?;
        if parent == &record.id {
            return None;
        }
        first_index.get(parent).copied()
    };

    let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        if first_index.get(&record.id) != Some(&idx) {
            continue;
        }
        match effective_parent(record) {
            Some(parent_idx) => children.entry(parent_idx).or_default().push(idx),
            None => roots.push(idx),
        }
    }

    let mut visited = HashSet::new();
    let mut tree: Vec<ClipboardFolder> = roots
        .into_iter()
        .filter_map(|idx| build_node(records, &children, idx, None, &mut visited))
        .collect();

    for idx in 0..records.len() {
        if first_index.get(&records[idx].id) != Some(&idx) || visited.contains(&idx) {
            continue;
        }
        #[cfg(feature = "tracing")]
        tracing::warn!(folder_id = %records[idx].id, "folder parent cycle detected, promoting to root");
        if let Some(node) = build_node(records, &children, idx, None, &mut visited) {
            tree.push(node);
        }
    }

    tree
}

fn build_node(
    records: &[FolderRecord],
    children: &HashMap<usize, Vec<usize>>,
    idx: usize,
    parent_id: Option<FolderId>,
    visited: &mut HashSet<usize>,
) -> Option<ClipboardFolder> {
    if !visited.insert(idx) {
        return None;
    }
    let record = &records[idx];
    let mut node = ClipboardFolder::from_record(record, parent_id);
    if let Some(child_indices) = children.get(&idx) {
        for &child in child_indices {
            if let Some(child_node) =
                build_node(records, children, child, Some(record.id.clone()), visited)
            {
                node.children.push(child_node);
            }
        }
    }
    Some(node)
}

/// Flatten a tree back into persisted records (pre-order).
///
/// Parent references are derived from the tree structure, not from the
/// nodes' own `parent_id` fields.
pub fn flatten_tree(tree: &[ClipboardFolder]) -> Vec<FolderRecord> {
    let mut records = Vec::new();
    for root in tree {
        flatten_into(root, None, &mut records);
    }
    records
}

fn flatten_into(node: &ClipboardFolder, parent_id: Option<&FolderId>, out: &mut Vec<FolderRecord>) {
    out.push(FolderRecord {
        id: node.id.clone(),
        name: node.name.clone(),
        parent_id: parent_id.cloned(),
        created_at: node.created_at,
        expanded: node.expanded,
    });
    for child in &node.children {
        flatten_into(child, Some(&node.id), out);
    }
}

pub fn find_folder<'a>(tree: &'a [ClipboardFolder], id: &FolderId) -> Option<&'a ClipboardFolder> {
    for node in tree {
        if &node.id == id {
            return Some(node);
        }
        if let Some(found) = find_folder(&node.children, id) {
            return Some(found);
        }
    }
    None
}

pub fn find_folder_mut<'a>(
    tree: &'a mut [ClipboardFolder],
    id: &FolderId,
) -> Option<&'a mut ClipboardFolder> {
    for node in tree.iter_mut() {
        if &node.id == id {
            return Some(node);
        }
        if let Some(found) = find_folder_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Insert `folder` under `parent_id`; a missing parent places it at the root.
///
/// Returns whether the requested parent was found.
pub fn insert_folder(
    tree: &mut Vec<ClipboardFolder>,
    mut folder: ClipboardFolder,
    parent_id: Option<&FolderId>,
) -> bool {
    if let Some(parent_id) = parent_id {
        if let Some(parent) = find_folder_mut(tree, parent_id) {
            folder.parent_id = Some(parent_id.clone());
            parent.children.push(folder);
            return true;
        }
    }
    folder.parent_id = None;
    tree.push(folder);
    parent_id.is_none()
}

/// Detach the folder `id` (with its subtree) from the tree.
pub fn remove_folder(tree: &mut Vec<ClipboardFolder>, id: &FolderId) -> Option<ClipboardFolder> {
    if let Some(pos) = tree.iter().position(|f| &f.id == id) {
        return Some(tree.remove(pos));
    }
    tree.iter_mut()
        .find_map(|node| remove_folder(&mut node.children, id))
}
