//! 路径树：从扁平的 `/` 分隔路径推导出目录/文件层级

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use slotmap::{new_key_type, SlotMap};
use std::fmt;

new_key_type! { pub struct NodeId; }

/// Deepest path, in segments, the tree accepts.
pub const MAX_PATH_DEPTH: usize = 256;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathTreeError {
    EmptyPath,
    TooDeep { path: String, depth: usize },
    /// A prefix of `path` already exists with a different kind.
    KindConflict {
        path: String,
        prefix: String,
        existing: NodeKind,
    },
}

impl fmt::Display for PathTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathTreeError::EmptyPath => write!(f, "empty path"),
            PathTreeError::TooDeep { path, depth } => write!(
                f,
                "path {path:?} has {depth} segments, more than {MAX_PATH_DEPTH}"
            ),
            PathTreeError::KindConflict {
                path,
                prefix,
                existing,
            } => write!(
                f,
                "path {path:?} conflicts with existing {} node {prefix:?}",
                match existing {
                    NodeKind::File => "file",
                    NodeKind::Directory => "directory",
                }
            ),
        }
    }
}

impl std::error::Error for PathTreeError {}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    name: String,
    path: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena form of the tree, used by file-browsing surfaces that need
/// expansion state and flat rows.
#[derive(Debug, Clone, Default)]
pub struct PathTree {
    arena: SlotMap<NodeId, Node>,
    roots: Vec<NodeId>,
    id_by_path: FxHashMap<String, NodeId>,
    expanded: FxHashSet<NodeId>,
    skipped: Vec<String>,
}

impl PathTree {
    /// Builds the tree from `paths` in the given order.
    ///
    /// Children keep first-seen order. A path that conflicts with an already
    /// created node of another kind is skipped (first write wins) and listed in
    /// [`PathTree::skipped`]. Root directories start expanded.
    pub fn build<'a, I>(paths: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tree = Self::default();
        for path in paths {
            if let Err(err) = tree.insert_path(path) {
                tracing::warn!(error = %err, "path skipped while building tree");
                tree.skipped.push(path.to_string());
            }
        }

        let root_dirs: Vec<NodeId> = tree
            .roots
            .iter()
            .copied()
            .filter(|&id| tree.is_dir(id))
            .collect();
        tree.expanded.extend(root_dirs);
        tree
    }

    /// Inserts one path, creating any missing directory nodes.
    ///
    /// Nothing is attached when the path conflicts with an existing node, so a
    /// failed insert never leaves an empty directory behind.
    pub fn insert_path(&mut self, path: &str) -> Result<NodeId, PathTreeError> {
        if path.is_empty() {
            return Err(PathTreeError::EmptyPath);
        }

        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() > MAX_PATH_DEPTH {
            return Err(PathTreeError::TooDeep {
                path: path.to_string(),
                depth: segments.len(),
            });
        }
        let last = segments.len() - 1;

        let mut prefix = String::with_capacity(path.len());
        for (index, segment) in segments.iter().enumerate() {
            if index > 0 {
                prefix.push('/');
            }
            prefix.push_str(segment);

            let wanted = if index == last {
                NodeKind::File
            } else {
                NodeKind::Directory
            };
            if let Some(existing) = self.find_by_path(&prefix).and_then(|id| self.kind(id)) {
                if existing != wanted {
                    return Err(PathTreeError::KindConflict {
                        path: path.to_string(),
                        prefix,
                        existing,
                    });
                }
            }
        }

        let mut parent: Option<NodeId> = None;
        let mut prefix = String::with_capacity(path.len());
        for (index, segment) in segments.iter().enumerate() {
            if index > 0 {
                prefix.push('/');
            }
            prefix.push_str(segment);

            let id = match self.id_by_path.get(prefix.as_str()) {
                Some(&id) => id,
                None => {
                    let kind = if index == last {
                        NodeKind::File
                    } else {
                        NodeKind::Directory
                    };
                    let id = self.arena.insert(Node {
                        kind,
                        name: (*segment).to_string(),
                        path: prefix.clone(),
                        parent,
                        children: Vec::new(),
                    });
                    match parent.and_then(|p| self.arena.get_mut(p)) {
                        Some(parent_node) => parent_node.children.push(id),
                        None => self.roots.push(id),
                    }
                    self.id_by_path.insert(prefix.clone(), id);
                    id
                }
            };
            parent = Some(id);
        }

        parent.ok_or(PathTreeError::EmptyPath)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Paths rejected by [`PathTree::build`], in input order.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn find_by_path(&self, path: &str) -> Option<NodeId> {
        self.id_by_path.get(path).copied()
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.arena.get(id).map(|n| n.kind)
    }

    pub fn is_dir(&self, id: NodeId) -> bool {
        self.kind(id) == Some(NodeKind::Directory)
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id).map(|n| n.name.as_str())
    }

    pub fn path(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id).map(|n| n.path.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.arena
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn toggle_expand(&mut self, id: NodeId) {
        if self.is_dir(id) && !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn expand(&mut self, id: NodeId) {
        if self.is_dir(id) {
            self.expanded.insert(id);
        }
    }

    pub fn collapse(&mut self, id: NodeId) {
        self.expanded.remove(&id);
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    /// Expands every directory on the way to `path` so it shows up in
    /// [`PathTree::flatten_for_view`].
    pub fn reveal(&mut self, path: &str) -> bool {
        let Some(id) = self.find_by_path(path) else {
            return false;
        };
        let mut current = self.parent(id);
        while let Some(dir) = current {
            self.expanded.insert(dir);
            current = self.parent(dir);
        }
        true
    }

    /// Nested owned nodes, in tree order.
    pub fn to_nodes(&self) -> Vec<PathTreeNode> {
        let mut built: FxHashMap<NodeId, PathTreeNode> = FxHashMap::default();
        let mut stack: Vec<(NodeId, bool)> =
            self.roots.iter().rev().map(|&id| (id, false)).collect();

        // Post-order: a node is assembled once all of its children are.
        while let Some((id, children_done)) = stack.pop() {
            let Some(node) = self.arena.get(id) else {
                continue;
            };
            if !children_done {
                stack.push((id, true));
                stack.extend(node.children.iter().rev().map(|&child| (child, false)));
                continue;
            }
            let children = node
                .children
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            built.insert(
                id,
                PathTreeNode {
                    name: node.name.clone(),
                    path: node.path.clone(),
                    kind: node.kind,
                    children,
                },
            );
        }

        self.roots.iter().filter_map(|id| built.remove(id)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTreeRow {
    pub id: NodeId,
    pub depth: u16,
    pub name: String,
    pub path: String,
    pub kind: NodeKind,
    pub is_expanded: bool,
}

impl PathTree {
    /// Visible rows, depth first, children in tree order.
    pub fn flatten_for_view(&self) -> Vec<PathTreeRow> {
        let mut result = Vec::new();
        let mut stack: Vec<(NodeId, u16)> = self.roots.iter().rev().map(|&id| (id, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.arena.get(id) else {
                continue;
            };
            let is_expanded = self.expanded.contains(&id);
            result.push(PathTreeRow {
                id,
                depth,
                name: node.name.clone(),
                path: node.path.clone(),
                kind: node.kind,
                is_expanded,
            });

            if is_expanded {
                for &child in node.children.iter().rev() {
                    stack.push((child, depth.saturating_add(1)));
                }
            }
        }

        result
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathTreeNode {
    pub name: String,
    pub path: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PathTreeNode>,
}

impl PathTreeNode {
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Pre-order walk over this node and its descendants.
    pub fn walk(&self) -> Vec<&PathTreeNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

/// Derives the nested tree for `paths`, processed in the given order.
pub fn build_path_tree<'a, I>(paths: I) -> Vec<PathTreeNode>
where
    I: IntoIterator<Item = &'a str>,
{
    PathTree::build(paths).to_nodes()
}

#[cfg(test)]
#[path = "../../tests/unit/models/path_tree.rs"]
mod tests;
