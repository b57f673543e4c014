use crate::models::{FileMap, FileRecord, FileSet, PathTree, PathTreeNode, MAX_PATH_DEPTH};

use super::preview::PreviewState;
use super::problems::{BuildError, BuildState};
use super::terminal::{TerminalEntry, TerminalLog};

/// One editing session: files, selection, terminal, build and preview.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceState {
    files: FileSet,
    active_file: Option<String>,
    terminal: TerminalLog,
    build: BuildState,
    preview: PreviewState,
}

impl WorkspaceState {
    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn file(&self, path: &str) -> Option<&FileRecord> {
        self.files.get(path)
    }

    /// The selected path. It may name a file that does not exist yet.
    pub fn active_file(&self) -> Option<&str> {
        self.active_file.as_deref()
    }

    pub fn active_record(&self) -> Option<&FileRecord> {
        self.active_file.as_deref().and_then(|p| self.files.get(p))
    }

    pub fn terminal(&self) -> &TerminalLog {
        &self.terminal
    }

    pub fn build(&self) -> &BuildState {
        &self.build
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn path_tree(&self) -> PathTree {
        PathTree::build(self.files.paths())
    }

    pub fn tree_nodes(&self) -> Vec<PathTreeNode> {
        self.path_tree().to_nodes()
    }

    pub fn file_map(&self) -> FileMap {
        self.files.to_file_map()
    }

    pub fn add_file(&mut self, record: FileRecord) -> bool {
        if !is_valid_path(&record.path) {
            return false;
        }
        self.files.upsert(record)
    }

    pub fn update_file(&mut self, path: &str, content: String) -> bool {
        self.files.set_content(path, content)
    }

    pub fn delete_file(&mut self, path: &str) -> bool {
        let removed = self.files.remove(path).is_some();
        let was_active = self.active_file.as_deref() == Some(path);
        if was_active {
            self.active_file = None;
        }
        removed || was_active
    }

    pub fn set_active_file(&mut self, path: Option<String>) -> bool {
        if self.active_file == path {
            return false;
        }
        self.active_file = path;
        true
    }

    /// Swaps in a project's files. The selection is dropped.
    pub fn load_files(&mut self, files: &FileMap) -> bool {
        self.files = FileSet::from_file_map(files);
        self.active_file = None;
        true
    }

    pub fn push_terminal(&mut self, entry: TerminalEntry) {
        self.terminal.push(entry);
    }

    pub fn clear_terminal(&mut self) -> bool {
        self.terminal.clear()
    }

    pub fn push_build_error(&mut self, error: BuildError) {
        self.build.push_error(error);
    }

    pub fn build_mut(&mut self) -> &mut BuildState {
        &mut self.build
    }

    pub fn preview_mut(&mut self) -> &mut PreviewState {
        &mut self.preview
    }

    pub fn reset(&mut self) -> bool {
        *self = Self::default();
        true
    }
}

/// Non-empty and no deeper than the path tree accepts.
pub fn is_valid_path(path: &str) -> bool {
    !path.is_empty() && path.split('/').count() <= MAX_PATH_DEPTH
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/workspace.rs"]
mod tests;
