//! 数据模型层

pub mod file_set;
pub mod language;
pub mod path_tree;

pub use file_set::{FileMap, FileRecord, FileSet};
pub use language::Language;
pub use path_tree::{
    build_path_tree, NodeId, NodeKind, PathTree, PathTreeError, PathTreeNode, PathTreeRow,
    MAX_PATH_DEPTH,
};
