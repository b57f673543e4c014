//! nexus - AI 应用构建器的内存工作区状态库
//!
//! 模块结构：
//! - models: 数据模型（FileSet, FileMap, PathTree, Language）
//! - kernel: 无界面核心（Store, Action, Effect, 各状态切片, services）
//! - app: 应用层（Session, 事件回放）

pub mod app;
pub mod kernel;
pub mod models;
