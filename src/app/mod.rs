//! 应用层：把 Store、异步运行时和外部事件串起来。

pub mod replay;
pub mod session;

pub use replay::{render_summary, replay_lines, ProjectEvent, ReplayError, ReplayReport, ScriptEvent};
pub use session::Session;
