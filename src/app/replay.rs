//! JSON-lines replay of collaborator events.
//!
//! One event per line, keyed by its source:
//!
//! ```text
//! {"generation": {"type": "delta", "content": "Hello"}}
//! {"sandbox": {"type": "command", "text": "npm run dev"}}
//! {"project": {"type": "open", "id": "p1"}}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::fmt;
use std::fmt::Write as _;
use std::io::{self, BufRead};

use serde::Deserialize;

use crate::kernel::action::ProjectAction;
use crate::kernel::problems::BuildSeverity;
use crate::kernel::projects::NewProject;
use crate::kernel::services::ports::{GenerationEvent, SandboxEvent};
use crate::kernel::AppState;
use crate::models::{PathTreeNode, NodeKind};

use super::Session;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptEvent {
    Generation(GenerationEvent),
    Sandbox(SandboxEvent),
    Project(ProjectEvent),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProjectEvent {
    Request { user_id: String },
    Create { project: NewProject },
    Open { id: String },
    Snapshot,
}

impl ProjectEvent {
    fn into_action(self) -> ProjectAction {
        match self {
            ProjectEvent::Request { user_id } => ProjectAction::Request { user_id },
            ProjectEvent::Create { project } => ProjectAction::Create(project),
            ProjectEvent::Open { id } => ProjectAction::Open(id),
            ProjectEvent::Snapshot => ProjectAction::SnapshotWorkspace,
        }
    }
}

#[derive(Debug)]
pub enum ReplayError {
    Io(io::Error),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<io::Error> for ReplayError {
    fn from(e: io::Error) -> Self {
        ReplayError::Io(e)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub applied: usize,
    /// 1-based line numbers that failed to parse.
    pub skipped: Vec<usize>,
}

pub fn parse_line(line: &str) -> Option<Result<ScriptEvent, serde_json::Error>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(serde_json::from_str(line))
}

/// Applies every event in `reader` to `session`, in order. Project events wait
/// for their effects to settle so a later `open` sees a loaded registry.
pub fn replay_lines<R: BufRead>(
    session: &mut Session,
    reader: R,
) -> Result<ReplayReport, ReplayError> {
    let mut report = ReplayReport::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(parsed) = parse_line(&line) else {
            continue;
        };
        match parsed {
            Ok(ScriptEvent::Generation(event)) => {
                session.handle_generation(event);
            }
            Ok(ScriptEvent::Sandbox(event)) => {
                session.handle_sandbox(event);
            }
            Ok(ScriptEvent::Project(event)) => {
                session.dispatch(event.into_action());
                session.wait_idle(std::time::Duration::from_secs(5));
            }
            Err(err) => {
                tracing::warn!(line = index + 1, error = %err, "skipping malformed event");
                report.skipped.push(index + 1);
                continue;
            }
        }
        report.applied += 1;
        session.pump();
    }
    Ok(report)
}

pub fn render_summary(state: &AppState) -> String {
    let mut out = String::new();
    let workspace = &state.workspace;

    let _ = writeln!(out, "files ({}):", workspace.files().len());
    render_nodes(&mut out, &workspace.tree_nodes());
    if let Some(active) = workspace.active_file() {
        let _ = writeln!(out, "active: {active}");
    }

    let terminal = workspace.terminal();
    let _ = writeln!(out, "terminal ({}):", terminal.len());
    for entry in terminal.entries() {
        let _ = writeln!(out, "  {}", entry.display_line());
    }

    let build = workspace.build();
    let _ = writeln!(
        out,
        "build: {} ({:.0}%), {} errors, {} warnings, {} info",
        if build.is_building() { "running" } else { "idle" },
        build.progress(),
        build.count(BuildSeverity::Error),
        build.count(BuildSeverity::Warning),
        build.count(BuildSeverity::Info),
    );
    for error in build.errors() {
        let _ = writeln!(
            out,
            "  {}:{}:{} {}: {}",
            error.file,
            error.line,
            error.column,
            error.severity.label(),
            error.message
        );
    }

    let preview = workspace.preview();
    let _ = writeln!(
        out,
        "preview: {} [{}{}]",
        preview.url.as_deref().unwrap_or("-"),
        preview.device_frame.label(),
        if preview.is_fullscreen { ", fullscreen" } else { "" },
    );

    let conversation = &state.conversation;
    let _ = writeln!(
        out,
        "conversation: {} messages, {} tokens{}",
        conversation.messages().len(),
        conversation.tokens_used(),
        if conversation.is_streaming() { ", streaming" } else { "" },
    );
    if let Some(agent) = conversation.current_agent() {
        let _ = writeln!(out, "  agent {}: {}", agent.name, agent.status.label());
    }
    if let Some(error) = conversation.error() {
        let _ = writeln!(out, "  error: {error}");
    }

    let projects = &state.projects;
    let _ = writeln!(
        out,
        "projects: {} (active: {})",
        projects.projects().len(),
        projects.active_project().map_or("-", |p| p.name.as_str()),
    );
    if let Some(error) = projects.error() {
        let _ = writeln!(out, "  error: {error}");
    }

    out
}

fn render_nodes(out: &mut String, roots: &[PathTreeNode]) {
    let mut stack: Vec<(&PathTreeNode, usize)> = roots.iter().rev().map(|n| (n, 1)).collect();
    while let Some((node, depth)) = stack.pop() {
        let suffix = match node.kind {
            NodeKind::Directory => "/",
            NodeKind::File => "",
        };
        let _ = writeln!(out, "{}{}{}", "  ".repeat(depth), node.name, suffix);
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/replay.rs"]
mod tests;
