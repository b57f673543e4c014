//! Events reported by the execution/preview sandbox.

use serde::{Deserialize, Serialize};

use crate::kernel::action::{Action, PreviewAction, WorkspaceAction};
use crate::kernel::problems::{BuildErrorDraft, BuildSeverity};
use crate::kernel::terminal::TerminalStream;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SandboxEvent {
    Output { stream: TerminalStream, text: String },
    Command { text: String },
    PreviewReady { url: String },
    PreviewStopped,
    Diagnostic {
        file: String,
        line: u32,
        #[serde(default)]
        column: u32,
        message: String,
        #[serde(default = "default_severity")]
        severity: BuildSeverity,
    },
    BuildStarted,
    BuildProgress { progress: f32 },
    BuildFinished,
}

fn default_severity() -> BuildSeverity {
    BuildSeverity::Error
}

/// Progress is a percentage. NaN reads as no progress.
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 100.0)
    }
}

impl SandboxEvent {
    pub fn into_actions(self) -> Vec<Action> {
        match self {
            SandboxEvent::Output { stream, text } => {
                vec![WorkspaceAction::AddTerminalOutput { kind: stream, text }.into()]
            }
            SandboxEvent::Command { text } => vec![WorkspaceAction::AddTerminalOutput {
                kind: TerminalStream::Command,
                text,
            }
            .into()],
            SandboxEvent::PreviewReady { url } => vec![PreviewAction::SetUrl(Some(url)).into()],
            SandboxEvent::PreviewStopped => vec![PreviewAction::SetUrl(None).into()],
            SandboxEvent::Diagnostic {
                file,
                line,
                column,
                message,
                severity,
            } => vec![WorkspaceAction::AddBuildError(BuildErrorDraft {
                file,
                line,
                column,
                message,
                severity,
            })
            .into()],
            SandboxEvent::BuildStarted => vec![
                WorkspaceAction::ClearErrors.into(),
                WorkspaceAction::SetIsBuilding(true).into(),
                WorkspaceAction::SetBuildProgress(0.0).into(),
            ],
            SandboxEvent::BuildProgress { progress } => {
                vec![WorkspaceAction::SetBuildProgress(clamp_progress(progress)).into()]
            }
            SandboxEvent::BuildFinished => vec![
                WorkspaceAction::SetBuildProgress(100.0).into(),
                WorkspaceAction::SetIsBuilding(false).into(),
            ],
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/sandbox.rs"]
mod tests;
