use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalStream {
    Stdout,
    Stderr,
    Command,
}

impl TerminalStream {
    pub fn label(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
            Self::Command => "command",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Self::Command => "$ ",
            Self::Stdout | Self::Stderr => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalEntry {
    pub id: String,
    pub kind: TerminalStream,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl TerminalEntry {
    pub fn display_line(&self) -> String {
        format!("{}{}", self.kind.prompt(), self.text)
    }
}

/// Append-only terminal output. Entries are never reordered, merged or
/// dropped except by [`TerminalLog::clear`].
#[derive(Debug, Clone, Default)]
pub struct TerminalLog {
    entries: Vec<TerminalEntry>,
}

impl TerminalLog {
    pub fn entries(&self) -> &[TerminalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TerminalEntry> {
        self.entries.last()
    }

    pub fn push(&mut self, entry: TerminalEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        self.entries.clear();
        true
    }

    pub fn count(&self, kind: TerminalStream) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}
