use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSeverity {
    Error,
    Warning,
    Info,
}

impl BuildSeverity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildError {
    pub id: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
    pub severity: BuildSeverity,
}

/// A diagnostic as reported by the sandbox, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildErrorDraft {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
    pub severity: BuildSeverity,
}

impl BuildErrorDraft {
    pub fn into_error(self, id: String) -> BuildError {
        BuildError {
            id,
            file: self.file,
            line: self.line,
            column: self.column,
            message: self.message,
            severity: self.severity,
        }
    }
}

/// Build errors, the building flag and progress.
///
/// Errors form a multiset: several entries may point at the same file and
/// line. Progress is stored as given; callers clamp it.
#[derive(Debug, Clone, Default)]
pub struct BuildState {
    errors: Vec<BuildError>,
    is_building: bool,
    progress: f32,
}

impl BuildState {
    pub fn errors(&self) -> &[BuildError] {
        &self.errors
    }

    pub fn is_building(&self) -> bool {
        self.is_building
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn push_error(&mut self, error: BuildError) {
        self.errors.push(error);
    }

    pub fn clear_errors(&mut self) -> bool {
        if self.errors.is_empty() {
            return false;
        }
        self.errors.clear();
        true
    }

    pub fn set_building(&mut self, is_building: bool) -> bool {
        if self.is_building == is_building {
            return false;
        }
        self.is_building = is_building;
        true
    }

    pub fn set_progress(&mut self, progress: f32) -> bool {
        if self.progress.to_bits() == progress.to_bits() {
            return false;
        }
        self.progress = progress;
        true
    }

    pub fn count(&self, severity: BuildSeverity) -> usize {
        self.errors.iter().filter(|e| e.severity == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(|e| e.severity == BuildSeverity::Error)
    }

    pub fn errors_for<'a>(&'a self, file: &'a str) -> impl Iterator<Item = &'a BuildError> + 'a {
        self.errors.iter().filter(move |e| e.file == file)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/problems.rs"]
mod tests;
