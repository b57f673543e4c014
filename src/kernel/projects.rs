use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::FileMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Building,
    Deployed,
    Error,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [Self::Draft, Self::Building, Self::Deployed, Self::Error];

    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Building => "building",
            Self::Deployed => "deployed",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProjectStatusError {
    tag: String,
}

impl fmt::Display for ParseProjectStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown project status: {}", self.tag)
    }
}

impl std::error::Error for ParseProjectStatusError {}

impl FromStr for ProjectStatus {
    type Err = ParseProjectStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| ParseProjectStatusError { tag: s.to_string() })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStack {
    pub framework: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    pub styling: String,
}

/// A persisted project, shaped exactly as the persistence layer stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech_stack: TechStack,
    #[serde(default)]
    pub files: FileMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Case-insensitive substring match on name or description.
    /// `query_lower` must already be lowercase.
    fn matches_query(&self, query_lower: &str) -> bool {
        query_lower.is_empty()
            || self.name.to_lowercase().contains(query_lower)
            || self.description.to_lowercase().contains(query_lower)
    }

    /// Bumps `updated_at` to `now`. The stamp strictly increases even when the
    /// clock does not.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        let floor = self.updated_at + Duration::milliseconds(1);
        self.updated_at = now.max(floor);
    }
}

/// Fields for a project that does not exist yet. The store fills in the id
/// (unless given) and both timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech_stack: TechStack,
    #[serde(default)]
    pub files: FileMap,
}

impl NewProject {
    pub fn into_project(self, id: String, now: DateTime<Utc>) -> Project {
        Project {
            id: self.id.unwrap_or(id),
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            tech_stack: self.tech_stack,
            files: self.files,
            deployment_url: None,
            github_url: None,
            status: ProjectStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update merged into a [`Project`]. `None` leaves a field alone;
/// the optional URLs take `Some(None)` to clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub tech_stack: Option<TechStack>,
    pub files: Option<FileMap>,
    pub deployment_url: Option<Option<String>>,
    pub github_url: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
}

impl ProjectPatch {
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn files(files: FileMap) -> Self {
        Self {
            files: Some(files),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_deployment_url(mut self, url: Option<String>) -> Self {
        self.deployment_url = Some(url);
        self
    }

    pub fn apply(&self, project: &mut Project, now: DateTime<Utc>) {
        if let Some(user_id) = &self.user_id {
            project.user_id = user_id.clone();
        }
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(tech_stack) = &self.tech_stack {
            project.tech_stack = tech_stack.clone();
        }
        if let Some(files) = &self.files {
            project.files = files.clone();
        }
        if let Some(url) = &self.deployment_url {
            project.deployment_url = url.clone();
        }
        if let Some(url) = &self.github_url {
            project.github_url = url.clone();
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        project.touch(now);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectRegistry {
    projects: Vec<Project>,
    active_project: Option<Project>,
    is_loading: bool,
    error: Option<String>,
    search_query: String,
    filter_status: Option<ProjectStatus>,
}

impl ProjectRegistry {
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.active_project.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn filter_status(&self) -> Option<ProjectStatus> {
        self.filter_status
    }

    /// Replaces the whole list and clears any previous error.
    pub fn set_projects(&mut self, projects: Vec<Project>) -> bool {
        self.projects = projects;
        self.error = None;
        true
    }

    /// Newest first: the project goes to the front.
    pub fn add_project(&mut self, project: Project) {
        self.projects.insert(0, project);
    }

    /// Merges `patch` into the listed project and mirrors the result into the
    /// active project when it carries `id`, so the two copies never diverge.
    /// An active project missing from the list is patched in place.
    pub fn update_project(
        &mut self,
        id: &str,
        patch: &ProjectPatch,
        now: DateTime<Utc>,
    ) -> Option<Project> {
        let is_active = self.active_project.as_ref().is_some_and(|p| p.id == id);

        if let Some(listed) = self.projects.iter_mut().find(|p| p.id == id) {
            patch.apply(listed, now);
            let updated = listed.clone();
            if is_active {
                self.active_project = Some(updated.clone());
            }
            return Some(updated);
        }

        let active = self.active_project.as_mut().filter(|_| is_active)?;
        patch.apply(active, now);
        Some(active.clone())
    }

    pub fn delete_project(&mut self, id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        let mut changed = self.projects.len() != before;

        if self.active_project.as_ref().is_some_and(|p| p.id == id) {
            self.active_project = None;
            changed = true;
        }
        changed
    }

    pub fn set_active_project(&mut self, project: Option<Project>) -> bool {
        if self.active_project == project {
            return false;
        }
        self.active_project = project;
        true
    }

    pub fn set_search_query(&mut self, query: String) -> bool {
        if self.search_query == query {
            return false;
        }
        self.search_query = query;
        true
    }

    pub fn set_filter_status(&mut self, status: Option<ProjectStatus>) -> bool {
        if self.filter_status == status {
            return false;
        }
        self.filter_status = status;
        true
    }

    pub fn set_loading(&mut self, is_loading: bool) -> bool {
        if self.is_loading == is_loading {
            return false;
        }
        self.is_loading = is_loading;
        true
    }

    pub fn set_error(&mut self, error: Option<String>) -> bool {
        if self.error == error {
            return false;
        }
        self.error = error;
        true
    }

    /// Projects matching the search query and the status filter, in registry
    /// order. An empty query and no status match everything.
    pub fn filtered(&self) -> Vec<&Project> {
        let query = self.search_query.to_lowercase();
        self.projects
            .iter()
            .filter(|p| p.matches_query(&query))
            .filter(|p| self.filter_status.map_or(true, |status| p.status == status))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/projects.rs"]
mod tests;
