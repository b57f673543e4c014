//! Project persistence as one JSON document per project.
//!
//! Layout: `<dir>/<project id>.json`. Writes go through `<id>.json.tmp` and a
//! rename so a crash never leaves a half-written project behind.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::kernel::projects::Project;
use crate::kernel::services::ports::repository::{ProjectRepository, RepositoryError, Result};

#[derive(Debug, Clone)]
pub struct JsonProjectRepository {
    dir: PathBuf,
}

impl JsonProjectRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn project_path(&self, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.dir.join(format!("{id}.json")))
    }
}

fn validate_id(id: &str) -> Result<()> {
    let invalid = id.is_empty()
        || id.starts_with('.')
        || id.contains(['/', '\\'])
        || id.chars().any(char::is_control);
    if invalid {
        return Err(RepositoryError::InvalidId(id.to_string()));
    }
    Ok(())
}

fn read_project_file(path: &Path) -> Result<Project> {
    let data = fs::read(path)?;
    serde_json::from_slice(&data).map_err(|err| RepositoryError::Corrupt {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

impl ProjectRepository for JsonProjectRepository {
    fn list(&self, user_id: &str) -> Result<Vec<Project>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut projects = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension() != Some(OsStr::new("json")) {
                continue;
            }
            match read_project_file(&path) {
                Ok(project) if project.user_id == user_id => projects.push(project),
                Ok(_) => {}
                Err(err) => tracing::warn!(error = %err, "skipping unreadable project file"),
            }
        }

        projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(projects)
    }

    fn save(&self, project: &Project) -> Result<()> {
        let final_path = self.project_path(&project.id)?;
        fs::create_dir_all(&self.dir)?;
        let tmp_path = self.dir.join(format!("{}.json.tmp", project.id));
        let bytes = serde_json::to_vec_pretty(project)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;

        fs::write(&tmp_path, bytes)?;
        match fs::rename(&tmp_path, &final_path) {
            Ok(()) => Ok(()),
            Err(rename_err) => {
                if final_path.exists() {
                    fs::remove_file(&final_path)?;
                    fs::rename(&tmp_path, &final_path)?;
                    Ok(())
                } else {
                    Err(rename_err.into())
                }
            }
        }
    }

    fn remove(&self, id: &str) -> Result<()> {
        let path = self.project_path(id)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/project_repository.rs"]
mod tests;
