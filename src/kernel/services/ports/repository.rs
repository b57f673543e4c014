use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::kernel::projects::Project;

pub type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Debug)]
pub enum RepositoryError {
    Io(io::Error),
    Corrupt { path: PathBuf, reason: String },
    InvalidId(String),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::Io(e) => write!(f, "IO error: {}", e),
            RepositoryError::Corrupt { path, reason } => {
                write!(f, "Corrupt project file {}: {}", path.display(), reason)
            }
            RepositoryError::InvalidId(id) => write!(f, "Invalid project id: {:?}", id),
        }
    }
}

impl std::error::Error for RepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepositoryError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RepositoryError {
    fn from(e: io::Error) -> Self {
        RepositoryError::Io(e)
    }
}

/// Durable project storage.
///
/// `list` returns one user's projects, most recently updated first.
/// `save` inserts or replaces by id. `remove` of an unknown id is not an error.
pub trait ProjectRepository: Send + Sync {
    fn list(&self, user_id: &str) -> Result<Vec<Project>>;
    fn save(&self, project: &Project) -> Result<()>;
    fn remove(&self, id: &str) -> Result<()>;
}
