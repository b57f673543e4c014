use super::projects::Project;

/// Work the store asks the outside world to do. Effects are returned from
/// `Store::dispatch` and never executed by the store itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadProjects { user_id: String },
    PersistProject(Project),
    RemoveProject { id: String },
}
