use crate::kernel::action::ProjectAction;
use crate::kernel::effect::Effect;
use crate::kernel::projects::ProjectPatch;
use crate::kernel::store::{DispatchResult, Store};

impl Store {
    pub(in crate::kernel::store) fn reduce_project_action(
        &mut self,
        action: ProjectAction,
    ) -> DispatchResult {
        match action {
            ProjectAction::Request { user_id } => {
                let changed = self.state.projects.set_loading(true);
                DispatchResult {
                    effects: vec![Effect::LoadProjects { user_id }],
                    state_changed: changed,
                }
            }
            ProjectAction::SetProjects(projects) => {
                DispatchResult::changed(self.state.projects.set_projects(projects))
            }
            ProjectAction::Create(draft) => {
                let id = draft.id.clone().unwrap_or_else(|| self.next_id());
                let project = draft.into_project(id, self.now());
                tracing::info!(project = %project.id, "project created");
                self.state.projects.add_project(project.clone());
                DispatchResult {
                    effects: vec![Effect::PersistProject(project)],
                    state_changed: true,
                }
            }
            ProjectAction::Add(project) => {
                self.state.projects.add_project(project.clone());
                DispatchResult {
                    effects: vec![Effect::PersistProject(project)],
                    state_changed: true,
                }
            }
            ProjectAction::Update { id, patch } => self.update_project(&id, &patch),
            ProjectAction::Delete(id) => {
                let changed = self.state.projects.delete_project(&id);
                DispatchResult {
                    effects: vec![Effect::RemoveProject { id }],
                    state_changed: changed,
                }
            }
            ProjectAction::SetActive(project) => {
                DispatchResult::changed(self.state.projects.set_active_project(project))
            }
            ProjectAction::Open(id) => {
                let Some(project) = self.state.projects.get(&id).cloned() else {
                    tracing::warn!(project = %id, "open of unknown project ignored");
                    return DispatchResult::unchanged();
                };
                let mut changed = self.state.workspace.load_files(&project.files);
                changed |= self.state.projects.set_active_project(Some(project));
                DispatchResult::changed(changed)
            }
            ProjectAction::SnapshotWorkspace => {
                let Some(id) = self.state.projects.active_project().map(|p| p.id.clone()) else {
                    tracing::warn!("snapshot without an active project ignored");
                    return DispatchResult::unchanged();
                };
                let patch = ProjectPatch::files(self.state.workspace.file_map());
                self.update_project(&id, &patch)
            }
            ProjectAction::SetSearchQuery(query) => {
                DispatchResult::changed(self.state.projects.set_search_query(query))
            }
            ProjectAction::SetFilterStatus(status) => {
                DispatchResult::changed(self.state.projects.set_filter_status(status))
            }
            ProjectAction::SetLoading(is_loading) => {
                DispatchResult::changed(self.state.projects.set_loading(is_loading))
            }
            ProjectAction::SetError(error) => {
                if let Some(error) = &error {
                    tracing::warn!(error = %error, "project registry error");
                }
                DispatchResult::changed(self.state.projects.set_error(error))
            }
        }
    }

    fn update_project(&mut self, id: &str, patch: &ProjectPatch) -> DispatchResult {
        let now = self.now();
        match self.state.projects.update_project(id, patch, now) {
            Some(project) => DispatchResult {
                effects: vec![Effect::PersistProject(project)],
                state_changed: true,
            },
            None => DispatchResult::unchanged(),
        }
    }
}
