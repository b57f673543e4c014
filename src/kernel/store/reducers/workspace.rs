use crate::kernel::action::WorkspaceAction;
use crate::kernel::store::{DispatchResult, Store};
use crate::kernel::terminal::TerminalEntry;
use crate::kernel::workspace::is_valid_path;

impl Store {
    pub(in crate::kernel::store) fn reduce_workspace_action(
        &mut self,
        action: WorkspaceAction,
    ) -> DispatchResult {
        match action {
            WorkspaceAction::AddFile(record) => {
                if !is_valid_path(&record.path) {
                    tracing::warn!(
                        path_len = record.path.len(),
                        "ignoring file with empty or too deep path"
                    );
                    return DispatchResult::unchanged();
                }
                DispatchResult::changed(self.state.workspace.add_file(record))
            }
            WorkspaceAction::UpdateFile { path, content } => {
                DispatchResult::changed(self.state.workspace.update_file(&path, content))
            }
            WorkspaceAction::DeleteFile(path) => {
                DispatchResult::changed(self.state.workspace.delete_file(&path))
            }
            WorkspaceAction::SetActiveFile(path) => {
                DispatchResult::changed(self.state.workspace.set_active_file(path))
            }
            WorkspaceAction::LoadFiles(files) => {
                DispatchResult::changed(self.state.workspace.load_files(&files))
            }
            WorkspaceAction::AddTerminalOutput { kind, text } => {
                let entry = TerminalEntry {
                    id: self.next_id(),
                    kind,
                    text,
                    created_at: self.now(),
                };
                self.state.workspace.push_terminal(entry);
                DispatchResult::changed(true)
            }
            WorkspaceAction::ClearTerminal => {
                DispatchResult::changed(self.state.workspace.clear_terminal())
            }
            WorkspaceAction::AddBuildError(draft) => {
                let id = self.next_id();
                self.state.workspace.push_build_error(draft.into_error(id));
                DispatchResult::changed(true)
            }
            WorkspaceAction::ClearErrors => {
                DispatchResult::changed(self.state.workspace.build_mut().clear_errors())
            }
            WorkspaceAction::SetIsBuilding(is_building) => {
                DispatchResult::changed(self.state.workspace.build_mut().set_building(is_building))
            }
            WorkspaceAction::SetBuildProgress(progress) => {
                DispatchResult::changed(self.state.workspace.build_mut().set_progress(progress))
            }
            WorkspaceAction::Reset => DispatchResult::changed(self.state.workspace.reset()),
        }
    }
}
