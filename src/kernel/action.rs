use crate::models::{FileMap, FileRecord};

use super::conversation::{AgentStatus, MessageDraft, StreamOutcome};
use super::preview::DeviceFrame;
use super::problems::BuildErrorDraft;
use super::projects::{NewProject, Project, ProjectPatch, ProjectStatus};
use super::terminal::TerminalStream;
use super::user::{PreferencesPatch, User, UserPatch};

#[derive(Debug, Clone)]
pub enum Action {
    Workspace(WorkspaceAction),
    Preview(PreviewAction),
    Conversation(ConversationAction),
    Projects(ProjectAction),
    User(UserAction),
}

#[derive(Debug, Clone)]
pub enum WorkspaceAction {
    AddFile(FileRecord),
    UpdateFile { path: String, content: String },
    DeleteFile(String),
    SetActiveFile(Option<String>),
    LoadFiles(FileMap),
    AddTerminalOutput { kind: TerminalStream, text: String },
    ClearTerminal,
    AddBuildError(BuildErrorDraft),
    ClearErrors,
    SetIsBuilding(bool),
    SetBuildProgress(f32),
    Reset,
}

#[derive(Debug, Clone)]
pub enum PreviewAction {
    SetUrl(Option<String>),
    SetDeviceFrame(DeviceFrame),
    ToggleFullscreen,
}

#[derive(Debug, Clone)]
pub enum ConversationAction {
    AddMessage(MessageDraft),
    UpdateLastMessage(String),
    SetStreaming(bool),
    SetCurrentAgent(Option<AgentStatus>),
    UpdateAgentPipeline(Vec<AgentStatus>),
    AddTokensUsed(u64),
    FinishStreaming(StreamOutcome),
    SetError(Option<String>),
    Clear,
}

#[derive(Debug, Clone)]
pub enum ProjectAction {
    Request { user_id: String },
    SetProjects(Vec<Project>),
    Create(NewProject),
    Add(Project),
    Update { id: String, patch: ProjectPatch },
    Delete(String),
    SetActive(Option<Project>),
    Open(String),
    SnapshotWorkspace,
    SetSearchQuery(String),
    SetFilterStatus(Option<ProjectStatus>),
    SetLoading(bool),
    SetError(Option<String>),
}

#[derive(Debug, Clone)]
pub enum UserAction {
    SetUser(User),
    Update(UserPatch),
    UpdatePreferences(PreferencesPatch),
    DeductCredits(u64),
    Clear,
    SetError(Option<String>),
}

impl From<WorkspaceAction> for Action {
    fn from(action: WorkspaceAction) -> Self {
        Action::Workspace(action)
    }
}

impl From<PreviewAction> for Action {
    fn from(action: PreviewAction) -> Self {
        Action::Preview(action)
    }
}

impl From<ConversationAction> for Action {
    fn from(action: ConversationAction) -> Self {
        Action::Conversation(action)
    }
}

impl From<ProjectAction> for Action {
    fn from(action: ProjectAction) -> Self {
        Action::Projects(action)
    }
}

impl From<UserAction> for Action {
    fn from(action: UserAction) -> Self {
        Action::User(action)
    }
}
