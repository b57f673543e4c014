use super::conversation::ConversationState;
use super::projects::ProjectRegistry;
use super::user::UserSession;
use super::workspace::WorkspaceState;

/// Everything the store owns. Each field starts at its empty initial value.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub workspace: WorkspaceState,
    pub conversation: ConversationState,
    pub projects: ProjectRegistry,
    pub user: UserSession,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
