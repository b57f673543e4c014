//! Headless application core (state/action/effect).

pub mod action;
pub mod conversation;
pub mod effect;
pub mod preview;
pub mod problems;
pub mod projects;
pub mod services;
pub mod state;
pub mod store;
pub mod terminal;
pub mod user;
pub mod workspace;

pub use action::{
    Action, ConversationAction, PreviewAction, ProjectAction, UserAction, WorkspaceAction,
};
pub use conversation::{
    AgentPhase, AgentStatus, AiMessage, ConversationState, MessageDraft, Role, StreamOutcome,
};
pub use effect::Effect;
pub use preview::{DeviceFrame, PreviewState};
pub use problems::{BuildError, BuildErrorDraft, BuildSeverity, BuildState};
pub use projects::{
    NewProject, Project, ProjectPatch, ProjectRegistry, ProjectStatus, TechStack,
};
pub use state::AppState;
pub use store::{DispatchResult, Store, SubscriptionId};
pub use terminal::{TerminalEntry, TerminalLog, TerminalStream};
pub use user::{
    Preferences, PreferencesPatch, SubscriptionTier, ThemePreference, User, UserPatch,
    UserSession,
};
pub use workspace::WorkspaceState;
