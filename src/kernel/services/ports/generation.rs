//! Events streamed by the code-generation service.

use serde::{Deserialize, Serialize};

use crate::kernel::action::{Action, ConversationAction, WorkspaceAction};
use crate::kernel::conversation::{AgentStatus, MessageDraft, Role, StreamOutcome};
use crate::models::FileRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationEvent {
    /// A new message begins. Assistant messages start empty and streaming.
    MessageStarted {
        role: Role,
        #[serde(default)]
        content: String,
    },
    /// Full accumulated text of the tail message, not an increment.
    Delta { content: String },
    AgentChanged { agent: AgentStatus },
    PipelineChanged { pipeline: Vec<AgentStatus> },
    FileGenerated { file: FileRecord },
    TokensUsed { tokens: u64 },
    Finished,
    Failed { error: String },
    Cancelled,
}

impl GenerationEvent {
    pub fn into_actions(self) -> Vec<Action> {
        match self {
            GenerationEvent::MessageStarted { role, content } => {
                let draft = match role {
                    Role::Assistant if content.is_empty() => MessageDraft::streaming_assistant(),
                    role => MessageDraft::new(role, content),
                };
                let streaming = draft.is_streaming;
                let mut actions = vec![ConversationAction::AddMessage(draft).into()];
                if streaming {
                    actions.push(ConversationAction::SetStreaming(true).into());
                }
                actions
            }
            GenerationEvent::Delta { content } => {
                vec![ConversationAction::UpdateLastMessage(content).into()]
            }
            GenerationEvent::AgentChanged { agent } => {
                vec![ConversationAction::SetCurrentAgent(Some(agent)).into()]
            }
            GenerationEvent::PipelineChanged { pipeline } => {
                vec![ConversationAction::UpdateAgentPipeline(pipeline).into()]
            }
            GenerationEvent::FileGenerated { file } => vec![WorkspaceAction::AddFile(file).into()],
            GenerationEvent::TokensUsed { tokens } => {
                vec![ConversationAction::AddTokensUsed(tokens).into()]
            }
            GenerationEvent::Finished => {
                vec![ConversationAction::FinishStreaming(StreamOutcome::Completed).into()]
            }
            GenerationEvent::Failed { error } => {
                vec![ConversationAction::FinishStreaming(StreamOutcome::Failed(error)).into()]
            }
            GenerationEvent::Cancelled => {
                vec![ConversationAction::FinishStreaming(StreamOutcome::Cancelled).into()]
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/generation.rs"]
mod tests;
