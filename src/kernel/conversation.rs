use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub is_streaming: bool,
}

/// A message before the store stamps it with an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDraft {
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub is_streaming: bool,
}

impl MessageDraft {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            is_streaming: false,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// An empty assistant message that streamed deltas will fill in.
    pub fn streaming_assistant() -> Self {
        Self {
            role: Role::Assistant,
            content: String::new(),
            is_streaming: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentPhase {
    Idle,
    Thinking,
    Working,
    Done,
    Error,
}

impl AgentPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Thinking => "thinking",
            Self::Working => "working",
            Self::Done => "done",
            Self::Error => "error",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::Thinking | Self::Working)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub name: String,
    pub status: AgentPhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AgentStatus {
    pub fn new(name: impl Into<String>, status: AgentPhase) -> Self {
        Self {
            name: name.into(),
            status,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// How a generation stream ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    Completed,
    Failed(String),
    Cancelled,
}

pub const DEFAULT_AGENT_NAME: &str = "assistant";

#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<AiMessage>,
    current_agent: Option<AgentStatus>,
    agent_pipeline: Vec<AgentStatus>,
    is_streaming: bool,
    tokens_used: u64,
    error: Option<String>,
}

impl ConversationState {
    pub fn messages(&self) -> &[AiMessage] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&AiMessage> {
        self.messages.last()
    }

    pub fn current_agent(&self) -> Option<&AgentStatus> {
        self.current_agent.as_ref()
    }

    pub fn agent_pipeline(&self) -> &[AgentStatus] {
        &self.agent_pipeline
    }

    pub fn is_streaming(&self) -> bool {
        self.is_streaming
    }

    pub fn tokens_used(&self) -> u64 {
        self.tokens_used
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a stream is open or any agent is still thinking or working.
    pub fn is_busy(&self) -> bool {
        self.is_streaming
            || self
                .current_agent
                .iter()
                .chain(&self.agent_pipeline)
                .any(|agent| agent.status.is_active())
    }

    pub fn push_message(&mut self, message: AiMessage) {
        self.messages.push(message);
    }

    /// Replaces the content of the tail message. Never appends.
    pub fn update_last_message(&mut self, content: String) -> bool {
        let Some(last) = self.messages.last_mut() else {
            return false;
        };
        if last.content == content {
            return false;
        }
        last.content = content;
        true
    }

    pub fn set_streaming(&mut self, is_streaming: bool) -> bool {
        if self.is_streaming == is_streaming {
            return false;
        }
        self.is_streaming = is_streaming;
        true
    }

    pub fn set_current_agent(&mut self, agent: Option<AgentStatus>) -> bool {
        if self.current_agent == agent {
            return false;
        }
        self.current_agent = agent;
        true
    }

    pub fn set_agent_pipeline(&mut self, pipeline: Vec<AgentStatus>) -> bool {
        if self.agent_pipeline == pipeline {
            return false;
        }
        self.agent_pipeline = pipeline;
        true
    }

    pub fn add_tokens_used(&mut self, tokens: u64) -> bool {
        let next = self.tokens_used.saturating_add(tokens);
        if next == self.tokens_used {
            return false;
        }
        self.tokens_used = next;
        true
    }

    pub fn set_error(&mut self, error: Option<String>) -> bool {
        if self.error == error {
            return false;
        }
        self.error = error;
        true
    }

    /// Closes the stream in one step: the streaming flag and the tail
    /// message's `is_streaming` drop, and the current agent plus every
    /// pipeline stage still thinking or working land in a terminal phase.
    pub fn finish_streaming(&mut self, outcome: StreamOutcome) -> bool {
        let mut changed = self.set_streaming(false);

        if let Some(last) = self.messages.last_mut() {
            if last.is_streaming {
                last.is_streaming = false;
                changed = true;
            }
        }

        let (phase, message) = match outcome {
            StreamOutcome::Completed => (AgentPhase::Done, None),
            StreamOutcome::Cancelled => (AgentPhase::Done, Some("cancelled".to_string())),
            StreamOutcome::Failed(error) => {
                changed |= self.set_error(Some(error.clone()));
                (AgentPhase::Error, Some(error))
            }
        };
        for stage in self
            .agent_pipeline
            .iter_mut()
            .filter(|stage| stage.status.is_active())
        {
            stage.status = phase;
            stage.message = message.clone();
            changed = true;
        }

        let name = self
            .current_agent
            .as_ref()
            .map(|agent| agent.name.clone())
            .unwrap_or_else(|| DEFAULT_AGENT_NAME.to_string());
        changed |= self.set_current_agent(Some(AgentStatus {
            name,
            status: phase,
            message,
        }));
        changed
    }

    pub fn clear(&mut self) -> bool {
        let was_empty = self.messages.is_empty()
            && self.current_agent.is_none()
            && self.agent_pipeline.is_empty()
            && !self.is_streaming
            && self.tokens_used == 0
            && self.error.is_none();
        *self = Self::default();
        !was_empty
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/conversation.rs"]
mod tests;
