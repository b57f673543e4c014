use crate::kernel::action::ConversationAction;
use crate::kernel::conversation::AiMessage;
use crate::kernel::store::{DispatchResult, Store};

impl Store {
    pub(in crate::kernel::store) fn reduce_conversation_action(
        &mut self,
        action: ConversationAction,
    ) -> DispatchResult {
        let changed = match action {
            ConversationAction::AddMessage(draft) => {
                let message = AiMessage {
                    id: self.next_id(),
                    role: draft.role,
                    content: draft.content,
                    created_at: self.now(),
                    is_streaming: draft.is_streaming,
                };
                self.state.conversation.push_message(message);
                true
            }
            ConversationAction::UpdateLastMessage(content) => {
                self.state.conversation.update_last_message(content)
            }
            ConversationAction::SetStreaming(is_streaming) => {
                self.state.conversation.set_streaming(is_streaming)
            }
            ConversationAction::SetCurrentAgent(agent) => {
                self.state.conversation.set_current_agent(agent)
            }
            ConversationAction::UpdateAgentPipeline(pipeline) => {
                self.state.conversation.set_agent_pipeline(pipeline)
            }
            ConversationAction::AddTokensUsed(tokens) => {
                self.state.conversation.add_tokens_used(tokens)
            }
            ConversationAction::FinishStreaming(outcome) => {
                self.state.conversation.finish_streaming(outcome)
            }
            ConversationAction::SetError(error) => self.state.conversation.set_error(error),
            ConversationAction::Clear => self.state.conversation.clear(),
        };
        DispatchResult::changed(changed)
    }
}
