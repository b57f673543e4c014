use chrono::{DateTime, Utc};

use super::services::adapters::{SystemClock, UuidIdGenerator};
use super::services::ports::{Clock, IdGenerator};
use super::{Action, AppState, Effect};

mod reducers;

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    pub(crate) fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    pub(crate) fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }

    pub(crate) fn merge(&mut self, other: DispatchResult) {
        self.state_changed |= other.state_changed;
        self.effects.extend(other.effects);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&AppState)>;

pub struct Store {
    state: AppState,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self::with_services(state, Box::new(SystemClock), Box::new(UuidIdGenerator))
    }

    pub fn with_services(
        state: AppState,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            state,
            clock,
            ids,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Registers `f` to run after every dispatch that changes state.
    pub fn subscribe(&mut self, f: impl FnMut(&AppState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        tracing::debug!(action = action_name(&action), "dispatch");
        let result = self.reduce(action);
        if result.state_changed {
            self.notify();
        }
        result
    }

    /// Dispatches in order and merges the results.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = Action>) -> DispatchResult {
        let mut result = DispatchResult::unchanged();
        for action in actions {
            result.merge(self.dispatch(action));
        }
        result
    }

    fn reduce(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::Workspace(action) => self.reduce_workspace_action(action),
            Action::Preview(action) => self.reduce_preview_action(action),
            Action::Conversation(action) => self.reduce_conversation_action(action),
            Action::Projects(action) => self.reduce_project_action(action),
            Action::User(action) => self.reduce_user_action(action),
        }
    }

    fn notify(&mut self) {
        let state = &self.state;
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(state);
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn next_id(&mut self) -> String {
        self.ids.next_id()
    }
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::Workspace(_) => "workspace",
        Action::Preview(_) => "preview",
        Action::Conversation(_) => "conversation",
        Action::Projects(_) => "projects",
        Action::User(_) => "user",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
