use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::kernel::services::adapters::AsyncRuntime;
use crate::kernel::services::ports::{GenerationEvent, ProjectRepository, SandboxEvent};
use crate::kernel::services::{kernel_bus, KernelBusReceiver, KernelMessage};
use crate::kernel::{Action, AppState, Store};

/// Owns the store and drives effects: every dispatch hands its effects to the
/// runtime, and results come back over the bus to be dispatched in turn.
pub struct Session {
    store: Store,
    runtime: AsyncRuntime,
    rx: KernelBusReceiver,
}

impl Session {
    pub fn new(store: Store, repository: Arc<dyn ProjectRepository>) -> io::Result<Self> {
        let (bus, rx) = kernel_bus();
        let runtime = AsyncRuntime::new(bus, repository)?;
        Ok(Self { store, runtime, rx })
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Returns whether the state changed.
    pub fn dispatch(&mut self, action: impl Into<Action>) -> bool {
        let result = self.store.dispatch(action.into());
        for effect in result.effects {
            self.runtime.run_effect(effect);
        }
        result.state_changed
    }

    fn dispatch_all(&mut self, actions: Vec<Action>) -> bool {
        let mut changed = false;
        for action in actions {
            changed |= self.dispatch(action);
        }
        changed
    }

    pub fn handle_generation(&mut self, event: GenerationEvent) -> bool {
        self.dispatch_all(event.into_actions())
    }

    pub fn handle_sandbox(&mut self, event: SandboxEvent) -> bool {
        self.dispatch_all(event.into_actions())
    }

    /// Dispatches everything already on the bus without blocking.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(KernelMessage::Action(action)) = self.rx.try_recv() {
            self.dispatch(action);
            handled += 1;
        }
        handled
    }

    /// Pumps until no effect is in flight or `timeout` passes. Returns whether
    /// the runtime went idle.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.runtime.in_flight() == 0 {
                self.pump();
                // Results may have queued new effects.
                if self.runtime.in_flight() == 0 {
                    return true;
                }
            }
            let now = Instant::now();
            if now >= deadline {
                tracing::warn!(in_flight = self.runtime.in_flight(), "effects still running");
                return false;
            }
            let wait = (deadline - now).min(Duration::from_millis(20));
            if let Ok(KernelMessage::Action(action)) = self.rx.recv_timeout(wait) {
                self.dispatch(action);
            }
        }
    }
}
