//! Async runtime adapter: executes store effects off the owner thread and
//! reports results back over the kernel bus.
//!
//! Repository jobs run one at a time in submission order, so a later save of
//! the same project always lands after an earlier one.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::runtime::{Runtime, RuntimeFlavor};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::kernel::action::ProjectAction;
use crate::kernel::services::bus::KernelBusSender;
use crate::kernel::services::ports::{ProjectRepository, RepositoryError};
use crate::kernel::Effect;

type Job = Box<dyn FnOnce(&dyn ProjectRepository, &KernelBusSender) + Send>;

pub struct AsyncRuntime {
    /// Owned here on the multi-thread flavor. A current-thread runtime lives
    /// on the worker thread that drives it.
    _runtime: Option<Runtime>,
    jobs: UnboundedSender<(Job, InFlight)>,
    in_flight: Arc<AtomicUsize>,
}

/// Decrements the in-flight counter when the job ends, after its messages
/// are on the bus.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn start(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl AsyncRuntime {
    pub fn new(bus: KernelBusSender, repository: Arc<dyn ProjectRepository>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Self::with_runtime(runtime, bus, repository)
    }

    /// Runs repository jobs on `runtime`. A current-thread runtime only makes
    /// progress inside `block_on`, so it moves onto a dedicated thread.
    pub fn with_runtime(
        runtime: Runtime,
        bus: KernelBusSender,
        repository: Arc<dyn ProjectRepository>,
    ) -> io::Result<Self> {
        let (jobs, rx) = unbounded_channel::<(Job, InFlight)>();
        let worker = drain_jobs(rx, bus, repository);

        let runtime = match runtime.handle().runtime_flavor() {
            RuntimeFlavor::CurrentThread => {
                std::thread::Builder::new()
                    .name("nexus-repository".to_string())
                    .spawn(move || runtime.block_on(worker))?;
                None
            }
            _ => {
                runtime.spawn(worker);
                Some(runtime)
            }
        };

        Ok(Self {
            _runtime: runtime,
            jobs,
            in_flight: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Effects submitted but not yet finished.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::LoadProjects { user_id } => {
                self.submit(Box::new(
                    move |repo: &dyn ProjectRepository, bus: &KernelBusSender| {
                        load_projects(repo, bus, &user_id)
                    },
                ));
            }
            Effect::PersistProject(project) => {
                self.submit(Box::new(
                    move |repo: &dyn ProjectRepository, bus: &KernelBusSender| {
                        match repo.save(&project) {
                            Ok(()) => tracing::debug!(project = %project.id, "project saved"),
                            Err(e) => report_failure(bus, "save", &e),
                        }
                    },
                ));
            }
            Effect::RemoveProject { id } => {
                self.submit(Box::new(
                    move |repo: &dyn ProjectRepository, bus: &KernelBusSender| {
                        match repo.remove(&id) {
                            Ok(()) => tracing::debug!(project = %id, "project removed"),
                            Err(e) => report_failure(bus, "remove", &e),
                        }
                    },
                ));
            }
        }
    }

    fn submit(&self, job: Job) {
        let guard = InFlight::start(&self.in_flight);
        if self.jobs.send((job, guard)).is_err() {
            tracing::error!("repository worker stopped, effect dropped");
        }
    }
}

async fn drain_jobs(
    mut rx: UnboundedReceiver<(Job, InFlight)>,
    bus: KernelBusSender,
    repository: Arc<dyn ProjectRepository>,
) {
    while let Some((job, guard)) = rx.recv().await {
        let repository = Arc::clone(&repository);
        let bus = bus.clone();
        let result = tokio::task::spawn_blocking(move || job(repository.as_ref(), &bus)).await;
        if let Err(e) = result {
            tracing::error!(error = %e, "repository job panicked");
        }
        drop(guard);
    }
}

fn load_projects(repo: &dyn ProjectRepository, bus: &KernelBusSender, user_id: &str) {
    match repo.list(user_id) {
        Ok(projects) => {
            tracing::debug!(count = projects.len(), "projects loaded");
            let _ = bus.send_action(ProjectAction::SetProjects(projects));
        }
        Err(e) => report_failure(bus, "list", &e),
    }
    let _ = bus.send_action(ProjectAction::SetLoading(false));
}

fn report_failure(bus: &KernelBusSender, op: &'static str, error: &RepositoryError) {
    tracing::error!(op, error = %error, "project repository failed");
    let _ = bus.send_action(ProjectAction::SetError(Some(format!("{op} failed: {error}"))));
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/runtime.rs"]
mod tests;
