//! Service ports: traits + data contracts.

pub mod clock;
pub mod generation;
pub mod ids;
pub mod repository;
pub mod sandbox;
pub mod settings;

pub use clock::Clock;
pub use generation::GenerationEvent;
pub use ids::IdGenerator;
pub use repository::{ProjectRepository, RepositoryError, Result as RepositoryResult};
pub use sandbox::{clamp_progress, SandboxEvent};
pub use settings::{Settings, DEFAULT_LOG_FILTER};
