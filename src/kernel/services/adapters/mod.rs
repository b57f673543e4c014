//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod app_dirs;
pub mod clock;
pub mod ids;
pub mod project_repository;
pub mod runtime;
pub mod settings;

pub use app_dirs::{ensure_log_dir, ensure_projects_dir, get_log_dir, get_projects_dir};
pub use clock::{ManualClock, SystemClock};
pub use ids::{SequentialIdGenerator, UuidIdGenerator};
pub use project_repository::JsonProjectRepository;
pub use runtime::AsyncRuntime;
pub use settings::{
    ensure_settings_file, get_settings_path, load_settings, load_settings_from, SettingsError,
};
