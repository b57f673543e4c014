use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::kernel::preview::DeviceFrame;

pub const DEFAULT_LOG_FILTER: &str = "nexus=info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory for project files. Falls back to the app data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub default_device_frame: DeviceFrame,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_device_frame: DeviceFrame::default(),
            log_filter: default_log_filter(),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
