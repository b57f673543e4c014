use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceFrame {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl DeviceFrame {
    pub const ALL: [DeviceFrame; 3] = [Self::Desktop, Self::Tablet, Self::Mobile];

    pub fn label(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
        }
    }

    /// Simulated viewport width in CSS pixels; `None` means full width.
    pub fn viewport_width(self) -> Option<u16> {
        match self {
            Self::Desktop => None,
            Self::Tablet => Some(768),
            Self::Mobile => Some(375),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDeviceFrameError {
    tag: String,
}

impl fmt::Display for ParseDeviceFrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown device frame: {}", self.tag)
    }
}

impl std::error::Error for ParseDeviceFrameError {}

impl FromStr for DeviceFrame {
    type Err = ParseDeviceFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|frame| frame.label() == s)
            .ok_or_else(|| ParseDeviceFrameError { tag: s.to_string() })
    }
}

/// Live preview of the sandboxed app. The fields are independent: a new URL
/// keeps the current device frame and fullscreen setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewState {
    pub url: Option<String>,
    pub device_frame: DeviceFrame,
    pub is_fullscreen: bool,
}

impl PreviewState {
    pub fn set_url(&mut self, url: Option<String>) -> bool {
        if self.url == url {
            return false;
        }
        self.url = url;
        true
    }

    pub fn set_device_frame(&mut self, frame: DeviceFrame) -> bool {
        if self.device_frame == frame {
            return false;
        }
        self.device_frame = frame;
        true
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        self.is_fullscreen = !self.is_fullscreen;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/preview.rs"]
mod tests;
