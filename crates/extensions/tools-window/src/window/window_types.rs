//! Window control type definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::automation::ChannelError;
use crate::screen::ScreenSize;

/// Errors related to window control requests.
#[derive(Debug, Error)]
pub enum WindowError {
    /// Action name not recognized.
    #[error("Unknown window action: {0}")]
    UnknownAction(String),

    /// Bounds with zero width or height.
    #[error("Invalid window bounds: {0}")]
    InvalidBounds(String),

    /// Platform not supported.
    #[error("Window control not supported on this platform")]
    PlatformNotSupported,
}

/// Raised by the environment probe. Always recovered into a pessimistic status.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Automation channel unreachable: {0}")]
    ChannelUnreachable(#[from] ChannelError),

    #[error("No foreground application: {0}")]
    NoForeground(String),
}

/// Split-screen actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowAction {
    SetLeftHalf,
    SetRightHalf,
    SetTopHalf,
    SetBottomHalf,
    SetTopLeftQuarter,
    SetTopRightQuarter,
    SetBottomLeftQuarter,
    SetBottomRightQuarter,
    Maximize,
    Minimize,
    Fullscreen,
}

impl WindowAction {
    pub const ALL: [WindowAction; 11] = [
        WindowAction::SetLeftHalf,
        WindowAction::SetRightHalf,
        WindowAction::SetTopHalf,
        WindowAction::SetBottomHalf,
        WindowAction::SetTopLeftQuarter,
        WindowAction::SetTopRightQuarter,
        WindowAction::SetBottomLeftQuarter,
        WindowAction::SetBottomRightQuarter,
        WindowAction::Maximize,
        WindowAction::Minimize,
        WindowAction::Fullscreen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowAction::SetLeftHalf => "set-left-half",
            WindowAction::SetRightHalf => "set-right-half",
            WindowAction::SetTopHalf => "set-top-half",
            WindowAction::SetBottomHalf => "set-bottom-half",
            WindowAction::SetTopLeftQuarter => "set-top-left-quarter",
            WindowAction::SetTopRightQuarter => "set-top-right-quarter",
            WindowAction::SetBottomLeftQuarter => "set-bottom-left-quarter",
            WindowAction::SetBottomRightQuarter => "set-bottom-right-quarter",
            WindowAction::Maximize => "maximize",
            WindowAction::Minimize => "minimize",
            WindowAction::Fullscreen => "fullscreen",
        }
    }

    /// Whether the action is carried out by setting window geometry.
    pub fn is_geometric(&self) -> bool {
        !matches!(self, WindowAction::Minimize | WindowAction::Fullscreen)
    }
}

impl fmt::Display for WindowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowAction {
    type Err = WindowError;

    /// Accepts kebab-case and snake_case spellings, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        WindowAction::ALL
            .into_iter()
            .find(|action| action.as_str() == normalized)
            .ok_or_else(|| WindowError::UnknownAction(s.to_string()))
    }
}

/// Window geometry in screen coordinates, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl WindowBounds {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds covering the region of `screen` that `action` targets.
    ///
    /// Minimize and fullscreen do not use geometry and get the whole screen.
    pub fn for_action(action: WindowAction, screen: ScreenSize) -> Self {
        let (w, h) = (screen.width, screen.height);
        let (half_w, half_h) = (w / 2, h / 2);
        match action {
            WindowAction::SetLeftHalf => Self::new(0, 0, half_w, h),
            WindowAction::SetRightHalf => Self::new(half_w, 0, w - half_w, h),
            WindowAction::SetTopHalf => Self::new(0, 0, w, half_h),
            WindowAction::SetBottomHalf => Self::new(0, half_h, w, h - half_h),
            WindowAction::SetTopLeftQuarter => Self::new(0, 0, half_w, half_h),
            WindowAction::SetTopRightQuarter => Self::new(half_w, 0, w - half_w, half_h),
            WindowAction::SetBottomLeftQuarter => Self::new(0, half_h, half_w, h - half_h),
            WindowAction::SetBottomRightQuarter => {
                Self::new(half_w, half_h, w - half_w, h - half_h)
            }
            WindowAction::Maximize | WindowAction::Minimize | WindowAction::Fullscreen => {
                Self::new(0, 0, w, h)
            }
        }
    }

    /// Right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn validate(&self) -> Result<(), WindowError> {
        if self.width == 0 || self.height == 0 {
            return Err(WindowError::InvalidBounds(format!(
                "{}x{} at ({}, {})",
                self.width, self.height, self.x, self.y
            )));
        }
        Ok(())
    }
}

/// Which class of strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMethod {
    AppSpecific,
    GenericAutomation,
    AccessibilityAutomation,
    KeyboardShortcut,
    ManualInstruction,
    NativeApi,
}

impl ControlMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMethod::AppSpecific => "app_specific",
            ControlMethod::GenericAutomation => "generic_automation",
            ControlMethod::AccessibilityAutomation => "accessibility_automation",
            ControlMethod::KeyboardShortcut => "keyboard_shortcut",
            ControlMethod::ManualInstruction => "manual_instruction",
            ControlMethod::NativeApi => "native_api",
        }
    }
}

impl fmt::Display for ControlMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one `control_window` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlResult {
    pub success: bool,
    pub method: ControlMethod,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Strategy names in the order they were run.
    #[serde(default)]
    pub attempted: Vec<String>,
}

impl ControlResult {
    pub fn succeeded(
        method: ControlMethod,
        message: impl Into<String>,
        attempted: Vec<String>,
    ) -> Self {
        Self {
            success: true,
            method,
            message: message.into(),
            error: None,
            attempted,
        }
    }

    pub fn manual(
        message: impl Into<String>,
        error: Option<String>,
        attempted: Vec<String>,
    ) -> Self {
        Self {
            success: false,
            method: ControlMethod::ManualInstruction,
            message: message.into(),
            error,
            attempted,
        }
    }
}

/// Best mechanism available for the foreground application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlTier {
    /// A target-specific recipe exists.
    AppSpecific,
    /// Elevated generic automation is granted.
    Accessibility,
    /// Only unprivileged generic automation against the named app.
    Automation,
    /// Nothing but keyboard shortcuts.
    ShortcutOnly,
    /// Fixed-capability platform with direct window-handle access.
    Native,
}

/// Snapshot of what the dispatcher can do right now. Never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionStatus {
    pub has_accessibility: bool,
    pub can_control_current_app: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_app: Option<String>,
    pub has_app_specific_support: bool,
    pub control_tier: ControlTier,
    pub suggestions: Vec<String>,
}

/// Operating system family, chosen at runtime so either branch can be driven
/// from tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
}

impl Platform {
    /// Platform of the running binary. Unknown Unix flavours are treated as
    /// Linux since they usually run X11 tooling.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Platforms where window geometry needs no permission grant.
    pub fn is_fixed_capability(&self) -> bool {
        !matches!(self, Platform::MacOs)
    }
}
