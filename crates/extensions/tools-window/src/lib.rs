//! Split-screen window control tools for splitscreen.
//!
//! ## Tools
//! - `window_control` - Arrange the foreground window (halves, quarters, maximize, minimize, fullscreen)
//! - `window_permission_status` - Report Accessibility state and the available control tier
//! - `window_list_targets` - List applications with dedicated recipes
//! - `window_screen_info` - Primary screen size and per-layout bounds
//!
//! On macOS each request probes the environment and walks a strategy chain
//! (app recipe, app shortcut, generic AppleScript, System Events, global
//! shortcut) until one works. Windows and Linux run a single native command.

mod automation;
mod extension;
mod screen;
mod window;
mod window_tools;

#[cfg(test)]
mod testing;

pub use automation::{
    AutomationChannel, ChannelError, CommandOutput, DENIAL_SIGNATURES, Outcome, ShellChannel,
    ShellCommand, SuccessCheck, interpret_result, is_capability_denied,
};
pub use extension::WindowToolsExtension;
pub use screen::{PrimaryScreen, ScreenError, ScreenGeometry, ScreenSize, StaticScreen};
pub use window::*;
pub use window_tools::*;
