//! Fixed-capability branch: one deterministic command, no probing.

use tracing::{info, warn};

use crate::automation::{AutomationChannel, Outcome, SuccessCheck};

use super::command::Operation;
use super::fallback;
use super::serializer;
use super::window_types::{
    ControlMethod, ControlResult, ControlTier, PermissionStatus, Platform, WindowAction,
    WindowBounds,
};

const STRATEGY_NATIVE: &str = "native_api";

pub fn control(
    channel: &dyn AutomationChannel,
    platform: Platform,
    action: WindowAction,
    bounds: WindowBounds,
) -> ControlResult {
    let operation = Operation::for_action(action, bounds);
    let status = status(platform);

    let Some(command) = serializer::render_fixed(platform, &operation) else {
        return fallback::report(
            action,
            &status,
            Some(format!("{:?} has no fixed command set", platform)),
            Vec::new(),
        );
    };

    let attempted = vec![STRATEGY_NATIVE.to_string()];
    let outcome = match channel.execute(&command) {
        Ok(output) => output.interpret(SuccessCheck::Marker),
        Err(e) => Outcome::Failed(e.to_string()),
    };

    match outcome {
        Outcome::Success => {
            info!("{} applied via native window API", action);
            ControlResult::succeeded(
                ControlMethod::NativeApi,
                format!("{} applied via {}", action, ControlMethod::NativeApi),
                attempted,
            )
        }
        Outcome::Denied(detail) | Outcome::Failed(detail) => {
            warn!("native window command failed: {}", detail);
            fallback::report(action, &status, Some(detail), attempted)
        }
    }
}

/// Static status: nothing to grant on these platforms.
pub fn status(platform: Platform) -> PermissionStatus {
    let tool = match platform {
        Platform::Windows => "the Win32 window API",
        _ => "wmctrl and xdotool",
    };
    let mut suggestions = Vec::new();
    if platform == Platform::Linux {
        suggestions.push("Install wmctrl and xdotool if window commands fail".to_string());
    }
    suggestions.push(format!("No permission is needed; windows are arranged with {}", tool));

    PermissionStatus {
        has_accessibility: true,
        can_control_current_app: true,
        current_app: None,
        has_app_specific_support: false,
        control_tier: ControlTier::Native,
        suggestions,
    }
}
