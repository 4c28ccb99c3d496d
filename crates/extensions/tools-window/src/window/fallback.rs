//! Manual-instruction fallback.

use super::command::KeyChord;
use super::window_types::{ControlResult, PermissionStatus, WindowAction};

/// Instruction a person can follow to get the same effect by hand.
pub fn instruction(action: WindowAction) -> String {
    let by_hand = match action {
        WindowAction::SetLeftHalf => "Drag the window to the left edge of the screen",
        WindowAction::SetRightHalf => "Drag the window to the right edge of the screen",
        WindowAction::SetTopHalf => "Drag the window to the top half of the screen",
        WindowAction::SetBottomHalf => "Drag the window to the bottom half of the screen",
        WindowAction::SetTopLeftQuarter => "Drag the window to the top-left corner of the screen",
        WindowAction::SetTopRightQuarter => "Drag the window to the top-right corner of the screen",
        WindowAction::SetBottomLeftQuarter => {
            "Drag the window to the bottom-left corner of the screen"
        }
        WindowAction::SetBottomRightQuarter => {
            "Drag the window to the bottom-right corner of the screen"
        }
        WindowAction::Maximize => "Double-click the window title bar",
        WindowAction::Minimize => "Click the yellow button in the window title bar",
        WindowAction::Fullscreen => "Click the green button in the window title bar",
    };

    match KeyChord::global_for(action) {
        Some(chord) => format!("{}, or press {}", by_hand, chord.label()),
        None => by_hand.to_string(),
    }
}

/// Build the terminal manual-instruction result.
pub fn report(
    action: WindowAction,
    status: &PermissionStatus,
    error: Option<String>,
    attempted: Vec<String>,
) -> ControlResult {
    let mut message = format!("Manual action required for {}: {}.", action, instruction(action));
    for suggestion in &status.suggestions {
        message.push_str("\n- ");
        message.push_str(suggestion);
    }
    ControlResult::manual(message, error, attempted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::window_types::{ControlMethod, ControlTier};

    fn status(suggestions: Vec<String>) -> PermissionStatus {
        PermissionStatus {
            has_accessibility: false,
            can_control_current_app: false,
            current_app: None,
            has_app_specific_support: false,
            control_tier: ControlTier::ShortcutOnly,
            suggestions,
        }
    }

    #[test]
    fn test_instruction_left_half() {
        let text = instruction(WindowAction::SetLeftHalf);
        assert!(text.contains("left edge"));
        assert!(text.contains("Control+Option+Left Arrow"));
    }

    #[test]
    fn test_every_action_has_instruction() {
        for action in WindowAction::ALL {
            assert!(!instruction(action).is_empty());
        }
    }

    #[test]
    fn test_report_is_manual() {
        let result = report(
            WindowAction::Maximize,
            &status(vec!["Grant Accessibility access".to_string()]),
            Some("boom".to_string()),
            vec!["generic_automation".to_string()],
        );
        assert!(!result.success);
        assert_eq!(result.method, ControlMethod::ManualInstruction);
        assert!(result.message.contains("Double-click"));
        assert!(result.message.contains("- Grant Accessibility access"));
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert_eq!(result.attempted, vec!["generic_automation"]);
    }

    #[test]
    fn test_report_without_suggestions() {
        let result = report(WindowAction::Minimize, &status(Vec::new()), None, Vec::new());
        assert!(!result.message.contains("\n-"));
        assert!(result.error.is_none());
    }
}
