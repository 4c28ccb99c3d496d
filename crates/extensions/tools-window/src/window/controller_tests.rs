use std::sync::Arc;

use super::*;
use crate::automation::CommandOutput;
use crate::screen::ScreenSize;
use crate::testing::{CAPABILITY_PROBE, DENIED, FakeChannel, KEYSTROKE, WINDOW_COUNT_PROBE};
use crate::window::chain::{
    STRATEGY_APP_SHORTCUT, STRATEGY_APP_SPECIFIC, STRATEGY_GENERIC, STRATEGY_KEYBOARD,
};
use crate::window::window_types::{ControlMethod, ControlTier};

const FHD: ScreenSize = ScreenSize {
    width: 1920,
    height: 1080,
};

fn controller(platform: Platform, channel: Arc<FakeChannel>) -> UniversalController {
    UniversalController::new(
        platform,
        channel,
        Arc::new(TargetRegistry::builtin()),
        ControllerSettings::default(),
    )
}

fn bounds(action: WindowAction) -> WindowBounds {
    WindowBounds::for_action(action, FHD)
}

#[test]
fn test_left_half_unregistered_without_capability() {
    let channel = Arc::new(FakeChannel::mac("Figma", false));
    let ctl = controller(Platform::MacOs, channel.clone());

    let result = ctl.control_window(WindowAction::SetLeftHalf, bounds(WindowAction::SetLeftHalf));

    assert!(!result.success);
    assert_eq!(result.method, ControlMethod::ManualInstruction);
    assert_eq!(result.attempted, vec![STRATEGY_GENERIC, STRATEGY_KEYBOARD]);
    assert!(result.message.contains("left edge"));
    assert!(result.message.contains("Accessibility"));
    assert_eq!(channel.count("set bounds of front window to {0, 0, 960, 1080}"), 1);
    assert_eq!(channel.count("System Events\"\ntell"), 0);
}

#[test]
fn test_maximize_vscode_app_specific_first() {
    let channel = Arc::new(
        FakeChannel::mac("Code", true).on("tell process \"Code\"", CommandOutput::ok("success")),
    );
    let ctl = controller(Platform::MacOs, channel.clone());

    let result = ctl.control_window(WindowAction::Maximize, bounds(WindowAction::Maximize));

    assert!(result.success);
    assert_eq!(result.method, ControlMethod::AppSpecific);
    assert_eq!(result.attempted, vec![STRATEGY_APP_SPECIFIC]);
    // foreground probe, capability probe, direct recipe
    assert_eq!(channel.calls().len(), 3);
    assert_eq!(channel.count(KEYSTROKE), 0);
    assert_eq!(channel.count(WINDOW_COUNT_PROBE), 0);
}

#[test]
fn test_wps_process_name_resolves_to_registered_target() {
    let channel = Arc::new(
        FakeChannel::mac("WPSOFFICE", true)
            .on("tell process \"WPSOFFICE\"", CommandOutput::ok("success")),
    );
    let ctl = controller(Platform::MacOs, channel);

    let result = ctl.control_window(WindowAction::SetRightHalf, bounds(WindowAction::SetRightHalf));
    assert!(result.success);
    assert_eq!(result.method, ControlMethod::AppSpecific);
}

#[test]
fn test_repeated_requests_choose_same_method() {
    let channel = Arc::new(FakeChannel::mac("Figma", false).on(
        "set position of front window to {960, 0}",
        CommandOutput::ok("success"),
    ));
    let ctl = controller(Platform::MacOs, channel);
    let b = bounds(WindowAction::SetRightHalf);

    let first = ctl.control_window(WindowAction::SetRightHalf, b);
    let second = ctl.control_window(WindowAction::SetRightHalf, b);

    assert!(first.success);
    assert_eq!(first.method, ControlMethod::GenericAutomation);
    assert_eq!(first.method, second.method);
    assert_eq!(first.attempted, second.attempted);
}

#[test]
fn test_denial_requests_elevation_once_per_process() {
    let channel = Arc::new(
        FakeChannel::mac("Figma", true).on("tell application \"Figma\"", CommandOutput::ok(DENIED)),
    );
    let ctl = controller(Platform::MacOs, channel.clone());
    let b = bounds(WindowAction::Maximize);

    let result = ctl.control_window(WindowAction::Maximize, b);
    assert!(!result.success);
    // elevated strategy pruned after the denial
    assert_eq!(result.attempted, vec![STRATEGY_GENERIC, STRATEGY_KEYBOARD]);
    assert!(ctl.elevation_requested());

    ctl.control_window(WindowAction::Maximize, b);
    let opens = channel.calls().iter().filter(|c| c.program == "open").count();
    assert_eq!(opens, 1);
}

#[test]
fn test_keyboard_shortcut_success() {
    let channel = Arc::new(
        FakeChannel::mac("Figma", false).on(KEYSTROKE, CommandOutput::ok("success")),
    );
    let ctl = controller(Platform::MacOs, channel);

    let result = ctl.control_window(WindowAction::SetTopHalf, bounds(WindowAction::SetTopHalf));
    assert!(result.success);
    assert_eq!(result.method, ControlMethod::KeyboardShortcut);
}

#[test]
fn test_unreachable_channel_never_panics() {
    let channel = Arc::new(FakeChannel::new().all_unreachable());
    let ctl = controller(Platform::MacOs, channel);

    for action in WindowAction::ALL {
        let result = ctl.control_window(action, bounds(action));
        assert!(!result.success);
        assert_eq!(result.method, ControlMethod::ManualInstruction);
    }
}

#[test]
fn test_fixed_platform_minimize_runs_one_command() {
    let channel = Arc::new(FakeChannel::new().otherwise(CommandOutput::ok("success\r\n")));
    let ctl = controller(Platform::Windows, channel.clone());

    let result = ctl.control_window(WindowAction::Minimize, bounds(WindowAction::Minimize));

    assert!(result.success);
    assert_eq!(result.method, ControlMethod::NativeApi);
    let calls = channel.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "powershell");
    assert!(calls[0].script().contains("ShowWindow($h, 6)"));
}

#[test]
fn test_fixed_platform_failure_carries_error() {
    let channel = Arc::new(
        FakeChannel::new().otherwise(CommandOutput::failed("wmctrl: command not found")),
    );
    let ctl = controller(Platform::Linux, channel.clone());

    let result = ctl.control_window(WindowAction::SetLeftHalf, bounds(WindowAction::SetLeftHalf));

    assert!(!result.success);
    assert_eq!(result.method, ControlMethod::ManualInstruction);
    assert!(result.error.unwrap().contains("wmctrl: command not found"));
    assert_eq!(channel.calls().len(), 1);
}

#[test]
fn test_status_app_specific_target() {
    let channel = Arc::new(FakeChannel::mac("Finder", false));
    let ctl = controller(Platform::MacOs, channel.clone());

    let status = ctl.permission_status();
    assert!(!status.has_accessibility);
    assert!(status.can_control_current_app);
    assert!(status.has_app_specific_support);
    assert_eq!(status.current_app.as_deref(), Some("Finder"));
    assert_eq!(status.control_tier, ControlTier::AppSpecific);
    assert!(status.suggestions.iter().any(|s| s.contains("Privacy & Security")));
    assert_eq!(channel.count(WINDOW_COUNT_PROBE), 0);
}

#[test]
fn test_status_generic_target_with_capability() {
    let channel = Arc::new(
        FakeChannel::mac("Figma", true).on(WINDOW_COUNT_PROBE, CommandOutput::ok("2\n")),
    );
    let ctl = controller(Platform::MacOs, channel);

    let status = ctl.permission_status();
    assert!(status.has_accessibility);
    assert!(status.can_control_current_app);
    assert!(!status.has_app_specific_support);
    assert_eq!(status.control_tier, ControlTier::Accessibility);
    assert!(status.suggestions.iter().any(|s| s.contains("Finder")));
}

#[test]
fn test_status_window_probe_failure() {
    let channel = Arc::new(
        FakeChannel::mac("Figma", true).on(WINDOW_COUNT_PROBE, CommandOutput::failed("-1728")),
    );
    let ctl = controller(Platform::MacOs, channel);

    let status = ctl.permission_status();
    assert!(!status.can_control_current_app);
    assert!(status.suggestions.iter().any(|s| s.contains("Figma cannot be arranged")));
}

#[test]
fn test_status_inconclusive_capability_probe_is_optimistic() {
    let channel = Arc::new(
        FakeChannel::new()
            .on(crate::testing::FOREGROUND_PROBE, CommandOutput::ok("Figma"))
            .on(
                crate::testing::CAPABILITY_PROBE,
                CommandOutput::ok("error: System Events got an error (-600)"),
            ),
    );
    let ctl = controller(Platform::MacOs, channel);
    assert!(ctl.permission_status().has_accessibility);
}

#[test]
fn test_status_unreachable_channel_is_pessimistic() {
    let channel = Arc::new(FakeChannel::new().all_unreachable());
    let ctl = controller(Platform::MacOs, channel);

    let status = ctl.permission_status();
    assert!(!status.has_accessibility);
    assert!(!status.can_control_current_app);
    assert!(status.current_app.is_none());
    assert_eq!(status.control_tier, ControlTier::ShortcutOnly);
    assert!(status.suggestions.iter().any(|s| s.contains("foreground application")));
}

#[test]
fn test_status_fixed_platform() {
    let channel = Arc::new(FakeChannel::new());
    let ctl = controller(Platform::Linux, channel.clone());

    let status = ctl.permission_status();
    assert_eq!(status.control_tier, ControlTier::Native);
    assert!(status.has_accessibility);
    assert!(channel.calls().is_empty());
}

#[test]
fn test_plan_matches_chain() {
    let channel = Arc::new(FakeChannel::mac("Figma", false));
    let ctl = controller(Platform::MacOs, channel.clone());

    let plan = ctl.plan(WindowAction::SetLeftHalf, bounds(WindowAction::SetLeftHalf));
    let names: Vec<&str> = plan.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec![STRATEGY_GENERIC, STRATEGY_KEYBOARD]);
    assert_eq!(plan[0].attempts.len(), 5);
    // planning only probes
    assert_eq!(channel.calls().len(), 2);
}

#[test]
fn test_app_name_containing_marker_is_not_success() {
    let failure = "error: Can't get window 1 of application \"SuccessBoard\". (-1728)";
    let channel =
        Arc::new(FakeChannel::mac("SuccessBoard", false).otherwise(CommandOutput::ok(failure)));
    let ctl = controller(Platform::MacOs, channel);

    let result = ctl.control_window(WindowAction::SetLeftHalf, bounds(WindowAction::SetLeftHalf));

    assert!(!result.success);
    assert_eq!(result.method, ControlMethod::ManualInstruction);
    assert_eq!(result.attempted, vec![STRATEGY_GENERIC, STRATEGY_KEYBOARD]);
}

#[test]
fn test_process_recipe_skipped_without_capability() {
    let channel = Arc::new(FakeChannel::mac("Code", false));
    let ctl = controller(Platform::MacOs, channel.clone());

    let status = ctl.permission_status();
    assert!(!status.has_accessibility);
    assert!(!status.can_control_current_app);
    assert!(!status.has_app_specific_support);
    assert_eq!(status.control_tier, ControlTier::Automation);

    let result = ctl.control_window(WindowAction::Minimize, bounds(WindowAction::Minimize));
    assert!(!result.success);
    assert_eq!(
        result.attempted,
        vec![STRATEGY_APP_SHORTCUT, STRATEGY_GENERIC, STRATEGY_KEYBOARD]
    );
    assert_eq!(channel.count("tell process \"Code\""), 0);
    assert!(!ctl.elevation_requested());
}

#[test]
fn test_fullscreen_sends_each_shortcut_once() {
    let channel = Arc::new(FakeChannel::mac("Figma", false));
    let ctl = controller(Platform::MacOs, channel.clone());

    let result = ctl.control_window(WindowAction::Fullscreen, bounds(WindowAction::Fullscreen));

    assert!(!result.success);
    // foreground probe, capability probe, one generic attempt, global shortcut
    assert_eq!(channel.calls().len(), 4);
    assert_eq!(channel.count("using {control down, command down}"), 2);
}

#[test]
fn test_unreachable_capability_probe_is_pessimistic() {
    let channel = Arc::new(
        FakeChannel::new()
            .on(crate::testing::FOREGROUND_PROBE, CommandOutput::ok("Figma"))
            .unreachable_on(CAPABILITY_PROBE),
    );
    let ctl = controller(Platform::MacOs, channel);

    let status = ctl.permission_status();
    assert_eq!(status.current_app.as_deref(), Some("Figma"));
    assert!(!status.has_accessibility);
    assert_eq!(status.control_tier, ControlTier::Automation);
}
