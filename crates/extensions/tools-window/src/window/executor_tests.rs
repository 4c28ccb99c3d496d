use super::*;
use crate::automation::{CommandOutput, ShellCommand, SuccessCheck};
use crate::testing::{DENIED, FakeChannel};
use crate::window::strategy::Attempt;
use crate::window::window_types::{ControlMethod, ControlTier};

fn status() -> PermissionStatus {
    PermissionStatus {
        has_accessibility: true,
        can_control_current_app: true,
        current_app: Some("Figma".to_string()),
        has_app_specific_support: false,
        control_tier: ControlTier::Accessibility,
        suggestions: vec!["try again later".to_string()],
    }
}

fn strategy(name: &str, method: ControlMethod) -> Strategy {
    Strategy::new(
        name,
        method,
        vec![Attempt {
            label: name.to_string(),
            command: ShellCommand::sh(format!("run {}", name)),
            check: SuccessCheck::Marker,
        }],
    )
}

fn opened(channel: &FakeChannel) -> usize {
    channel.calls().iter().filter(|c| c.program == "open").count()
}

#[test]
fn test_first_success_short_circuits() {
    let channel = FakeChannel::new().on("run s2", CommandOutput::ok("success"));
    let gate = ElevationGate::new(true);
    let chain = vec![
        strategy("s1", ControlMethod::AppSpecific),
        strategy("s2", ControlMethod::GenericAutomation),
        strategy("s3", ControlMethod::AccessibilityAutomation),
        strategy("s4", ControlMethod::KeyboardShortcut),
        strategy("s5", ControlMethod::KeyboardShortcut),
    ];

    let result = StrategyExecutor::new(&channel, &gate).run(chain, WindowAction::Maximize, &status());

    assert!(result.success);
    assert_eq!(result.method, ControlMethod::GenericAutomation);
    assert_eq!(result.attempted, vec!["s1", "s2"]);
    assert_eq!(channel.scripts(), vec!["run s1", "run s2"]);
}

#[test]
fn test_exhaustion_returns_manual_instruction() {
    let channel = FakeChannel::new();
    let gate = ElevationGate::new(true);
    let chain = vec![
        strategy("s1", ControlMethod::GenericAutomation),
        strategy("s2", ControlMethod::KeyboardShortcut),
    ];

    let result =
        StrategyExecutor::new(&channel, &gate).run(chain, WindowAction::SetLeftHalf, &status());

    assert!(!result.success);
    assert_eq!(result.method, ControlMethod::ManualInstruction);
    assert!(result.message.contains("left edge"));
    assert!(result.message.contains("try again later"));
    assert!(result.error.is_some());
    assert_eq!(result.attempted, vec!["s1", "s2"]);
}

#[test]
fn test_empty_chain_goes_straight_to_fallback() {
    let channel = FakeChannel::new();
    let gate = ElevationGate::new(true);
    let result =
        StrategyExecutor::new(&channel, &gate).run(Vec::new(), WindowAction::Minimize, &status());

    assert!(!result.success);
    assert_eq!(result.method, ControlMethod::ManualInstruction);
    assert!(result.attempted.is_empty());
    assert!(channel.calls().is_empty());
}

#[test]
fn test_denial_prunes_elevated_and_requests_once() {
    let channel = FakeChannel::new().on("run s1", CommandOutput::ok(DENIED));
    let gate = ElevationGate::new(true);
    let chain = || {
        vec![
            strategy("s1", ControlMethod::GenericAutomation),
            strategy("s2", ControlMethod::AccessibilityAutomation).elevated(),
            strategy("s3", ControlMethod::AccessibilityAutomation).elevated(),
            strategy("s4", ControlMethod::KeyboardShortcut),
        ]
    };
    let executor = StrategyExecutor::new(&channel, &gate);

    let result = executor.run(chain(), WindowAction::SetRightHalf, &status());
    assert!(!result.success);
    assert_eq!(result.attempted, vec!["s1", "s4"]);
    assert_eq!(channel.count("run s2"), 0);
    assert_eq!(channel.count("run s3"), 0);
    assert_eq!(opened(&channel), 1);
    assert!(gate.was_requested());

    executor.run(chain(), WindowAction::SetRightHalf, &status());
    assert_eq!(opened(&channel), 1);
}

#[test]
fn test_elevated_strategies_before_denial_still_run() {
    let channel = FakeChannel::new()
        .on("run s2", CommandOutput::ok(DENIED))
        .on("run s4", CommandOutput::ok("success"));
    let gate = ElevationGate::new(true);
    let chain = vec![
        strategy("s1", ControlMethod::AccessibilityAutomation).elevated(),
        strategy("s2", ControlMethod::GenericAutomation),
        strategy("s3", ControlMethod::AccessibilityAutomation).elevated(),
        strategy("s4", ControlMethod::KeyboardShortcut),
    ];

    let result = StrategyExecutor::new(&channel, &gate).run(chain, WindowAction::Maximize, &status());
    assert!(result.success);
    assert_eq!(result.method, ControlMethod::KeyboardShortcut);
    assert_eq!(result.attempted, vec!["s1", "s2", "s4"]);
}

#[test]
fn test_elevation_request_disabled() {
    let channel = FakeChannel::new().on("run s1", CommandOutput::ok(DENIED));
    let gate = ElevationGate::new(false);
    let chain = vec![strategy("s1", ControlMethod::GenericAutomation)];

    StrategyExecutor::new(&channel, &gate).run(chain, WindowAction::Maximize, &status());
    assert_eq!(opened(&channel), 0);
    assert!(!gate.was_requested());
}

#[test]
fn test_unreachable_channel_falls_back() {
    let channel = FakeChannel::new().all_unreachable();
    let gate = ElevationGate::new(true);
    let chain = vec![
        strategy("s1", ControlMethod::GenericAutomation),
        strategy("s2", ControlMethod::KeyboardShortcut),
    ];

    let result = StrategyExecutor::new(&channel, &gate).run(chain, WindowAction::Maximize, &status());
    assert!(!result.success);
    assert_eq!(result.method, ControlMethod::ManualInstruction);
    assert!(result.error.unwrap().contains("unavailable"));
}

#[test]
fn test_multi_attempt_strategy_stops_at_first_working_variant() {
    let channel = FakeChannel::new().on("variant b", CommandOutput::ok("success"));
    let gate = ElevationGate::new(true);
    let attempts = ["a", "b", "c"]
        .iter()
        .map(|v| Attempt {
            label: v.to_string(),
            command: ShellCommand::sh(format!("variant {}", v)),
            check: SuccessCheck::Marker,
        })
        .collect();
    let chain = vec![Strategy::new("generic", ControlMethod::GenericAutomation, attempts)];

    let result = StrategyExecutor::new(&channel, &gate).run(chain, WindowAction::Maximize, &status());
    assert!(result.success);
    assert_eq!(channel.scripts(), vec!["variant a", "variant b"]);
}
