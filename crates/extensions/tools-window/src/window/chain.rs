//! Strategy chain builder.

use crate::automation::SuccessCheck;

use super::command::{CommandDescriptor, KeyChord, Operation, ScriptVariant};
use super::registry::Target;
use super::strategy::{Attempt, Strategy};
use super::window_types::{ControlMethod, PermissionStatus, WindowAction, WindowBounds};

pub const STRATEGY_APP_SPECIFIC: &str = "app_specific";
pub const STRATEGY_APP_SHORTCUT: &str = "app_shortcut";
pub const STRATEGY_GENERIC: &str = "generic_automation";
pub const STRATEGY_ACCESSIBILITY: &str = "accessibility_automation";
pub const STRATEGY_KEYBOARD: &str = "keyboard_shortcut";

/// Assemble the ordered strategies for one request:
///
/// 1. the target's direct recipe (elevated for process-level recipes)
/// 2. the target's own shortcut for the action
/// 3. generic multi-variant automation (foreground app known)
/// 4. elevated System Events automation (capability granted)
/// 5. the global tiling shortcut
pub fn build_chain(
    status: &PermissionStatus,
    action: WindowAction,
    bounds: WindowBounds,
    target: Option<&Target>,
    settle_delay_ms: u64,
) -> Vec<Strategy> {
    let mut chain = Vec::new();
    let operation = Operation::for_action(action, bounds);
    let app = status.current_app.as_deref();

    if let Some((recipe, target)) = target.and_then(|t| t.direct.map(|r| (r, t))) {
        // Process-level recipes are left out entirely without the grant.
        if status.has_accessibility || !recipe.needs_elevation() {
            let desc = recipe.describe(&target.name, app.unwrap_or(&target.name), action, bounds);
            let strategy = Strategy::new(
                STRATEGY_APP_SPECIFIC,
                ControlMethod::AppSpecific,
                vec![Attempt::from_descriptor(&desc, SuccessCheck::Marker)],
            );
            chain.push(if recipe.needs_elevation() {
                strategy.elevated()
            } else {
                strategy
            });
        }
    }

    if let Some(desc) = target.and_then(|t| t.shortcut_command(action)) {
        chain.push(Strategy::new(
            STRATEGY_APP_SHORTCUT,
            ControlMethod::KeyboardShortcut,
            vec![Attempt::from_descriptor(&desc, SuccessCheck::NoError)],
        ));
    }

    if let Some(name) = app {
        let attempts = ScriptVariant::GENERIC.iter().map(|variant| {
            let desc = CommandDescriptor::new(Some(name), operation.clone(), *variant)
                .with_settle_delay(settle_delay_ms);
            Attempt::from_descriptor(&desc, SuccessCheck::Marker)
        });
        let attempts = distinct(attempts);
        chain.push(Strategy::new(
            STRATEGY_GENERIC,
            ControlMethod::GenericAutomation,
            attempts,
        ));
    }

    if status.has_accessibility {
        let attempts = ScriptVariant::ELEVATED
            .iter()
            .filter(|variant| app.is_some() || !variant.needs_app())
            .map(|variant| {
                let desc = CommandDescriptor::new(app, operation.clone(), *variant);
                Attempt::from_descriptor(&desc, SuccessCheck::Marker)
            });
        let attempts = distinct(attempts);
        chain.push(
            Strategy::new(
                STRATEGY_ACCESSIBILITY,
                ControlMethod::AccessibilityAutomation,
                attempts,
            )
            .elevated(),
        );
    }

    if let Some(chord) = KeyChord::global_for(action) {
        let desc = CommandDescriptor::new(None, Operation::Keystroke(chord), ScriptVariant::Keystroke);
        chain.push(Strategy::new(
            STRATEGY_KEYBOARD,
            ControlMethod::KeyboardShortcut,
            vec![Attempt::from_descriptor(&desc, SuccessCheck::NoError)],
        ));
    }

    chain
}

/// Drop attempts whose command repeats an earlier one. Minimize and
/// fullscreen render the same script for several variants.
fn distinct(attempts: impl Iterator<Item = Attempt>) -> Vec<Attempt> {
    let mut out: Vec<Attempt> = Vec::new();
    for attempt in attempts {
        if !out.iter().any(|seen| seen.command == attempt.command) {
            out.push(attempt);
        }
    }
    out
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
