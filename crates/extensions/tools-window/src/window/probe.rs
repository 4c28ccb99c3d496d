//! Environment probe: foreground app and capability state.

use tracing::{debug, warn};

use crate::automation::{AutomationChannel, Outcome, SuccessCheck, is_capability_denied};

use super::registry::{Target, TargetRegistry};
use super::serializer;
use super::window_types::{ControlTier, PermissionStatus, ProbeError};

/// Whether the target's direct recipe can run with the current grant.
fn usable_direct(target: &Target, elevated: bool) -> bool {
    target
        .direct
        .is_some_and(|recipe| elevated || !recipe.needs_elevation())
}

pub struct EnvironmentProbe<'a> {
    channel: &'a dyn AutomationChannel,
    registry: &'a TargetRegistry,
}

impl<'a> EnvironmentProbe<'a> {
    pub fn new(channel: &'a dyn AutomationChannel, registry: &'a TargetRegistry) -> Self {
        Self { channel, registry }
    }

    /// Name of the frontmost application process.
    pub fn foreground_target(&self) -> Result<String, ProbeError> {
        let output = self.channel.execute(&serializer::foreground_probe())?;
        let name = output.stdout.trim();
        if !output.exit_ok || name.is_empty() {
            let detail = if output.stderr.trim().is_empty() {
                "empty response".to_string()
            } else {
                output.stderr.trim().to_string()
            };
            return Err(ProbeError::NoForeground(detail));
        }
        Ok(name.to_string())
    }

    /// Whether the elevated capability is granted.
    ///
    /// Only a recognised denial answers `false`; any other script failure is
    /// read optimistically as granted. An unreachable channel is `false`.
    pub fn has_elevated_capability(&self) -> bool {
        match self.channel.execute(&serializer::capability_probe()) {
            Ok(output) => match output.interpret(SuccessCheck::Marker) {
                Outcome::Success => true,
                Outcome::Denied(detail) => {
                    debug!("capability probe denied: {}", detail);
                    false
                }
                Outcome::Failed(detail) => {
                    debug!("capability probe inconclusive, assuming granted: {}", detail);
                    true
                }
            },
            Err(e) => {
                warn!("capability probe could not run: {}", e);
                false
            }
        }
    }

    /// Whether `process` can be driven at all right now.
    pub fn can_control_target(&self, process: &str, target: Option<&Target>, elevated: bool) -> bool {
        if target.is_some_and(|t| usable_direct(t, elevated)) {
            return true;
        }
        if !elevated {
            return false;
        }
        match self.channel.execute(&serializer::window_count_probe(process)) {
            Ok(output) => {
                output.exit_ok
                    && !is_capability_denied(&output.stdout)
                    && output.stdout.trim().parse::<u32>().is_ok()
            }
            Err(_) => false,
        }
    }

    /// Compose a fresh status snapshot. Never fails.
    pub fn status(&self) -> PermissionStatus {
        let current_app = match self.foreground_target() {
            Ok(name) => Some(name),
            Err(e) => {
                warn!("foreground probe failed: {}", e);
                None
            }
        };
        let has_accessibility = self.has_elevated_capability();
        let target = current_app.as_deref().and_then(|name| self.registry.lookup(name));
        let has_app_specific_support = target.is_some_and(|t| usable_direct(t, has_accessibility));
        let can_control_current_app = current_app
            .as_deref()
            .is_some_and(|name| self.can_control_target(name, target, has_accessibility));

        let control_tier = if has_app_specific_support {
            ControlTier::AppSpecific
        } else if has_accessibility {
            ControlTier::Accessibility
        } else if current_app.is_some() {
            ControlTier::Automation
        } else {
            ControlTier::ShortcutOnly
        };

        let suggestions = self.suggestions(
            current_app.as_deref(),
            has_accessibility,
            has_app_specific_support,
            can_control_current_app,
        );

        PermissionStatus {
            has_accessibility,
            can_control_current_app,
            current_app,
            has_app_specific_support,
            control_tier,
            suggestions,
        }
    }

    fn suggestions(
        &self,
        current_app: Option<&str>,
        has_accessibility: bool,
        has_app_specific_support: bool,
        can_control: bool,
    ) -> Vec<String> {
        let mut out = Vec::new();

        if !has_accessibility {
            out.push(
                "Grant Accessibility access in System Settings > Privacy & Security > Accessibility \
                 to the app running this server (your terminal or MCP host), then restart it"
                    .to_string(),
            );
        }

        match current_app {
            None => out.push(
                "Could not determine the foreground application; click the window you want to arrange first"
                    .to_string(),
            ),
            Some(app) if !can_control => out.push(format!(
                "{} cannot be arranged automatically right now",
                app
            )),
            _ => {}
        }

        if !has_app_specific_support {
            let names = self.registry.direct_target_names();
            if !names.is_empty() {
                out.push(format!(
                    "These applications work without extra permissions: {}",
                    names.join(", ")
                ));
            }
        }

        out
    }
}
