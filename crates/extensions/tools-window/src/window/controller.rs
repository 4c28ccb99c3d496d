//! Universal window controller.

use std::sync::Arc;

use tracing::debug;

use crate::automation::AutomationChannel;

use super::chain::build_chain;
use super::executor::{ElevationGate, StrategyExecutor};
use super::fixed;
use super::probe::EnvironmentProbe;
use super::registry::TargetRegistry;
use super::strategy::StrategySummary;
use super::window_types::{ControlResult, PermissionStatus, Platform, WindowAction, WindowBounds};

/// Tunables for the dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct ControllerSettings {
    pub settle_delay_ms: u64,
    pub request_elevation: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: 100,
            request_elevation: true,
        }
    }
}

/// Front door of the dispatcher. All methods are blocking.
pub struct UniversalController {
    platform: Platform,
    channel: Arc<dyn AutomationChannel>,
    registry: Arc<TargetRegistry>,
    settings: ControllerSettings,
    elevation: ElevationGate,
}

impl UniversalController {
    pub fn new(
        platform: Platform,
        channel: Arc<dyn AutomationChannel>,
        registry: Arc<TargetRegistry>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            platform,
            channel,
            registry,
            settings,
            elevation: ElevationGate::new(settings.request_elevation),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// Whether the one-shot elevation request already fired.
    pub fn elevation_requested(&self) -> bool {
        self.elevation.was_requested()
    }

    /// Probe, build the chain, and run it. Never fails: exhaustion yields a
    /// manual-instruction result.
    pub fn control_window(&self, action: WindowAction, bounds: WindowBounds) -> ControlResult {
        if self.platform.is_fixed_capability() {
            return fixed::control(self.channel.as_ref(), self.platform, action, bounds);
        }

        let probe = EnvironmentProbe::new(self.channel.as_ref(), &self.registry);
        let status = probe.status();
        let target = status
            .current_app
            .as_deref()
            .and_then(|name| self.registry.lookup(name));
        debug!(
            "control {} app={:?} target={:?} tier={:?}",
            action,
            status.current_app,
            target.map(|t| t.name.as_str()),
            status.control_tier
        );

        let chain = build_chain(&status, action, bounds, target, self.settings.settle_delay_ms);
        StrategyExecutor::new(self.channel.as_ref(), &self.elevation).run(chain, action, &status)
    }

    /// Fresh permission snapshot.
    pub fn permission_status(&self) -> PermissionStatus {
        if self.platform.is_fixed_capability() {
            return fixed::status(self.platform);
        }
        EnvironmentProbe::new(self.channel.as_ref(), &self.registry).status()
    }

    /// The chain `control_window` would run right now, without running it.
    pub fn plan(&self, action: WindowAction, bounds: WindowBounds) -> Vec<StrategySummary> {
        if self.platform.is_fixed_capability() {
            return Vec::new();
        }
        let status = self.permission_status();
        let target = status
            .current_app
            .as_deref()
            .and_then(|name| self.registry.lookup(name));
        build_chain(&status, action, bounds, target, self.settings.settle_delay_ms)
            .iter()
            .map(|s| s.summary())
            .collect()
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
