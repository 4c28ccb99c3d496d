//! Strategy executor.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::automation::{AutomationChannel, Outcome};

use super::fallback;
use super::serializer;
use super::strategy::Strategy;
use super::window_types::{ControlResult, PermissionStatus, WindowAction};

/// One-shot advisory elevation request.
#[derive(Debug)]
pub struct ElevationGate {
    enabled: bool,
    requested: AtomicBool,
}

impl ElevationGate {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            requested: AtomicBool::new(false),
        }
    }

    pub fn was_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }

    /// Open the Accessibility pane the first time this is called.
    /// Returns whether a request was issued.
    pub fn request_once(&self, channel: &dyn AutomationChannel) -> bool {
        if !self.enabled || self.requested.swap(true, Ordering::Relaxed) {
            return false;
        }
        info!("Requesting Accessibility access");
        if let Err(e) = channel.execute(&serializer::open_accessibility_pane()) {
            warn!("Could not open the Accessibility settings pane: {}", e);
        }
        true
    }
}

pub struct StrategyExecutor<'a> {
    channel: &'a dyn AutomationChannel,
    elevation: &'a ElevationGate,
}

impl<'a> StrategyExecutor<'a> {
    pub fn new(channel: &'a dyn AutomationChannel, elevation: &'a ElevationGate) -> Self {
        Self { channel, elevation }
    }

    /// Run `chain` in order until one strategy succeeds.
    ///
    /// A capability denial drops the remaining elevated strategies and fires
    /// the elevation request. Exhaustion hands over to the fallback reporter.
    pub fn run(
        &self,
        chain: Vec<Strategy>,
        action: WindowAction,
        status: &PermissionStatus,
    ) -> ControlResult {
        let mut attempted = Vec::with_capacity(chain.len());
        let mut last_error = None;
        let mut denied = false;

        for strategy in chain {
            if denied && strategy.requires_elevation {
                debug!("skipping {}: capability denied earlier", strategy.name);
                continue;
            }

            debug!("trying strategy {} ({})", strategy.name, strategy.method);
            attempted.push(strategy.name.clone());

            match strategy.execute(self.channel) {
                Outcome::Success => {
                    info!("{} succeeded via {}", action, strategy.name);
                    return ControlResult::succeeded(
                        strategy.method,
                        format!("{} applied via {}", action, strategy.method),
                        attempted,
                    );
                }
                Outcome::Denied(detail) => {
                    warn!("strategy {} denied: {}", strategy.name, detail);
                    denied = true;
                    self.elevation.request_once(self.channel);
                    last_error = Some(detail);
                }
                Outcome::Failed(detail) => {
                    debug!("strategy {} failed: {}", strategy.name, detail);
                    last_error = Some(detail);
                }
            }
        }

        warn!("all strategies exhausted for {}", action);
        fallback::report(action, status, last_error, attempted)
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
