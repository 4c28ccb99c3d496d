//! Split-screen window control.
//!
//! Probes the environment, builds a priority-ordered strategy chain and runs
//! it until one strategy works. When nothing works the caller gets manual
//! instructions instead of an error.

mod chain;
mod command;
mod controller;
mod executor;
mod fallback;
mod fixed;
mod probe;
mod registry;
mod serializer;
mod strategy;
mod window_types;

pub use chain::build_chain;
pub use command::{CommandDescriptor, Key, KeyChord, Modifier, Operation, ScriptVariant};
pub use controller::{ControllerSettings, UniversalController};
pub use executor::{ElevationGate, StrategyExecutor};
pub use fallback::instruction;
pub use probe::EnvironmentProbe;
pub use registry::{DirectRecipe, ShortcutRecipe, Target, TargetRegistry};
pub use serializer::{ACCESSIBILITY_PANE_URL, escape_applescript};
pub use strategy::{Attempt, Strategy, StrategySummary};
pub use window_types::{
    ControlMethod, ControlResult, ControlTier, PermissionStatus, Platform, ProbeError,
    WindowAction, WindowBounds, WindowError,
};

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
