//! A strategy is plain data: a named, ordered list of command attempts.

use serde::Serialize;
use tracing::debug;

use crate::automation::{AutomationChannel, Outcome, ShellCommand, SuccessCheck};

use super::command::CommandDescriptor;
use super::serializer;
use super::window_types::ControlMethod;

/// One rendered command plus how to read its result.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub label: String,
    pub command: ShellCommand,
    pub check: SuccessCheck,
}

impl Attempt {
    pub fn from_descriptor(desc: &CommandDescriptor, check: SuccessCheck) -> Self {
        Self {
            label: desc.variant.as_str().to_string(),
            command: serializer::render(desc),
            check,
        }
    }
}

/// One mechanism for achieving the requested effect.
#[derive(Debug, Clone)]
pub struct Strategy {
    pub name: String,
    pub method: ControlMethod,
    pub requires_elevation: bool,
    pub attempts: Vec<Attempt>,
}

/// Summary of a strategy for listings and diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct StrategySummary {
    pub name: String,
    pub method: ControlMethod,
    pub requires_elevation: bool,
    pub attempts: Vec<String>,
}

impl Strategy {
    pub fn new(name: impl Into<String>, method: ControlMethod, attempts: Vec<Attempt>) -> Self {
        Self {
            name: name.into(),
            method,
            requires_elevation: false,
            attempts,
        }
    }

    pub fn elevated(mut self) -> Self {
        self.requires_elevation = true;
        self
    }

    /// Run attempts in order. Stops at the first success or the first
    /// capability denial; other failures fall through to the next attempt.
    pub fn execute(&self, channel: &dyn AutomationChannel) -> Outcome {
        let mut last_failure = String::from("no attempts");

        for attempt in &self.attempts {
            debug!("strategy {} attempt {}", self.name, attempt.label);
            let outcome = match channel.execute(&attempt.command) {
                Ok(output) => output.interpret(attempt.check),
                Err(e) => Outcome::Failed(e.to_string()),
            };

            match outcome {
                Outcome::Success => return Outcome::Success,
                Outcome::Denied(detail) => return Outcome::Denied(detail),
                Outcome::Failed(detail) => {
                    debug!("strategy {} attempt {} failed: {}", self.name, attempt.label, detail);
                    last_failure = format!("{}: {}", attempt.label, detail);
                }
            }
        }

        Outcome::Failed(last_failure)
    }

    pub fn summary(&self) -> StrategySummary {
        StrategySummary {
            name: self.name.clone(),
            method: self.method,
            requires_elevation: self.requires_elevation,
            attempts: self.attempts.iter().map(|a| a.label.clone()).collect(),
        }
    }
}
