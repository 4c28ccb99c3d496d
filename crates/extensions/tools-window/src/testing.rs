//! Test doubles shared by the unit tests.

use parking_lot::Mutex;

use crate::automation::{AutomationChannel, ChannelError, CommandOutput, ShellCommand};
use crate::screen::{ScreenError, ScreenGeometry, ScreenSize};

pub const FOREGROUND_PROBE: &str = "get name of (first application process";
pub const CAPABILITY_PROBE: &str = "get count of windows of (first application process";
pub const WINDOW_COUNT_PROBE: &str = "to count windows of process";
pub const KEYSTROKE: &str = "tell application \"System Events\" to key";
pub const DENIED: &str = "error: osascript is not allowed assistive access. (-1719)";

#[derive(Clone)]
enum Reply {
    Output(CommandOutput),
    Unreachable,
}

/// Scripted channel. Replies come from the first rule whose pattern is a
/// substring of the script; everything is recorded.
pub struct FakeChannel {
    rules: Vec<(String, Reply)>,
    default: Reply,
    calls: Mutex<Vec<ShellCommand>>,
}

impl FakeChannel {
    /// Every command prints an error.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            default: Reply::Output(CommandOutput::ok("error: no window (-1728)")),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// macOS environment with the given foreground app and capability.
    pub fn mac(front_app: &str, accessibility: bool) -> Self {
        let capability = if accessibility {
            CommandOutput::ok("success")
        } else {
            CommandOutput::ok(DENIED)
        };
        Self::new()
            .on(FOREGROUND_PROBE, CommandOutput::ok(format!("{}\n", front_app)))
            .on(CAPABILITY_PROBE, capability)
    }

    pub fn on(mut self, pattern: &str, output: CommandOutput) -> Self {
        self.rules.push((pattern.to_string(), Reply::Output(output)));
        self
    }

    pub fn unreachable_on(mut self, pattern: &str) -> Self {
        self.rules.push((pattern.to_string(), Reply::Unreachable));
        self
    }

    pub fn all_unreachable(mut self) -> Self {
        self.default = Reply::Unreachable;
        self
    }

    pub fn otherwise(mut self, output: CommandOutput) -> Self {
        self.default = Reply::Output(output);
        self
    }

    pub fn calls(&self) -> Vec<ShellCommand> {
        self.calls.lock().clone()
    }

    pub fn scripts(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .map(|c| c.script().to_string())
            .collect()
    }

    /// Number of recorded scripts containing `pattern`.
    pub fn count(&self, pattern: &str) -> usize {
        self.scripts().iter().filter(|s| s.contains(pattern)).count()
    }
}

impl AutomationChannel for FakeChannel {
    fn execute(&self, command: &ShellCommand) -> Result<CommandOutput, ChannelError> {
        self.calls.lock().push(command.clone());
        let script = command.script();
        let reply = self
            .rules
            .iter()
            .find(|(pattern, _)| script.contains(pattern.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.default.clone());

        match reply {
            Reply::Output(output) => Ok(output),
            Reply::Unreachable => Err(ChannelError::Unavailable(command.program.clone())),
        }
    }
}

/// Screen that can be made to fail.
pub struct FakeScreen(pub Option<ScreenSize>);

impl ScreenGeometry for FakeScreen {
    fn primary_screen(&self) -> Result<ScreenSize, ScreenError> {
        self.0.ok_or(ScreenError::NoDisplay)
    }
}
