//! Automation channel: the single seam through which every OS command runs.
//!
//! Strategies, probes and the fixed-capability branch all hand a
//! [`ShellCommand`] to an [`AutomationChannel`] and read the captured output
//! back. Tests substitute a recording fake.

use std::fmt;
use std::process::Command;

use thiserror::Error;
use tracing::trace;

/// Substrings that identify a permission denial from the OS automation layer.
pub const DENIAL_SIGNATURES: &[&str] = &[
    "not allowed assistive access",
    "-1719",
    "-25211",
    "not authorized",
];

/// Marker printed by every generated script on success.
pub const SUCCESS_MARKER: &str = "success";

/// Errors raised when the channel itself cannot run a command.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Automation channel unavailable: {0}")]
    Unavailable(String),
}

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ShellCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `osascript -e <script>`
    pub fn osascript(script: impl Into<String>) -> Self {
        Self::new("osascript", vec!["-e".to_string(), script.into()])
    }

    /// `powershell -NoProfile -NonInteractive -Command <script>`
    pub fn powershell(script: impl Into<String>) -> Self {
        Self::new(
            "powershell",
            vec![
                "-NoProfile".to_string(),
                "-NonInteractive".to_string(),
                "-Command".to_string(),
                script.into(),
            ],
        )
    }

    /// `sh -c <script>`
    pub fn sh(script: impl Into<String>) -> Self {
        Self::new("sh", vec!["-c".to_string(), script.into()])
    }

    /// Script text carried by the command, if any.
    pub fn script(&self) -> &str {
        self.args.last().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg.replace('\n', " "))?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured result of a command that ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_ok: bool,
}

impl CommandOutput {
    /// Successful exit with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_ok: true,
        }
    }

    /// Failed exit with the given stderr.
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_ok: false,
        }
    }

    /// Classify this output. A non-zero exit is never a success, and the
    /// denial check covers stderr as well as stdout.
    pub fn interpret(&self, check: SuccessCheck) -> Outcome {
        if self.exit_ok {
            match interpret_result(&self.stdout, check) {
                Outcome::Failed(detail) if is_capability_denied(&self.stderr) => {
                    Outcome::Denied(join_detail(&detail, &self.stderr))
                }
                outcome => outcome,
            }
        } else {
            let detail = join_detail(self.stdout.trim(), self.stderr.trim());
            if is_capability_denied(&detail) {
                Outcome::Denied(detail)
            } else {
                Outcome::Failed(detail)
            }
        }
    }
}

fn join_detail(a: &str, b: &str) -> String {
    match (a.trim().is_empty(), b.trim().is_empty()) {
        (true, true) => "command failed without output".to_string(),
        (false, true) => a.trim().to_string(),
        (true, false) => b.trim().to_string(),
        (false, false) => format!("{}; {}", a.trim(), b.trim()),
    }
}

/// How success is read from stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessCheck {
    /// Stdout must carry the `success` marker on a line of its own.
    Marker,
    /// Stdout must not contain `error`. Used for keystroke strategies.
    NoError,
}

/// Classified result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Failure caused by a missing OS permission.
    Denied(String),
    Failed(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// The marker must stand on a line of its own. Error text echoing an app
/// name such as "SuccessBoard" does not count.
fn has_marker_line(text: &str) -> bool {
    text.lines()
        .any(|line| line.trim().eq_ignore_ascii_case(SUCCESS_MARKER))
}

/// Read a command's stdout according to `check`.
pub fn interpret_result(stdout: &str, check: SuccessCheck) -> Outcome {
    let text = stdout.trim();
    let lower = text.to_lowercase();

    let ok = match check {
        SuccessCheck::Marker => !lower.starts_with("error") && has_marker_line(text),
        SuccessCheck::NoError => !lower.contains("error"),
    };
    if ok {
        return Outcome::Success;
    }

    let detail = if text.is_empty() {
        "no success marker in output".to_string()
    } else {
        text.to_string()
    };
    if is_capability_denied(text) {
        Outcome::Denied(detail)
    } else {
        Outcome::Failed(detail)
    }
}

/// Whether `text` carries one of the known permission-denial signatures.
pub fn is_capability_denied(text: &str) -> bool {
    let lower = text.to_lowercase();
    DENIAL_SIGNATURES.iter().any(|sig| lower.contains(sig))
}

/// Executes shell commands on behalf of the dispatcher.
pub trait AutomationChannel: Send + Sync {
    /// Run `command` to completion. `Err` only when the command could not be
    /// run at all; a command that ran and failed is an `Ok` with `exit_ok`
    /// false.
    fn execute(&self, command: &ShellCommand) -> Result<CommandOutput, ChannelError>;
}

/// Channel backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellChannel;

impl ShellChannel {
    pub fn new() -> Self {
        Self
    }
}

impl AutomationChannel for ShellChannel {
    fn execute(&self, command: &ShellCommand) -> Result<CommandOutput, ChannelError> {
        trace!("exec: {}", command);
        let output = Command::new(&command.program)
            .args(&command.args)
            .output()
            .map_err(|source| ChannelError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_ok: output.status.success(),
        })
    }
}

#[cfg(test)]
#[path = "automation_tests.rs"]
mod tests;
