//! Reminder delivery channels.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use splitscreen_protocols::script::escape_applescript;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Notification failed: {0}")]
    Failed(String),

    #[error("Unsupported notification channel: {0}")]
    UnsupportedChannel(String),

    #[error("Desktop notifications not supported on {0}")]
    UnsupportedPlatform(String),
}

/// Delivers one reminder.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Channel name reported in logs and tool output.
    fn channel(&self) -> &'static str;

    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError>;
}

/// Build the notifier for a configured channel name.
pub fn notifier_for(channel: &str) -> Result<Arc<dyn Notifier>, NotifyError> {
    match channel {
        "desktop" => Ok(Arc::new(DesktopNotifier::new())),
        "log" => Ok(Arc::new(LogNotifier)),
        other => Err(NotifyError::UnsupportedChannel(other.to_string())),
    }
}

/// Writes reminders to the log.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn channel(&self) -> &'static str {
        "log"
    }

    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        info!("[Reminder] {}: {}", title, message);
        Ok(())
    }
}

/// Native desktop notification for the host OS.
pub struct DesktopNotifier {
    os: &'static str,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self {
            os: std::env::consts::OS,
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    fn channel(&self) -> &'static str {
        "desktop"
    }

    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let (program, args) = desktop_command(self.os, title, message)
            .ok_or_else(|| NotifyError::UnsupportedPlatform(self.os.to_string()))?;
        debug!("Desktop notification via {}", program);

        let output = tokio::process::Command::new(program)
            .args(&args)
            .output()
            .await
            .map_err(|source| NotifyError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(NotifyError::Failed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }
}

/// Program and arguments that raise a desktop notification on `os`.
pub fn desktop_command(os: &str, title: &str, message: &str) -> Option<(&'static str, Vec<String>)> {
    match os {
        "macos" => {
            let script = format!(
                "display notification \"{}\" with title \"{}\"",
                escape_applescript(message),
                escape_applescript(title)
            );
            Some(("osascript", vec!["-e".to_string(), script]))
        }
        "linux" => Some(("notify-send", vec![title.to_string(), message.to_string()])),
        "windows" => {
            let script = format!(
                "Add-Type -AssemblyName System.Windows.Forms; \
                 $n = New-Object System.Windows.Forms.NotifyIcon; \
                 $n.Icon = [System.Drawing.SystemIcons]::Information; \
                 $n.Visible = $true; \
                 $n.ShowBalloonTip(5000, '{}', '{}', 'Info'); \
                 Start-Sleep -Seconds 5; $n.Dispose()",
                title.replace('\'', "''"),
                message.replace('\'', "''")
            );
            Some((
                "powershell",
                vec![
                    "-NoProfile".to_string(),
                    "-NonInteractive".to_string(),
                    "-Command".to_string(),
                    script,
                ],
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifier_for_channels() {
        assert_eq!(notifier_for("log").unwrap().channel(), "log");
        assert_eq!(notifier_for("desktop").unwrap().channel(), "desktop");
        assert!(matches!(
            notifier_for("pager"),
            Err(NotifyError::UnsupportedChannel(c)) if c == "pager"
        ));
    }

    #[test]
    fn test_macos_command_escapes_quotes() {
        let (program, args) = desktop_command("macos", "Stand \"up\"", "C:\\ break").unwrap();
        assert_eq!(program, "osascript");
        assert_eq!(args[0], "-e");
        assert_eq!(
            args[1],
            "display notification \"C:\\\\ break\" with title \"Stand \\\"up\\\"\""
        );
    }

    #[test]
    fn test_macos_command_flattens_newlines() {
        let (_, args) = desktop_command("macos", "Break", "stretch\n\" & beep & \"").unwrap();
        assert_eq!(
            args[1],
            "display notification \"stretch \\\" & beep & \\\"\" with title \"Break\""
        );
    }

    #[test]
    fn test_linux_command() {
        let (program, args) = desktop_command("linux", "Break", "Look away").unwrap();
        assert_eq!(program, "notify-send");
        assert_eq!(args, vec!["Break", "Look away"]);
    }

    #[test]
    fn test_windows_command_doubles_single_quotes() {
        let (program, args) = desktop_command("windows", "It's time", "Break").unwrap();
        assert_eq!(program, "powershell");
        assert!(args.last().unwrap().contains("ShowBalloonTip(5000, 'It''s time', 'Break'"));
    }

    #[test]
    fn test_unknown_os_has_no_command() {
        assert!(desktop_command("haiku", "t", "m").is_none());
    }

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        assert!(LogNotifier.notify("Title", "Message").await.is_ok());
    }

    #[tokio::test]
    async fn test_desktop_notifier_unsupported_platform() {
        let notifier = DesktopNotifier { os: "haiku" };
        let err = notifier.notify("t", "m").await.unwrap_err();
        assert!(matches!(err, NotifyError::UnsupportedPlatform(os) if os == "haiku"));
    }
}
