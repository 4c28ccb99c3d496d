//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub reminder: ReminderConfig,
}

/// MCP server identity reported during `initialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_name")]
    pub name: String,

    #[serde(default = "default_protocol_version")]
    pub protocol_version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            protocol_version: default_protocol_version(),
        }
    }
}

fn default_server_name() -> String {
    "splitscreen".to_string()
}

fn default_protocol_version() -> String {
    "2024-11-05".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily rolling log files. No file logging when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Window control configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Outer timeout for one whole control request.
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,

    /// Pause between the position and size steps of the position-then-size
    /// script variant.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Open the Accessibility privacy pane the first time a denial is seen.
    #[serde(default = "default_true")]
    pub request_elevation: bool,

    /// Extra targets appended after the built-in registry.
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            command_timeout_ms: default_command_timeout_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            request_elevation: true,
            targets: Vec::new(),
        }
    }
}

fn default_command_timeout_ms() -> u64 {
    15_000
}

fn default_settle_delay_ms() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

/// A user-declared target application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub name: String,

    #[serde(default)]
    pub aliases: Vec<String>,

    /// Whether the application answers `set bounds of front window`.
    #[serde(default = "default_true")]
    pub scriptable: bool,
}

/// Reminder scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Upper bound on the repeat count of a single reminder.
    #[serde(default = "default_max_repeat")]
    pub max_repeat: u32,

    #[serde(default = "default_min_interval_secs")]
    pub min_interval_secs: u64,

    /// Delivery channel: `desktop` or `log`.
    #[serde(default = "default_channel")]
    pub channel: String,

    #[serde(default = "default_title")]
    pub default_title: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            max_repeat: default_max_repeat(),
            min_interval_secs: default_min_interval_secs(),
            channel: default_channel(),
            default_title: default_title(),
        }
    }
}

fn default_max_repeat() -> u32 {
    100
}

fn default_min_interval_secs() -> u64 {
    1
}

fn default_channel() -> String {
    "desktop".to_string()
}

fn default_title() -> String {
    "Reminder".to_string()
}
