//! Configuration validation.

use crate::schema::Config;

const KNOWN_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
const KNOWN_CHANNELS: &[&str] = &["desktop", "log"];

/// One problem with the loaded config, keyed by its dotted TOML path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Errors stop startup; warnings are only logged.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigIssue>,
    pub warnings: Vec<ConfigIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigIssue {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Checks a loaded [`Config`] for values serde accepts but the server cannot use.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        if config.server.name.trim().is_empty() {
            result.error("server.name", "Name cannot be empty");
        }

        // Anything with '=' or ',' is an EnvFilter directive list; leave it to the subscriber.
        let level = config.logging.level.to_lowercase();
        if !level.contains(['=', ',']) && !KNOWN_LEVELS.contains(&level.as_str()) {
            result.warn(
                "logging.level",
                format!("Unknown level '{}', falling back to info", config.logging.level),
            );
        }

        Self::check_window(config, &mut result);
        Self::check_reminder(config, &mut result);
        result
    }

    fn check_window(config: &Config, result: &mut ValidationResult) {
        let window = &config.window;

        if window.command_timeout_ms == 0 {
            result.error("window.command_timeout_ms", "command_timeout_ms must be greater than 0");
        } else if window.settle_delay_ms >= window.command_timeout_ms {
            result.warn(
                "window.settle_delay_ms",
                "settle_delay_ms is not smaller than command_timeout_ms",
            );
        }
        if window.settle_delay_ms > 5_000 {
            result.warn(
                "window.settle_delay_ms",
                "settle_delay_ms is above 5s, position-then-size attempts will feel stuck",
            );
        }

        for (i, target) in window.targets.iter().enumerate() {
            if target.name.trim().is_empty() {
                result.error(format!("window.targets[{}].name", i), "Target name cannot be empty");
            }
            let aliases = format!("window.targets[{}].aliases", i);
            if target.aliases.is_empty() {
                result.warn(aliases, "No aliases given, the target name will be used as its only alias");
            } else if target.aliases.iter().any(|a| a.trim().is_empty()) {
                result.error(aliases, "Aliases cannot be blank");
            }
        }
    }

    fn check_reminder(config: &Config, result: &mut ValidationResult) {
        let reminder = &config.reminder;

        if reminder.max_repeat == 0 {
            result.error("reminder.max_repeat", "max_repeat must be greater than 0");
        }
        if reminder.min_interval_secs == 0 {
            result.error("reminder.min_interval_secs", "min_interval_secs must be greater than 0");
        }
        if !KNOWN_CHANNELS.contains(&reminder.channel.as_str()) {
            result.error(
                "reminder.channel",
                format!("Unknown channel '{}', expected desktop or log", reminder.channel),
            );
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
