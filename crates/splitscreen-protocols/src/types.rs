//! Small types shared by tools and extensions.

use serde::{Deserialize, Serialize};

/// Free-form key/value pairs attached to definitions and results.
pub type Metadata = std::collections::HashMap<String, serde_json::Value>;

/// How visible a tool's side effects are to the person at the desk.
///
/// Moving or resizing their window is `Medium`. Read-only diagnostics and
/// reminders are `Low`. The kernel logs `Medium` and above at info level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_order_by_impact() {
        assert_eq!(RiskLevel::default(), RiskLevel::Low);
        assert!(RiskLevel::Low < RiskLevel::Medium && RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_value(RiskLevel::Medium).unwrap(), "medium");
        let parsed: RiskLevel = serde_json::from_value(serde_json::json!("high")).unwrap();
        assert_eq!(parsed, RiskLevel::High);
    }
}
