//! Errors from loading extensions and registering their tools.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtensionError {
    /// Unregistering an id nothing holds.
    #[error("not registered: {0}")]
    NotFound(String),

    /// A second extension or tool claimed an id already in use.
    #[error("already registered: {0}")]
    AlreadyRegistered(String),

    #[error("extension initialization failed: {0}")]
    InitializationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_id() {
        assert_eq!(
            ExtensionError::AlreadyRegistered("window_control".into()).to_string(),
            "already registered: window_control"
        );
        assert_eq!(
            ExtensionError::NotFound("reminder_list".into()).to_string(),
            "not registered: reminder_list"
        );
    }

    #[test]
    fn test_initialization_failed_keeps_cause() {
        let err = ExtensionError::InitializationFailed("[window] config: unknown field".into());
        assert!(err.to_string().ends_with("[window] config: unknown field"));
    }
}
