//! Environment configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a [`SimulatedEnvironment`](crate::environment::SimulatedEnvironment).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Label attached to log records (default: "simulated").
    pub name: String,

    /// Compute real transitions even from terminal states (default: false).
    /// When false, actions from a terminal state return the unchanged state
    /// with zero reward until the state is reset or forced.
    pub allow_action_from_terminal_states: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            name: "simulated".to_string(),
            allow_action_from_terminal_states: false,
        }
    }
}

impl EnvironmentConfig {
    /// Set the log label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set whether actions are carried out from terminal states.
    #[must_use]
    pub fn with_allow_action_from_terminal_states(mut self, allow: bool) -> Self {
        self.allow_action_from_terminal_states = allow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EnvironmentConfig::default();
        assert_eq!(config.name, "simulated");
        assert!(!config.allow_action_from_terminal_states);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EnvironmentConfig::default()
            .with_name("gridworld")
            .with_allow_action_from_terminal_states(true);

        assert_eq!(config.name, "gridworld");
        assert!(config.allow_action_from_terminal_states);
    }

    #[test]
    fn test_serialization() {
        let config = EnvironmentConfig::default().with_name("line");
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EnvironmentConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
