//! The record of one executed interaction.

use crate::core::Action;

/// Immutable record of one `execute_action` call.
///
/// Holds its own copies of the states; nothing in it aliases the
/// environment's true state.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentOutcome<S> {
    previous_state: S,
    action: Action,
    resulting_state: S,
    reward: f64,
    terminated: bool,
}

impl<S> EnvironmentOutcome<S> {
    /// Create a new outcome.
    pub fn new(previous_state: S, action: Action, resulting_state: S, reward: f64, terminated: bool) -> Self {
        Self {
            previous_state,
            action,
            resulting_state,
            reward,
            terminated,
        }
    }

    /// State before the action.
    #[must_use]
    pub fn previous_state(&self) -> &S {
        &self.previous_state
    }

    /// The action that was taken.
    #[must_use]
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// State after the action.
    #[must_use]
    pub fn resulting_state(&self) -> &S {
        &self.resulting_state
    }

    /// Reward received.
    #[must_use]
    pub fn reward(&self) -> f64 {
        self.reward
    }

    /// Whether the resulting state is terminal.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminated
    }

    /// Split into `(previous_state, action, resulting_state)`.
    pub fn into_states(self) -> (S, Action, S) {
        (self.previous_state, self.action, self.resulting_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let outcome = EnvironmentOutcome::new(1, Action::new("inc"), 2, -1.0, false);

        assert_eq!(*outcome.previous_state(), 1);
        assert_eq!(outcome.action().name, "inc");
        assert_eq!(*outcome.resulting_state(), 2);
        assert_eq!(outcome.reward(), -1.0);
        assert!(!outcome.is_terminal());

        let (prev, action, next) = outcome.into_states();
        assert_eq!((prev, action.name.as_str(), next), (1, "inc", 2));
    }
}
