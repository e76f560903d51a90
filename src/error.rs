//! Error types for environment operations.
//!
//! Every failure is surfaced synchronously to the caller of the operation
//! that triggered it. Nothing is retried or recovered internally.

use std::fmt;

use thiserror::Error;

/// Boxed error used at the seams to external collaborators
/// (transition dynamics, observers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which observer notification was in progress when an observer failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObserverEvent {
    /// `on_action_initiation`, before the transition is computed.
    Initiation,
    /// `on_interaction`, after the transition is committed.
    Interaction,
    /// `on_reset`, after a new state has been generated.
    Reset,
}

impl fmt::Display for ObserverEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObserverEvent::Initiation => "action initiation",
            ObserverEvent::Interaction => "interaction",
            ObserverEvent::Reset => "reset",
        };
        f.write_str(name)
    }
}

/// Errors raised by a simulated environment.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The requested action name has no entry in the domain's catalog.
    /// Raised before any mutation or notification.
    #[error("cannot execute action `{action}`: the action is not known in this environment's domain")]
    ActionNotFound { action: String },

    /// `reset_environment` was called with no state generator bound.
    #[error("cannot reset environment: no state generator is bound")]
    ResetWithoutGenerator,

    /// An action was executed before any current state existed.
    #[error("environment has no current state; set one or reset with a generator first")]
    Uninitialized,

    /// An observer callback failed. Remaining observers for the same
    /// event were not notified.
    #[error("observer failed during {event} notification")]
    Observer {
        event: ObserverEvent,
        #[source]
        source: BoxError,
    },

    /// The transition model failed while computing the next state.
    #[error(transparent)]
    Transition(BoxError),
}

impl EnvError {
    /// Check if this is an unknown-action error.
    #[must_use]
    pub fn is_action_not_found(&self) -> bool {
        matches!(self, EnvError::ActionNotFound { .. })
    }
}

/// Convenience alias for results using [`EnvError`].
pub type Result<T> = std::result::Result<T, EnvError>;
