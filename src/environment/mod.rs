//! Environments an agent interacts with.
//!
//! ## Environment
//!
//! The interaction surface: observe, act, read the last reward, ask
//! whether the episode is over, and reset.
//!
//! ## SimulatedEnvironment
//!
//! Drives a transition model, reward function, and terminal predicate.
//! Callers and observers only ever see copies of its true state.
//!
//! ## Threading
//!
//! Everything here is single-threaded and synchronous. An environment
//! instance must be confined to one thread of control; observer callbacks
//! run inline and block the operation that triggered them.

pub mod outcome;
pub mod observer;
pub mod simulated;

pub use outcome::EnvironmentOutcome;
pub use observer::{EnvironmentObserver, ObserverHandle, ObserverRegistry};
pub use simulated::SimulatedEnvironment;

use crate::core::Action;
use crate::error::Result;

/// An environment an agent can act in.
pub trait Environment<S> {
    /// A copy of the current state, or `None` if no state exists yet.
    fn current_observation(&self) -> Option<S>;

    /// Execute an action and report what happened.
    fn execute_action(&mut self, action: &Action) -> Result<EnvironmentOutcome<S>>;

    /// Reward from the most recent executed action (0 after a reset).
    fn last_reward(&self) -> f64;

    /// Whether the current state is terminal. `false` with no state.
    fn is_in_terminal_state(&self) -> bool;

    /// Replace the current state with a freshly generated one.
    fn reset_environment(&mut self) -> Result<()>;
}

/// An environment whose current state can be forced.
pub trait StateSettableEnvironment<S>: Environment<S> {
    /// Force the current state to `state`.
    fn set_cur_state_to(&mut self, state: S);
}
