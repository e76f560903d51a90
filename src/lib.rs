//! # sim-env
//!
//! A simulated interaction environment for single-agent reinforcement
//! learning.
//!
//! An agent applies actions, observes resulting states and rewards, and
//! detects terminal conditions. The environment owns the true state and
//! only ever hands out copies.
//!
//! ## Design Principles
//!
//! 1. **Capabilities, not hierarchies**: transition model, reward function,
//!    terminal predicate, state generator, and observers are each a narrow
//!    trait. Closures work for most of them.
//!
//! 2. **Copy on read**: observations, outcomes, and observer arguments are
//!    independent copies. Internal commits move the next state in.
//!
//! 3. **Fixed ordering**: resolve, notify initiation, compute, commit,
//!    notify interaction. Failures stop the sequence where they happen.
//!
//! ## Modules
//!
//! - `core`: Actions, states, RNG, configuration
//! - `model`: Transition models, rewards, terminal predicates, generators
//! - `environment`: The `Environment` traits, observers, and `SimulatedEnvironment`
//! - `domains`: Reference domains
//! - `error`: `EnvError`

pub mod core;
pub mod model;
pub mod environment;
pub mod domains;
pub mod error;

// Re-export commonly used types
pub use crate::core::{Action, EnvironmentConfig, SimRng, State, VariableState};

pub use crate::model::{
    ActionType, Domain, FnActionType, ResolvedAction, TransitionModel,
    RewardFunction, TerminalPredicate, GoalBasedReward, NullTermination,
    StateGenerator, ConstantStateGenerator, SampledStateGenerator,
};

pub use crate::environment::{
    Environment, StateSettableEnvironment, SimulatedEnvironment,
    EnvironmentOutcome, EnvironmentObserver, ObserverHandle, ObserverRegistry,
};

pub use crate::error::{BoxError, EnvError, ObserverEvent, Result};
