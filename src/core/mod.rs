//! Core value types: actions, states, RNG, configuration.
//!
//! These are the building blocks every domain shares. Domains supply their
//! own state types; `VariableState` is there when a map of integers will do.

pub mod action;
pub mod state;
pub mod rng;
pub mod config;

pub use action::Action;
pub use state::{State, VariableState};
pub use rng::SimRng;
pub use config::EnvironmentConfig;
