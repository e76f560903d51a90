//! Capabilities the environment consumes.
//!
//! Domains implement these to define:
//! - Which actions exist and how they change state
//! - What each transition is worth
//! - Which states end an episode
//! - Where initial states come from
//!
//! The environment calls into these but never interprets a state itself.

pub mod transition;
pub mod task;
pub mod generator;

pub use transition::{ActionType, Domain, FnActionType, ResolvedAction, TransitionModel};
pub use task::{GoalBasedReward, NullTermination, RewardFunction, TerminalPredicate};
pub use generator::{ConstantStateGenerator, SampledStateGenerator, StateGenerator};
