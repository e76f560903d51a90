//! Action requests: name + parameters.
//!
//! An `Action` is what a caller asks the environment to do. It is only a
//! request: the environment resolves its name against the domain's action
//! catalog before anything executes. For example:
//! - "forward" = name only, no parameters
//! - "jump(3)" = name + 1 parameter
//!
//! Domains define which names exist. The environment doesn't interpret
//! parameters; it hands them to the resolved action type.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A grounded action request.
///
/// ## Example
///
/// ```
/// use sim_env::core::Action;
///
/// let forward = Action::new("forward");
/// assert!(forward.is_no_arg());
///
/// let jump = Action::with_params("jump", &["3"]);
/// assert_eq!(jump.to_string(), "jump(3)");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// Name used to look the action up in a domain's catalog.
    pub name: String,

    /// Ordered parameters.
    /// SmallVec keeps the common 0-2 parameter case off the heap.
    pub params: SmallVec<[String; 2]>,
}

impl Action {
    /// Create an action with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: SmallVec::new(),
        }
    }

    /// Create an action with the given parameters.
    #[must_use]
    pub fn with_params(name: impl Into<String>, params: &[&str]) -> Self {
        Self {
            name: name.into(),
            params: params.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    /// Append a parameter.
    pub fn push_param(&mut self, param: impl Into<String>) {
        self.params.push(param.into());
    }

    /// Get the number of parameters.
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Check if this action has no parameters.
    #[must_use]
    pub fn is_no_arg(&self) -> bool {
        self.params.is_empty()
    }

    /// Get a parameter by position.
    #[must_use]
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.params.is_empty() {
            write!(f, "({})", self.params.join(", "))?;
        }
        Ok(())
    }
}
