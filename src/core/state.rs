//! Environment states.
//!
//! ## State
//!
//! The environment never looks inside a state. All it needs is a deep,
//! independent copy, which in Rust is `Clone`. Any `Clone + Debug` value
//! is a state.
//!
//! ## VariableState
//!
//! A ready-made state of named `i64` variables. Uses `im` persistent maps
//! so copies are O(1) and never alias: writing to a copy leaves the
//! original untouched.

use std::fmt::Debug;

use im::OrdMap;

/// A value the environment can hold as its true state.
///
/// `Clone` must produce a structurally independent copy. Copies handed to
/// callers and observers rely on this.
pub trait State: Clone + Debug {}

impl<T: Clone + Debug> State for T {}

/// State made of named integer variables.
///
/// ## Values (i64 only)
///
/// To store non-integer values:
/// - Booleans: use 0/1
/// - Enums: use discriminant values
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VariableState {
    vars: OrdMap<String, i64>,
}

impl VariableState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: i64) -> Self {
        self.set(key, value);
        self
    }

    /// Get a variable with default.
    #[must_use]
    pub fn get(&self, key: &str, default: i64) -> i64 {
        self.vars.get(key).copied().unwrap_or(default)
    }

    /// Set a variable.
    pub fn set(&mut self, key: impl Into<String>, value: i64) {
        self.vars.insert(key.into(), value);
    }

    /// Modify a variable by delta. Missing variables start at 0.
    ///
    /// Saturates at `i64::MIN`/`i64::MAX` instead of overflowing.
    pub fn modify(&mut self, key: &str, delta: i64) {
        let current = self.get(key, 0);
        self.vars.insert(key.to_string(), current.saturating_add(delta));
    }

    /// Check if a variable is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if there are no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_state<S: State>(_: &S) {}

    #[test]
    fn test_get_set_modify() {
        let mut state = VariableState::new().with("x", 3);

        assert_eq!(state.get("x", 0), 3);
        assert_eq!(state.get("y", -1), -1);

        state.set("y", 7);
        state.modify("x", -5);
        state.modify("z", 2);

        assert_eq!(state.get("x", 0), -2);
        assert_eq!(state.get("y", 0), 7);
        assert_eq!(state.get("z", 0), 2);
        assert_eq!(state.len(), 3);
        assert!(state.contains("z"));
    }

    #[test]
    fn test_modify_saturates() {
        let mut state = VariableState::new().with("hi", i64::MAX - 1).with("lo", i64::MIN + 1);

        state.modify("hi", 5);
        state.modify("lo", -5);

        assert_eq!(state.get("hi", 0), i64::MAX);
        assert_eq!(state.get("lo", 0), i64::MIN);
    }

    #[test]
    fn test_copy_is_independent() {
        let original = VariableState::new().with("x", 1);
        let mut copy = original.clone();
        copy.set("x", 99);
        copy.set("y", 5);

        assert_eq!(original.get("x", 0), 1);
        assert!(!original.contains("y"));
        assert_ne!(original, copy);
    }

    #[test]
    fn test_iter_in_key_order() {
        let state = VariableState::new().with("b", 2).with("a", 1).with("c", 3);
        let keys: Vec<&str> = state.iter().map(|(k, _)| k).collect();

        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_any_clone_debug_is_state() {
        assert_state(&VariableState::new());
        assert_state(&(1_i32, "s"));
        assert_state(&vec![1.0_f64]);
    }
}
