//! Transition dynamics: the action catalog and how actions change state.
//!
//! A `TransitionModel` does two things for the environment:
//! - `resolve`: look a requested action up in its catalog
//! - `apply`: compute the next state for a resolved action
//!
//! `Domain` is the bundled catalog implementation. Each entry is an
//! `ActionType` keyed by name.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::core::Action;
use crate::error::BoxError;

/// One entry in an action catalog.
///
/// `perform` must not mutate `state`; it returns the next state.
pub trait ActionType<S> {
    /// Name the catalog is keyed by.
    fn name(&self) -> &str;

    /// Compute the state reached by taking `action` in `state`.
    fn perform(&self, state: &S, action: &Action) -> Result<S, BoxError>;
}

/// An `ActionType` backed by a closure.
pub struct FnActionType<F> {
    name: String,
    perform: F,
}

impl<F> FnActionType<F> {
    /// Wrap a closure as a named action type.
    pub fn new(name: impl Into<String>, perform: F) -> Self {
        Self {
            name: name.into(),
            perform,
        }
    }
}

impl<S, F> ActionType<S> for FnActionType<F>
where
    F: Fn(&S, &Action) -> Result<S, BoxError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn perform(&self, state: &S, action: &Action) -> Result<S, BoxError> {
        (self.perform)(state, action)
    }
}

/// A request that matched a catalog entry.
///
/// Holds its own copy of the requested action, so executing it never
/// touches the caller's instance.
pub struct ResolvedAction<S> {
    action: Action,
    action_type: Rc<dyn ActionType<S>>,
}

impl<S> ResolvedAction<S> {
    /// Pair a copied request with the action type it resolved to.
    pub fn new(action: Action, action_type: Rc<dyn ActionType<S>>) -> Self {
        Self { action, action_type }
    }

    /// The copied request.
    #[must_use]
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// The catalog entry.
    #[must_use]
    pub fn action_type(&self) -> &dyn ActionType<S> {
        self.action_type.as_ref()
    }

    /// Run the action type on `state`.
    pub fn perform(&self, state: &S) -> Result<S, BoxError> {
        self.action_type.perform(state, &self.action)
    }
}

impl<S> Clone for ResolvedAction<S> {
    fn clone(&self) -> Self {
        Self {
            action: self.action.clone(),
            action_type: Rc::clone(&self.action_type),
        }
    }
}

impl<S> fmt::Debug for ResolvedAction<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedAction")
            .field("action", &self.action)
            .field("action_type", &self.action_type.name())
            .finish()
    }
}

/// Transition model trait.
///
/// ## Implementation Notes
///
/// - `resolve`: Return `None` for names outside the catalog
/// - `apply`: Failures are propagated to the caller unmodified
pub trait TransitionModel<S> {
    /// Look up a requested action in the catalog.
    fn resolve(&self, action: &Action) -> Option<ResolvedAction<S>>;

    /// Compute the next state.
    ///
    /// Default implementation runs the resolved action type.
    fn apply(&self, state: &S, action: &ResolvedAction<S>) -> Result<S, BoxError> {
        action.perform(state)
    }
}

/// Action catalog keyed by name.
///
/// Remembers insertion order so `action_names` is stable. Adding a name
/// that already exists replaces the entry in place.
pub struct Domain<S> {
    actions: FxHashMap<String, Rc<dyn ActionType<S>>>,
    order: Vec<String>,
}

impl<S> Domain<S> {
    /// Create an empty domain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Add an action type to the catalog.
    pub fn add_action(&mut self, action_type: impl ActionType<S> + 'static) {
        let name = action_type.name().to_string();
        if !self.actions.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.actions.insert(name, Rc::new(action_type));
    }

    /// Add an action type (builder pattern).
    #[must_use]
    pub fn with_action(mut self, action_type: impl ActionType<S> + 'static) -> Self {
        self.add_action(action_type);
        self
    }

    /// Get an action type by name.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&dyn ActionType<S>> {
        self.actions.get(name).map(|a| a.as_ref())
    }

    /// Action names in insertion order.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of action types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<S> Default for Domain<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for Domain<S> {
    fn clone(&self) -> Self {
        Self {
            actions: self.actions.clone(),
            order: self.order.clone(),
        }
    }
}

impl<S> fmt::Debug for Domain<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain").field("actions", &self.order).finish()
    }
}

impl<S> TransitionModel<S> for Domain<S> {
    fn resolve(&self, action: &Action) -> Option<ResolvedAction<S>> {
        self.actions
            .get(&action.name)
            .map(|action_type| ResolvedAction::new(action.clone(), Rc::clone(action_type)))
    }
}
