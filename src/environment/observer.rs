//! Environment observers.
//!
//! Observers are notified of three lifecycle events:
//! - action initiation, before the transition is computed
//! - interaction, after the transition is committed
//! - reset, after a new state has been generated
//!
//! Notification is synchronous and in registration order. The first
//! observer that fails stops the remaining notifications for that event,
//! and the failure propagates to the caller.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::core::Action;
use crate::error::{BoxError, EnvError, ObserverEvent};

use super::outcome::EnvironmentOutcome;
use super::Environment;

/// Listener for environment events.
///
/// Every method defaults to a no-op, so observers implement only the
/// events they care about.
pub trait EnvironmentObserver<S> {
    /// An action was resolved and is about to be executed.
    ///
    /// `observed` is this observer's own copy of the pre-transition state.
    fn on_action_initiation(&mut self, observed: S, action: &Action) -> Result<(), BoxError> {
        let _ = (observed, action);
        Ok(())
    }

    /// An action finished and its transition is committed.
    fn on_interaction(&mut self, outcome: &EnvironmentOutcome<S>) -> Result<(), BoxError> {
        let _ = outcome;
        Ok(())
    }

    /// The environment was reset.
    fn on_reset(&mut self, env: &dyn Environment<S>) -> Result<(), BoxError> {
        let _ = env;
        Ok(())
    }
}

/// Shared handle to a registered observer.
///
/// Registration and removal go by handle identity, so keep a clone of the
/// handle to remove the observer later.
pub type ObserverHandle<S> = Rc<RefCell<dyn EnvironmentObserver<S>>>;

/// Ordered observer list.
///
/// No deduplication: registering the same handle twice notifies it twice.
pub struct ObserverRegistry<S> {
    observers: Vec<ObserverHandle<S>>,
}

impl<S> ObserverRegistry<S> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { observers: Vec::new() }
    }

    /// Register an observer at the end of the list.
    pub fn add(&mut self, observer: ObserverHandle<S>) {
        self.observers.push(observer);
    }

    /// Register several observers, in order.
    pub fn add_all(&mut self, observers: impl IntoIterator<Item = ObserverHandle<S>>) {
        self.observers.extend(observers);
    }

    /// Remove the first registration of `observer`.
    ///
    /// Returns `false` if it was not registered.
    pub fn remove(&mut self, observer: &ObserverHandle<S>) -> bool {
        match self.observers.iter().position(|o| Rc::ptr_eq(o, observer)) {
            Some(index) => {
                self.observers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the first registration of each observer. Absent ones are skipped.
    pub fn remove_all(&mut self, observers: &[ObserverHandle<S>]) {
        for observer in observers {
            self.remove(observer);
        }
    }

    /// Remove every observer.
    pub fn clear(&mut self) {
        self.observers.clear();
    }

    /// Iterate over observers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ObserverHandle<S>> {
        self.observers.iter()
    }

    /// Number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check if no observers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Give every observer its own copy of `state`.
    pub(crate) fn notify_initiation(&self, state: &S, action: &Action) -> Result<(), EnvError>
    where
        S: Clone,
    {
        for observer in &self.observers {
            observer
                .borrow_mut()
                .on_action_initiation(state.clone(), action)
                .map_err(|source| observer_failed(ObserverEvent::Initiation, source))?;
        }
        Ok(())
    }

    pub(crate) fn notify_interaction(&self, outcome: &EnvironmentOutcome<S>) -> Result<(), EnvError> {
        for observer in &self.observers {
            observer
                .borrow_mut()
                .on_interaction(outcome)
                .map_err(|source| observer_failed(ObserverEvent::Interaction, source))?;
        }
        Ok(())
    }

    pub(crate) fn notify_reset(&self, env: &dyn Environment<S>) -> Result<(), EnvError> {
        for observer in &self.observers {
            observer
                .borrow_mut()
                .on_reset(env)
                .map_err(|source| observer_failed(ObserverEvent::Reset, source))?;
        }
        Ok(())
    }
}

fn observer_failed(event: ObserverEvent, source: BoxError) -> EnvError {
    log::warn!("observer failed during {event} notification: {source}");
    EnvError::Observer { event, source }
}

impl<S> Default for ObserverRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for ObserverRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("len", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Appends `(tag, event)` to a shared log.
    struct Tagged {
        tag: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl EnvironmentObserver<i32> for Tagged {
        fn on_action_initiation(&mut self, observed: i32, action: &Action) -> Result<(), BoxError> {
            self.log.borrow_mut().push(format!("{}:init:{}:{}", self.tag, observed, action));
            if self.fail {
                return Err(format!("{} refused", self.tag).into());
            }
            Ok(())
        }
    }

    fn tagged(tag: &'static str, log: &Rc<RefCell<Vec<String>>>, fail: bool) -> ObserverHandle<i32> {
        Rc::new(RefCell::new(Tagged {
            tag,
            log: Rc::clone(log),
            fail,
        }))
    }

    #[test]
    fn test_notifies_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ObserverRegistry::new();
        registry.add_all([tagged("a", &log, false), tagged("b", &log, false)]);

        registry.notify_initiation(&7, &Action::new("go")).unwrap();

        assert_eq!(*log.borrow(), vec!["a:init:7:go", "b:init:7:go"]);
    }

    #[test]
    fn test_failure_stops_remaining() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ObserverRegistry::new();
        registry.add(tagged("a", &log, true));
        registry.add(tagged("b", &log, false));

        let err = registry.notify_initiation(&1, &Action::new("go")).unwrap_err();

        assert!(matches!(err, EnvError::Observer { event: ObserverEvent::Initiation, .. }));
        assert_eq!(*log.borrow(), vec!["a:init:1:go"]);
    }

    #[test]
    fn test_no_dedup_and_remove_first_match() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = tagged("a", &log, false);
        let b = tagged("b", &log, false);
        let mut registry = ObserverRegistry::new();
        registry.add_all([Rc::clone(&a), Rc::clone(&b), Rc::clone(&a)]);
        assert_eq!(registry.len(), 3);

        assert!(registry.remove(&a));
        assert_eq!(registry.len(), 2);
        assert!(Rc::ptr_eq(registry.iter().next().unwrap(), &b));

        registry.notify_initiation(&0, &Action::new("go")).unwrap();
        assert_eq!(*log.borrow(), vec!["b:init:0:go", "a:init:0:go"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = tagged("a", &log, false);
        let stranger = tagged("x", &log, false);
        let mut registry = ObserverRegistry::new();
        registry.add(Rc::clone(&a));

        assert!(!registry.remove(&stranger));
        registry.remove_all(&[stranger, Rc::clone(&a)]);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clear() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ObserverRegistry::new();
        registry.add_all([tagged("a", &log, false), tagged("b", &log, false)]);

        registry.clear();

        assert!(registry.is_empty());
        registry.notify_initiation(&0, &Action::new("go")).unwrap();
        assert!(log.borrow().is_empty());
    }
}
