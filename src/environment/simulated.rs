//! Simulated environment: the state machine behind `execute_action`.
//!
//! ## Construction
//!
//! - `new`: no state and no generator. Set a state or attach a generator
//!   and reset before acting.
//! - `with_initial_state`: binds a constant generator to the state, so
//!   resets always return to it.
//! - `with_generator`: seeds the current state from one `generate` call.
//!
//! ## Execution order
//!
//! `execute_action` always runs in this order:
//! 1. resolve the action (unknown names fail with no side effects)
//! 2. notify observers of initiation with a copy of the current state
//! 3. compute the transition and reward, unless gated
//! 4. build the outcome from copies
//! 5. commit the next state
//! 6. notify observers of the interaction
//!
//! ## Terminal gating
//!
//! By default, once the current state is terminal, actions return the
//! unchanged state with zero reward until the state is reset or forced.
//! `set_allow_action_from_terminal_states(true)` lifts the gate.

use std::fmt;

use log::{debug, trace, warn};

use crate::core::{Action, EnvironmentConfig, State};
use crate::error::{EnvError, Result};
use crate::model::{ConstantStateGenerator, RewardFunction, StateGenerator, TerminalPredicate, TransitionModel};

use super::observer::{ObserverHandle, ObserverRegistry};
use super::outcome::EnvironmentOutcome;
use super::{Environment, StateSettableEnvironment};

/// Environment that simulates interactions with a transition model.
///
/// All returned observations are copies of the true internal state.
///
/// ## Example
///
/// ```
/// use sim_env::core::Action;
/// use sim_env::model::{Domain, FnActionType, NullTermination};
/// use sim_env::{BoxError, Environment, SimulatedEnvironment};
///
/// let domain = Domain::<i64>::new().with_action(FnActionType::new(
///     "inc",
///     |s: &i64, _: &Action| -> Result<i64, BoxError> { Ok(s + 1) },
/// ));
/// let reward = |_: &i64, _: &Action, next: &i64| *next as f64;
/// let mut env = SimulatedEnvironment::with_initial_state(domain, reward, NullTermination, 0);
///
/// let outcome = env.execute_action(&Action::new("inc")).unwrap();
/// assert_eq!(*outcome.resulting_state(), 1);
/// assert_eq!(env.last_reward(), 1.0);
/// ```
pub struct SimulatedEnvironment<S> {
    domain: Box<dyn TransitionModel<S>>,
    reward_function: Box<dyn RewardFunction<S>>,
    terminal_predicate: Box<dyn TerminalPredicate<S>>,

    /// Source of reset states. `None` until set explicitly, bound by a
    /// constructor, or bound implicitly by `set_cur_state_to`.
    state_generator: Option<Box<dyn StateGenerator<S>>>,

    /// The true state. Only ever handed out as a copy.
    cur_state: Option<S>,
    last_reward: f64,
    allow_action_from_terminal_states: bool,
    observers: ObserverRegistry<S>,
    name: String,
}

impl<S: State + 'static> SimulatedEnvironment<S> {
    /// Create an environment with no state and no generator.
    pub fn new(
        domain: impl TransitionModel<S> + 'static,
        reward_function: impl RewardFunction<S> + 'static,
        terminal_predicate: impl TerminalPredicate<S> + 'static,
    ) -> Self {
        let config = EnvironmentConfig::default();
        Self {
            domain: Box::new(domain),
            reward_function: Box::new(reward_function),
            terminal_predicate: Box::new(terminal_predicate),
            state_generator: None,
            cur_state: None,
            last_reward: 0.0,
            allow_action_from_terminal_states: config.allow_action_from_terminal_states,
            observers: ObserverRegistry::new(),
            name: config.name,
        }
    }

    /// Create an environment starting in `initial_state`.
    ///
    /// Resets return to `initial_state` unless another generator is set.
    pub fn with_initial_state(
        domain: impl TransitionModel<S> + 'static,
        reward_function: impl RewardFunction<S> + 'static,
        terminal_predicate: impl TerminalPredicate<S> + 'static,
        initial_state: S,
    ) -> Self {
        let mut env = Self::new(domain, reward_function, terminal_predicate);
        env.state_generator = Some(Box::new(ConstantStateGenerator::new(initial_state.clone())));
        env.cur_state = Some(initial_state);
        env
    }

    /// Create an environment whose initial and reset states come from
    /// `generator`. The generator is invoked once immediately.
    pub fn with_generator(
        domain: impl TransitionModel<S> + 'static,
        reward_function: impl RewardFunction<S> + 'static,
        terminal_predicate: impl TerminalPredicate<S> + 'static,
        mut generator: impl StateGenerator<S> + 'static,
    ) -> Self {
        let mut env = Self::new(domain, reward_function, terminal_predicate);
        env.cur_state = Some(generator.generate());
        env.state_generator = Some(Box::new(generator));
        env
    }

    /// Apply a configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: EnvironmentConfig) -> Self {
        self.name = config.name;
        self.allow_action_from_terminal_states = config.allow_action_from_terminal_states;
        debug!(
            "[{}] configured (allow_action_from_terminal_states = {})",
            self.name, self.allow_action_from_terminal_states
        );
        self
    }

    /// Label used in log records.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Collaborators ===

    /// The transition model.
    #[must_use]
    pub fn domain(&self) -> &dyn TransitionModel<S> {
        self.domain.as_ref()
    }

    /// Replace the transition model.
    pub fn set_domain(&mut self, domain: impl TransitionModel<S> + 'static) {
        self.domain = Box::new(domain);
    }

    /// The reward function.
    #[must_use]
    pub fn reward_function(&self) -> &dyn RewardFunction<S> {
        self.reward_function.as_ref()
    }

    /// Replace the reward function.
    pub fn set_reward_function(&mut self, reward_function: impl RewardFunction<S> + 'static) {
        self.reward_function = Box::new(reward_function);
    }

    /// The terminal predicate.
    #[must_use]
    pub fn terminal_predicate(&self) -> &dyn TerminalPredicate<S> {
        self.terminal_predicate.as_ref()
    }

    /// Replace the terminal predicate.
    pub fn set_terminal_predicate(&mut self, terminal_predicate: impl TerminalPredicate<S> + 'static) {
        self.terminal_predicate = Box::new(terminal_predicate);
    }

    /// The bound state generator, if any.
    #[must_use]
    pub fn state_generator(&self) -> Option<&dyn StateGenerator<S>> {
        self.state_generator.as_deref()
    }

    /// Bind a state generator used by `reset_environment`.
    ///
    /// Does not touch the current state.
    pub fn set_state_generator(&mut self, generator: impl StateGenerator<S> + 'static) {
        self.state_generator = Some(Box::new(generator));
    }

    /// Whether a reset target is bound.
    ///
    /// This becomes `true` as a side effect of the first `set_cur_state_to`
    /// on an environment without a generator.
    #[must_use]
    pub fn has_state_generator(&self) -> bool {
        self.state_generator.is_some()
    }

    // === Terminal gating ===

    /// Whether transitions are computed from terminal states.
    #[must_use]
    pub fn allow_action_from_terminal_states(&self) -> bool {
        self.allow_action_from_terminal_states
    }

    /// Set whether transitions are computed from terminal states.
    ///
    /// When `false`, actions from a terminal state leave the state unchanged
    /// and yield zero reward until `reset_environment` or `set_cur_state_to`
    /// moves the environment to a non-terminal state.
    pub fn set_allow_action_from_terminal_states(&mut self, allow: bool) {
        self.allow_action_from_terminal_states = allow;
    }

    // === Observers ===

    /// Registered observers.
    #[must_use]
    pub fn observers(&self) -> &ObserverRegistry<S> {
        &self.observers
    }

    /// Mutable access to the observer registry.
    pub fn observers_mut(&mut self) -> &mut ObserverRegistry<S> {
        &mut self.observers
    }

    /// Register observers, in order.
    pub fn add_observers(&mut self, observers: impl IntoIterator<Item = ObserverHandle<S>>) {
        self.observers.add_all(observers);
    }

    /// Remove the first registration of each observer.
    pub fn remove_observers(&mut self, observers: &[ObserverHandle<S>]) {
        self.observers.remove_all(observers);
    }

    /// Remove every observer.
    pub fn clear_all_observers(&mut self) {
        self.observers.clear();
    }
}

impl<S: State + 'static> Environment<S> for SimulatedEnvironment<S> {
    fn current_observation(&self) -> Option<S> {
        self.cur_state.clone()
    }

    fn execute_action(&mut self, action: &Action) -> Result<EnvironmentOutcome<S>> {
        let Some(resolved) = self.domain.resolve(action) else {
            warn!("[{}] cannot execute `{}`: not in the domain's action catalog", self.name, action);
            return Err(EnvError::ActionNotFound {
                action: action.to_string(),
            });
        };
        let cur_state = self.cur_state.as_ref().ok_or(EnvError::Uninitialized)?;

        self.observers.notify_initiation(cur_state, action)?;

        let gated = !self.allow_action_from_terminal_states && self.terminal_predicate.is_terminal(cur_state);
        let next_state = if gated {
            debug!("[{}] `{}` ignored: current state is terminal", self.name, action);
            self.last_reward = 0.0;
            None
        } else {
            let next = self.domain.apply(cur_state, &resolved).map_err(EnvError::Transition)?;
            self.last_reward = self.reward_function.reward(cur_state, resolved.action(), &next);
            Some(next)
        };

        // Gated steps keep the current state as the resulting state.
        let resulting = next_state.as_ref().unwrap_or(cur_state);
        let terminated = self.terminal_predicate.is_terminal(resulting);
        let outcome = EnvironmentOutcome::new(
            cur_state.clone(),
            resolved.action().clone(),
            resulting.clone(),
            self.last_reward,
            terminated,
        );
        trace!(
            "[{}] {:?} --{}--> {:?} (reward {}, terminal {})",
            self.name,
            outcome.previous_state(),
            action,
            outcome.resulting_state(),
            self.last_reward,
            terminated
        );

        if let Some(next) = next_state {
            self.cur_state = Some(next);
        }

        self.observers.notify_interaction(&outcome)?;
        Ok(outcome)
    }

    fn last_reward(&self) -> f64 {
        self.last_reward
    }

    fn is_in_terminal_state(&self) -> bool {
        self.cur_state
            .as_ref()
            .is_some_and(|s| self.terminal_predicate.is_terminal(s))
    }

    fn reset_environment(&mut self) -> Result<()> {
        let Some(generator) = self.state_generator.as_mut() else {
            warn!("[{}] reset requested with no state generator bound", self.name);
            return Err(EnvError::ResetWithoutGenerator);
        };
        let state = generator.generate();
        self.last_reward = 0.0;
        self.cur_state = Some(state);
        debug!("[{}] reset", self.name);

        let env: &Self = self;
        env.observers.notify_reset(env)
    }
}

impl<S: State + 'static> StateSettableEnvironment<S> for SimulatedEnvironment<S> {
    /// Force the current state.
    ///
    /// If no generator is bound yet, `state` also becomes the reset target
    /// (see [`SimulatedEnvironment::has_state_generator`]).
    fn set_cur_state_to(&mut self, state: S) {
        if self.state_generator.is_none() {
            debug!("[{}] forced state bound as reset target", self.name);
            self.state_generator = Some(Box::new(ConstantStateGenerator::new(state.clone())));
        }
        self.cur_state = Some(state);
    }
}

impl<S: fmt::Debug> fmt::Debug for SimulatedEnvironment<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedEnvironment")
            .field("name", &self.name)
            .field("cur_state", &self.cur_state)
            .field("last_reward", &self.last_reward)
            .field("allow_action_from_terminal_states", &self.allow_action_from_terminal_states)
            .field("has_state_generator", &self.state_generator.is_some())
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
