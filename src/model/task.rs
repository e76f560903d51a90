//! Reward functions and terminal predicates.
//!
//! Both are narrow single-method traits with blanket impls for closures,
//! so a test can pass `|s: &MyState| s.done` directly.

use std::fmt;

use crate::core::Action;

/// Reward received for a transition.
pub trait RewardFunction<S> {
    /// Reward for moving from `prev` to `next` via `action`.
    fn reward(&self, prev: &S, action: &Action, next: &S) -> f64;
}

impl<S, F> RewardFunction<S> for F
where
    F: Fn(&S, &Action, &S) -> f64,
{
    fn reward(&self, prev: &S, action: &Action, next: &S) -> f64 {
        self(prev, action, next)
    }
}

/// Marks absorbing/goal states.
pub trait TerminalPredicate<S> {
    fn is_terminal(&self, state: &S) -> bool;
}

impl<S, F> TerminalPredicate<S> for F
where
    F: Fn(&S) -> bool,
{
    fn is_terminal(&self, state: &S) -> bool {
        self(state)
    }
}

/// No state is ever terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullTermination;

impl<S> TerminalPredicate<S> for NullTermination {
    fn is_terminal(&self, _state: &S) -> bool {
        false
    }
}

/// Fixed reward per step, with a different reward for landing in a goal.
///
/// The usual shortest-path setup is `step_reward = -1`, `goal_reward = 0`.
pub struct GoalBasedReward<S> {
    goal: Box<dyn TerminalPredicate<S>>,
    step_reward: f64,
    goal_reward: f64,
}

impl<S> GoalBasedReward<S> {
    /// Create a reward function around a goal predicate.
    pub fn new(goal: impl TerminalPredicate<S> + 'static, step_reward: f64, goal_reward: f64) -> Self {
        Self {
            goal: Box::new(goal),
            step_reward,
            goal_reward,
        }
    }

    /// Reward for steps that do not land in a goal.
    #[must_use]
    pub fn step_reward(&self) -> f64 {
        self.step_reward
    }

    /// Reward for steps that land in a goal.
    #[must_use]
    pub fn goal_reward(&self) -> f64 {
        self.goal_reward
    }
}

impl<S> RewardFunction<S> for GoalBasedReward<S> {
    fn reward(&self, _prev: &S, _action: &Action, next: &S) -> f64 {
        if self.goal.is_terminal(next) {
            self.goal_reward
        } else {
            self.step_reward
        }
    }
}

impl<S> fmt::Debug for GoalBasedReward<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoalBasedReward")
            .field("step_reward", &self.step_reward)
            .field("goal_reward", &self.goal_reward)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_reward() {
        let rf = |prev: &i32, _: &Action, next: &i32| f64::from(next - prev);
        assert_eq!(rf.reward(&1, &Action::new("up"), &4), 3.0);
    }

    #[test]
    fn test_closure_terminal() {
        let tf = |s: &i32| *s >= 10;
        assert!(tf.is_terminal(&10));
        assert!(!tf.is_terminal(&9));
    }

    #[test]
    fn test_null_termination() {
        assert!(!TerminalPredicate::<i32>::is_terminal(&NullTermination, &0));
        assert!(!TerminalPredicate::<String>::is_terminal(&NullTermination, &"end".to_string()));
    }

    #[test]
    fn test_goal_based_reward() {
        let rf = GoalBasedReward::<i32>::new(|s: &i32| *s == 3, -1.0, 0.0);
        let step = Action::new("step");

        assert_eq!(rf.reward(&1, &step, &2), -1.0);
        assert_eq!(rf.reward(&2, &step, &3), 0.0);
        assert_eq!(rf.step_reward(), -1.0);
        assert_eq!(rf.goal_reward(), 0.0);
    }
}
