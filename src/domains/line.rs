//! One-dimensional walk.
//!
//! The agent stands on a position in `0..=length` and must reach
//! `length`. Actions:
//! - `forward`: +1, clamped at `length`
//! - `back`: -1, clamped at 0
//! - `jump(n)`: +n (may be negative), clamped to the line; fails if the
//!   sum overflows `i64`
//!
//! Every step costs -1; landing on the goal is worth 0.

use crate::core::{Action, VariableState};
use crate::error::BoxError;
use crate::model::{Domain, FnActionType, GoalBasedReward};

/// Variable holding the agent's position.
pub const POSITION: &str = "position";

/// Variable counting actions taken since the episode started.
pub const STEPS: &str = "steps";

/// Builder for the line-walk domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineWorld {
    length: i64,
}

impl LineWorld {
    /// Create a line of the given length.
    ///
    /// Returns `None` if `length` is not positive.
    #[must_use]
    pub fn new(length: i64) -> Option<Self> {
        (length > 0).then_some(Self { length })
    }

    /// Goal position.
    #[must_use]
    pub fn length(&self) -> i64 {
        self.length
    }

    /// The action catalog.
    pub fn domain(&self) -> Domain<VariableState> {
        let length = self.length;
        Domain::new()
            .with_action(FnActionType::new(
                "forward",
                move |s: &VariableState, _: &Action| -> Result<VariableState, BoxError> {
                    step(s, 1, length)
                },
            ))
            .with_action(FnActionType::new(
                "back",
                move |s: &VariableState, _: &Action| -> Result<VariableState, BoxError> {
                    step(s, -1, length)
                },
            ))
            .with_action(FnActionType::new(
                "jump",
                move |s: &VariableState, a: &Action| -> Result<VariableState, BoxError> {
                    let distance: i64 = a
                        .param(0)
                        .ok_or("jump requires a distance parameter")?
                        .parse()?;
                    step(s, distance, length)
                },
            ))
    }

    /// Start state: position 0, no steps taken.
    #[must_use]
    pub fn initial_state(&self) -> VariableState {
        self.state_at(0)
    }

    /// A fresh state at `position` (clamped to the line).
    #[must_use]
    pub fn state_at(&self, position: i64) -> VariableState {
        VariableState::new()
            .with(POSITION, position.clamp(0, self.length))
            .with(STEPS, 0)
    }

    /// True exactly at the goal position.
    pub fn goal_predicate(&self) -> impl Fn(&VariableState) -> bool + Clone + 'static {
        let length = self.length;
        move |s: &VariableState| s.get(POSITION, 0) == length
    }

    /// -1 per step, 0 for landing on the goal.
    pub fn reward_function(&self) -> GoalBasedReward<VariableState> {
        GoalBasedReward::new(self.goal_predicate(), -1.0, 0.0)
    }
}

fn step(state: &VariableState, delta: i64, length: i64) -> Result<VariableState, BoxError> {
    let position = state
        .get(POSITION, 0)
        .checked_add(delta)
        .ok_or("jump distance overflows the line")?
        .clamp(0, length);
    let mut next = state.clone();
    next.set(POSITION, position);
    next.modify(STEPS, 1);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RewardFunction, TransitionModel};

    fn run(world: &LineWorld, state: &VariableState, action: &Action) -> Result<VariableState, BoxError> {
        let domain = world.domain();
        let resolved = domain.resolve(action).ok_or("unknown action")?;
        domain.apply(state, &resolved)
    }

    #[test]
    fn test_rejects_empty_line() {
        assert!(LineWorld::new(0).is_none());
        assert!(LineWorld::new(-3).is_none());
        assert_eq!(LineWorld::new(4).unwrap().length(), 4);
    }

    #[test]
    fn test_catalog() {
        let world = LineWorld::new(3).unwrap();
        let names: Vec<_> = world.domain().action_names().map(str::to_string).collect();
        assert_eq!(names, vec!["forward", "back", "jump"]);
    }

    #[test]
    fn test_forward_and_back_clamp() {
        let world = LineWorld::new(2).unwrap();
        let start = world.initial_state();

        let back = run(&world, &start, &Action::new("back")).unwrap();
        assert_eq!(back.get(POSITION, -1), 0);
        assert_eq!(back.get(STEPS, -1), 1);

        let end = run(&world, &world.state_at(2), &Action::new("forward")).unwrap();
        assert_eq!(end.get(POSITION, -1), 2);
    }

    #[test]
    fn test_jump() {
        let world = LineWorld::new(10).unwrap();
        let start = world.state_at(4);

        let jumped = run(&world, &start, &Action::with_params("jump", &["3"])).unwrap();
        assert_eq!(jumped.get(POSITION, 0), 7);

        let overshoot = run(&world, &start, &Action::with_params("jump", &["50"])).unwrap();
        assert_eq!(overshoot.get(POSITION, 0), 10);

        assert!(run(&world, &start, &Action::with_params("jump", &["far"])).is_err());
        assert!(run(&world, &start, &Action::new("jump")).is_err());
        assert_eq!(start.get(POSITION, 0), 4);
    }

    #[test]
    fn test_jump_overflow_is_an_error() {
        let world = LineWorld::new(5).unwrap();
        let max = i64::MAX.to_string();
        let min = i64::MIN.to_string();

        let err = run(&world, &world.state_at(1), &Action::with_params("jump", &[&max])).unwrap_err();
        assert_eq!(err.to_string(), "jump distance overflows the line");
        assert!(run(&world, &world.state_at(0), &Action::with_params("jump", &[&max])).is_ok());
        assert!(run(&world, &world.state_at(0), &Action::with_params("jump", &[&min])).is_ok());
        assert!(run(&world, &world.state_at(5), &Action::with_params("jump", &[&max])).is_err());
    }

    #[test]
    fn test_goal_and_reward() {
        let world = LineWorld::new(2).unwrap();
        let goal = world.goal_predicate();
        let rf = world.reward_function();
        let forward = Action::new("forward");

        assert!(goal(&world.state_at(2)));
        assert!(!goal(&world.state_at(1)));
        assert_eq!(rf.reward(&world.state_at(0), &forward, &world.state_at(1)), -1.0);
        assert_eq!(rf.reward(&world.state_at(1), &forward, &world.state_at(2)), 0.0);
    }
}
